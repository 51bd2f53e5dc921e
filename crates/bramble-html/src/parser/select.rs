//! The "in select" and "in select in table" insertion modes.

use bramble_dom::TreeSink;

use super::tree_builder::{Step, TreeBuilder};
use crate::error::ParseErrorCode;
use crate::tag::TagName;
use crate::tokenizer::Token;

impl<S: TreeSink> TreeBuilder<S> {
    /// Pop up to and including the open `select`, then pick the insertion mode
    /// from what is left. False when no `select` is in select scope.
    fn close_select(&mut self) -> bool {
        if !self.open_elements.has_in_select_scope(TagName::Select) {
            return false;
        }
        self.open_elements.pop_until(TagName::Select);
        self.reset_insertion_mode_appropriately();
        true
    }

    fn pop_if_current_is(&mut self, tag: TagName) {
        if self.open_elements.current_is(tag) {
            let _ = self.open_elements.pop();
        }
    }

    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    pub(super) fn in_select(&mut self, token: Token) -> Step {
        match token {
            Token::Character { data: '\0' } => {
                self.error(ParseErrorCode::UnexpectedNullCharacter);
                Step::Done
            }
            Token::Character { data } => {
                self.insert_character(data);
                Step::Done
            }
            Token::Comment { data } => {
                self.insert_comment(&data);
                Step::Done
            }
            Token::Doctype { .. } => {
                self.error(ParseErrorCode::MisplacedDoctype);
                Step::Done
            }
            Token::StartTag {
                tag: TagName::Html, ..
            } => self.in_body(token),

            // "If the current node is an option element, pop that node from
            // the stack of open elements. Insert an HTML element for the token."
            Token::StartTag {
                tag: TagName::Option,
                ref attributes,
                ..
            } => {
                self.pop_if_current_is(TagName::Option);
                let _ = self.insert_html_element("option", attributes);
                Step::Done
            }
            Token::StartTag {
                tag: TagName::Optgroup,
                ref attributes,
                ..
            } => {
                self.pop_if_current_is(TagName::Option);
                self.pop_if_current_is(TagName::Optgroup);
                let _ = self.insert_html_element("optgroup", attributes);
                Step::Done
            }
            Token::StartTag {
                tag: TagName::Hr,
                ref attributes,
                ..
            } => {
                self.pop_if_current_is(TagName::Option);
                self.pop_if_current_is(TagName::Optgroup);
                let _ = self.insert_html_element("hr", attributes);
                let _ = self.open_elements.pop();
                self.acknowledge_self_closing();
                Step::Done
            }

            // "First, if the current node is an option element, and the node
            // immediately before it in the stack of open elements is an
            // optgroup element, then pop the current node from the stack of
            // open elements. If the current node is an optgroup element, then
            // pop that node from the stack of open elements. Otherwise, this is
            // a parse error; ignore the token."
            Token::EndTag {
                tag: TagName::Optgroup,
                ..
            } => {
                let len = self.open_elements.len();
                let parent_is_optgroup = len
                    .checked_sub(2)
                    .and_then(|index| self.open_elements.get(index))
                    .is_some_and(|element| element.is_html(TagName::Optgroup));
                if self.open_elements.current_is(TagName::Option) && parent_is_optgroup {
                    let _ = self.open_elements.pop();
                }
                if self.open_elements.current_is(TagName::Optgroup) {
                    let _ = self.open_elements.pop();
                } else {
                    self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                }
                Step::Done
            }
            Token::EndTag {
                tag: TagName::Option,
                ..
            } => {
                if self.open_elements.current_is(TagName::Option) {
                    let _ = self.open_elements.pop();
                } else {
                    self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                }
                Step::Done
            }
            Token::EndTag {
                tag: TagName::Select,
                ..
            } => {
                if !self.close_select() {
                    self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                }
                Step::Done
            }
            // "Parse error. If the stack of open elements does not have a
            // select element in select scope, ignore the token. (fragment case)
            // Otherwise: Pop elements from the stack of open elements until a
            // select element has been popped from the stack. Reset the
            // insertion mode appropriately."
            Token::StartTag {
                tag: TagName::Select,
                ..
            } => {
                self.error(ParseErrorCode::UnexpectedStartTag);
                let _ = self.close_select();
                Step::Done
            }
            Token::StartTag {
                tag: TagName::Input | TagName::Keygen | TagName::Textarea,
                ..
            } => {
                self.error(ParseErrorCode::UnexpectedStartTag);
                if self.close_select() {
                    Step::Reprocess(token)
                } else {
                    Step::Done
                }
            }
            Token::StartTag {
                tag: TagName::Script | TagName::Template,
                ..
            }
            | Token::EndTag {
                tag: TagName::Template,
                ..
            } => self.in_head(token),
            Token::EndOfFile => self.in_body(token),
            Token::StartTag { .. } => {
                self.error(ParseErrorCode::UnexpectedStartTag);
                Step::Done
            }
            Token::EndTag { .. } => {
                self.error(ParseErrorCode::UnexpectedEndTag);
                Step::Done
            }
        }
    }

    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    pub(super) fn in_select_in_table(&mut self, token: Token) -> Step {
        const TABLE_TAGS: &[TagName] = &[
            TagName::Caption,
            TagName::Table,
            TagName::Tbody,
            TagName::Tfoot,
            TagName::Thead,
            TagName::Tr,
            TagName::Td,
            TagName::Th,
        ];
        match token {
            Token::StartTag { tag, .. } if TABLE_TAGS.contains(&tag) => {
                self.error(ParseErrorCode::UnexpectedStartTag);
                self.open_elements.pop_until(TagName::Select);
                self.reset_insertion_mode_appropriately();
                Step::Reprocess(token)
            }
            // "Parse error. If the stack of open elements does not have an
            // element in table scope that is an HTML element with the same tag
            // name as that of the token, then ignore the token."
            Token::EndTag { tag, .. } if TABLE_TAGS.contains(&tag) => {
                self.error(ParseErrorCode::UnexpectedEndTag);
                if !self.open_elements.has_in_table_scope(tag) {
                    return Step::Done;
                }
                self.open_elements.pop_until(TagName::Select);
                self.reset_insertion_mode_appropriately();
                Step::Reprocess(token)
            }
            _ => self.in_select(token),
        }
    }
}
