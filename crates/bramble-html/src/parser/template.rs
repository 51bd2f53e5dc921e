//! [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)

use bramble_dom::TreeSink;

use super::tree_builder::{InsertionMode, Step, TreeBuilder};
use crate::error::ParseErrorCode;
use crate::tag::TagName;
use crate::tokenizer::Token;

impl<S: TreeSink> TreeBuilder<S> {
    pub(super) fn in_template(&mut self, token: Token) -> Step {
        match token {
            Token::Character { .. } | Token::Comment { .. } | Token::Doctype { .. } => self.in_body(token),

            Token::StartTag {
                tag:
                    TagName::Base
                    | TagName::Basefont
                    | TagName::Bgsound
                    | TagName::Link
                    | TagName::Meta
                    | TagName::Noframes
                    | TagName::Script
                    | TagName::Style
                    | TagName::Template
                    | TagName::Title,
                ..
            }
            | Token::EndTag {
                tag: TagName::Template,
                ..
            } => self.in_head(token),

            // "Pop the current template insertion mode off the stack of
            // template insertion modes. Push "in table" onto the stack of
            // template insertion modes so that it is the new current template
            // insertion mode. Switch the insertion mode to "in table", and
            // reprocess the token."
            Token::StartTag {
                tag:
                    TagName::Caption
                    | TagName::Colgroup
                    | TagName::Tbody
                    | TagName::Tfoot
                    | TagName::Thead,
                ..
            } => self.replace_template_mode(InsertionMode::InTable, token),
            Token::StartTag {
                tag: TagName::Col, ..
            } => self.replace_template_mode(InsertionMode::InColumnGroup, token),
            Token::StartTag {
                tag: TagName::Tr, ..
            } => self.replace_template_mode(InsertionMode::InTableBody, token),
            Token::StartTag {
                tag: TagName::Td | TagName::Th,
                ..
            } => self.replace_template_mode(InsertionMode::InRow, token),
            Token::StartTag { .. } => self.replace_template_mode(InsertionMode::InBody, token),

            Token::EndTag { .. } => {
                self.error(ParseErrorCode::UnexpectedEndTag);
                Step::Done
            }

            Token::EndOfFile => {
                // "If there is no template element on the stack of open
                // elements, then stop parsing. (fragment case)"
                if self.open_elements.template_count() == 0 {
                    self.stop_parsing();
                    return Step::Done;
                }
                // "Otherwise, this is a parse error. Pop elements from the
                // stack of open elements until a template element has been
                // popped from the stack. Clear the list of active formatting
                // elements up to the last marker. Pop the current template
                // insertion mode off the stack of template insertion modes.
                // Reset the insertion mode appropriately. Reprocess the token."
                self.error(ParseErrorCode::EofInTemplate);
                self.open_elements.pop_until(TagName::Template);
                self.active_formatting.clear_to_last_marker();
                let _ = self.template_modes.pop();
                self.reset_insertion_mode_appropriately();
                Step::Reprocess(token)
            }
        }
    }

    fn replace_template_mode(&mut self, mode: InsertionMode, token: Token) -> Step {
        let _ = self.template_modes.pop();
        self.template_modes.push(mode);
        self.switch_to(mode);
        Step::Reprocess(token)
    }
}
