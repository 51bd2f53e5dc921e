//! Table insertion modes: "in table", "in table text", "in caption", "in
//! column group", "in table body", "in row" and "in cell".

use bramble_dom::TreeSink;

use super::open_elements::Scope;
use super::tree_builder::{InsertionMode, Step, TreeBuilder};
use crate::error::ParseErrorCode;
use crate::tag::TagName;
use crate::tokenizer::Token;

const TABLE_SECTIONS: &[TagName] = &[TagName::Tbody, TagName::Tfoot, TagName::Thead];
const CELLS: &[TagName] = &[TagName::Td, TagName::Th];

impl<S: TreeSink> TreeBuilder<S> {
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    pub(super) fn in_table(&mut self, token: Token) -> Step {
        match token {
            // "If the current node is table, tbody, template, tfoot, thead, or
            // tr element: Let the pending table character tokens be an empty
            // list of tokens. Let the original insertion mode be the current
            // insertion mode. Switch the insertion mode to "in table text" and
            // reprocess the token."
            Token::Character { .. }
                if self.open_elements.current_is_one_of(&[
                    TagName::Table,
                    TagName::Tbody,
                    TagName::Template,
                    TagName::Tfoot,
                    TagName::Thead,
                    TagName::Tr,
                ]) =>
            {
                self.pending_table_text.clear();
                self.original_mode = self.mode;
                self.switch_to(InsertionMode::InTableText);
                Step::Reprocess(token)
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
                tag: TagName::Caption,
                ref attributes,
                ..
            } => {
                self.open_elements.clear_back_to_table_context();
                self.active_formatting.push_marker();
                let _ = self.insert_html_element("caption", attributes);
                self.switch_to(InsertionMode::InCaption);
                Step::Done
            }
            Token::StartTag {
                tag: TagName::Colgroup,
                ref attributes,
                ..
            } => {
                self.open_elements.clear_back_to_table_context();
                let _ = self.insert_html_element("colgroup", attributes);
                self.switch_to(InsertionMode::InColumnGroup);
                Step::Done
            }
            // "Clear the stack back to a table context. Insert an HTML element
            // for a "colgroup" start tag token with no attributes, then switch
            // the insertion mode to "in column group". Reprocess the current
            // token."
            Token::StartTag {
                tag: TagName::Col, ..
            } => {
                self.open_elements.clear_back_to_table_context();
                let _ = self.insert_html_element("colgroup", &[]);
                self.switch_to(InsertionMode::InColumnGroup);
                Step::Reprocess(token)
            }
            Token::StartTag {
                tag: TagName::Tbody | TagName::Tfoot | TagName::Thead,
                ref name,
                ref attributes,
                ..
            } => {
                self.open_elements.clear_back_to_table_context();
                let _ = self.insert_html_element(name, attributes);
                self.switch_to(InsertionMode::InTableBody);
                Step::Done
            }
            Token::StartTag {
                tag: TagName::Td | TagName::Th | TagName::Tr,
                ..
            } => {
                self.open_elements.clear_back_to_table_context();
                let _ = self.insert_html_element("tbody", &[]);
                self.switch_to(InsertionMode::InTableBody);
                Step::Reprocess(token)
            }

            // "Parse error. If the stack of open elements does not have a table
            // element in table scope, ignore the token. Otherwise: Pop elements
            // from this stack until a table element has been popped from the
            // stack. Reset the insertion mode appropriately. Reprocess the
            // token."
            Token::StartTag {
                tag: TagName::Table, ..
            } => {
                self.error(ParseErrorCode::UnexpectedStartTag);
                if !self.open_elements.has_in_table_scope(TagName::Table) {
                    return Step::Done;
                }
                self.open_elements.pop_until(TagName::Table);
                self.reset_insertion_mode_appropriately();
                Step::Reprocess(token)
            }
            Token::EndTag {
                tag: TagName::Table, ..
            } => {
                if !self.open_elements.has_in_table_scope(TagName::Table) {
                    self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                    return Step::Done;
                }
                self.open_elements.pop_until(TagName::Table);
                self.reset_insertion_mode_appropriately();
                Step::Done
            }
            Token::EndTag {
                tag:
                    TagName::Body
                    | TagName::Caption
                    | TagName::Col
                    | TagName::Colgroup
                    | TagName::Html
                    | TagName::Tbody
                    | TagName::Td
                    | TagName::Tfoot
                    | TagName::Th
                    | TagName::Thead
                    | TagName::Tr,
                ..
            } => {
                self.error(ParseErrorCode::UnexpectedEndTag);
                Step::Done
            }

            Token::StartTag {
                tag: TagName::Style | TagName::Script | TagName::Template,
                ..
            }
            | Token::EndTag {
                tag: TagName::Template,
                ..
            } => self.in_head(token),

            // "If the token does not have an attribute with the name "type", or
            // if it does, but that attribute's value is not an ASCII
            // case-insensitive match for the string "hidden", then: act as
            // described in the "anything else" entry below. Otherwise: Parse
            // error. Insert an HTML element for the token. Pop that input
            // element off the stack of open elements. Acknowledge the token's
            // self-closing flag, if it is set."
            Token::StartTag {
                tag: TagName::Input,
                ref attributes,
                ..
            } if attributes
                .iter()
                .any(|attr| attr.name == "type" && attr.value.eq_ignore_ascii_case("hidden")) =>
            {
                self.error(ParseErrorCode::UnexpectedStartTag);
                let _ = self.insert_html_element("input", attributes);
                let _ = self.open_elements.pop();
                self.acknowledge_self_closing();
                Step::Done
            }

            // "Parse error. If there is a template element on the stack of open
            // elements, or if the form element pointer is not null, ignore the
            // token. Otherwise: Insert an HTML element for the token, and set
            // the form element pointer to point to the element created. Pop
            // that form element off the stack of open elements."
            Token::StartTag {
                tag: TagName::Form,
                ref attributes,
                ..
            } => {
                self.error(ParseErrorCode::UnexpectedStartTag);
                if self.open_elements.template_count() > 0 || self.form_element.is_some() {
                    return Step::Done;
                }
                let form = self.insert_html_element("form", attributes);
                self.form_element = Some(form);
                let _ = self.open_elements.pop();
                Step::Done
            }

            Token::EndOfFile => self.in_body(token),

            _ => self.in_table_anything_else(token),
        }
    }

    /// "Parse error. Enable foster parenting, process the token using the
    /// rules for the "in body" insertion mode, and then disable foster
    /// parenting."
    fn in_table_anything_else(&mut self, token: Token) -> Step {
        self.error(ParseErrorCode::FosterParentedContent);
        self.foster_parenting = true;
        let step = self.in_body(token);
        self.foster_parenting = false;
        step
    }

    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    pub(super) fn in_table_text(&mut self, token: Token) -> Step {
        match token {
            Token::Character { data: '\0' } => {
                self.error(ParseErrorCode::UnexpectedNullCharacter);
                Step::Done
            }
            // "Append the character token to the pending table character
            // tokens list."
            Token::Character { data } => {
                self.pending_table_text.push(data);
                Step::Done
            }
            _ => {
                let pending = std::mem::take(&mut self.pending_table_text);
                // "If any of the tokens in the pending table character tokens
                // list are character tokens that are not ASCII whitespace, then
                // this is a parse error: reprocess the character tokens in the
                // pending table character tokens list using the rules given in
                // the "anything else" entry in the "in table" insertion mode."
                if pending.chars().any(|c| !matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')) {
                    self.error(ParseErrorCode::FosterParentedContent);
                    self.foster_parenting = true;
                    for data in pending.chars() {
                        let _ = self.in_body(Token::Character { data });
                    }
                    self.foster_parenting = false;
                } else {
                    // "Otherwise, insert the characters given by the pending
                    // table character tokens list."
                    self.insert_text(&pending);
                }
                self.switch_to(self.original_mode);
                Step::Reprocess(token)
            }
        }
    }

    /// Close the caption, if one is in table scope. Returns false when the
    /// token should be ignored.
    fn close_caption(&mut self) -> bool {
        if !self.open_elements.has_in_table_scope(TagName::Caption) {
            self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
            return false;
        }
        // "Generate implied end tags. Now, if the current node is not a caption
        // element, then this is a parse error. Pop elements from this stack
        // until a caption element has been popped from the stack. Clear the
        // list of active formatting elements up to the last marker. Switch the
        // insertion mode to "in table"."
        self.open_elements.generate_implied_end_tags(None);
        if !self.open_elements.current_is(TagName::Caption) {
            self.error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
        }
        self.open_elements.pop_until(TagName::Caption);
        self.active_formatting.clear_to_last_marker();
        self.switch_to(InsertionMode::InTable);
        true
    }

    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    pub(super) fn in_caption(&mut self, token: Token) -> Step {
        match token {
            Token::EndTag {
                tag: TagName::Caption,
                ..
            } => {
                let _ = self.close_caption();
                Step::Done
            }
            Token::StartTag {
                tag:
                    TagName::Caption
                    | TagName::Col
                    | TagName::Colgroup
                    | TagName::Tbody
                    | TagName::Td
                    | TagName::Tfoot
                    | TagName::Th
                    | TagName::Thead
                    | TagName::Tr,
                ..
            }
            | Token::EndTag {
                tag: TagName::Table, ..
            } => {
                if self.close_caption() {
                    Step::Reprocess(token)
                } else {
                    Step::Done
                }
            }
            Token::EndTag {
                tag:
                    TagName::Body
                    | TagName::Col
                    | TagName::Colgroup
                    | TagName::Html
                    | TagName::Tbody
                    | TagName::Td
                    | TagName::Tfoot
                    | TagName::Th
                    | TagName::Thead
                    | TagName::Tr,
                ..
            } => {
                self.error(ParseErrorCode::UnexpectedEndTag);
                Step::Done
            }
            _ => self.in_body(token),
        }
    }

    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolgroup)
    pub(super) fn in_column_group(&mut self, token: Token) -> Step {
        match token {
            Token::Character { data } if token.is_whitespace_character() => {
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
            Token::StartTag {
                tag: TagName::Col,
                ref attributes,
                ..
            } => {
                let _ = self.insert_html_element("col", attributes);
                let _ = self.open_elements.pop();
                self.acknowledge_self_closing();
                Step::Done
            }
            // "If the current node is not a colgroup element, then this is a
            // parse error; ignore the token. Otherwise, pop the current node
            // from the stack of open elements. Switch the insertion mode to "in
            // table"."
            Token::EndTag {
                tag: TagName::Colgroup,
                ..
            } => {
                if !self.open_elements.current_is(TagName::Colgroup) {
                    self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                    return Step::Done;
                }
                let _ = self.open_elements.pop();
                self.switch_to(InsertionMode::InTable);
                Step::Done
            }
            Token::EndTag {
                tag: TagName::Col, ..
            } => {
                self.error(ParseErrorCode::UnexpectedEndTag);
                Step::Done
            }
            Token::StartTag {
                tag: TagName::Template,
                ..
            }
            | Token::EndTag {
                tag: TagName::Template,
                ..
            } => self.in_head(token),
            Token::EndOfFile => self.in_body(token),
            _ => {
                if !self.open_elements.current_is(TagName::Colgroup) {
                    self.error(ParseErrorCode::UnexpectedCharacterToken);
                    return Step::Done;
                }
                let _ = self.open_elements.pop();
                self.switch_to(InsertionMode::InTable);
                Step::Reprocess(token)
            }
        }
    }

    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intbody)
    pub(super) fn in_table_body(&mut self, token: Token) -> Step {
        match token {
            Token::StartTag {
                tag: TagName::Tr,
                ref attributes,
                ..
            } => {
                self.open_elements.clear_back_to_table_body_context();
                let _ = self.insert_html_element("tr", attributes);
                self.switch_to(InsertionMode::InRow);
                Step::Done
            }
            Token::StartTag {
                tag: TagName::Th | TagName::Td,
                ..
            } => {
                self.error(ParseErrorCode::UnexpectedStartTag);
                self.open_elements.clear_back_to_table_body_context();
                let _ = self.insert_html_element("tr", &[]);
                self.switch_to(InsertionMode::InRow);
                Step::Reprocess(token)
            }
            Token::EndTag {
                tag: tag @ (TagName::Tbody | TagName::Tfoot | TagName::Thead),
                ..
            } => {
                if !self.open_elements.has_in_table_scope(tag) {
                    self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                    return Step::Done;
                }
                self.open_elements.clear_back_to_table_body_context();
                let _ = self.open_elements.pop();
                self.switch_to(InsertionMode::InTable);
                Step::Done
            }
            Token::StartTag {
                tag:
                    TagName::Caption
                    | TagName::Col
                    | TagName::Colgroup
                    | TagName::Tbody
                    | TagName::Tfoot
                    | TagName::Thead,
                ..
            }
            | Token::EndTag {
                tag: TagName::Table, ..
            } => {
                // "If the stack of open elements does not have a tbody, thead,
                // or tfoot element in table scope, this is a parse error;
                // ignore the token."
                if !self.open_elements.has_any_in_scope(TABLE_SECTIONS, Scope::Table) {
                    self.error(ParseErrorCode::UnexpectedStartTag);
                    return Step::Done;
                }
                self.open_elements.clear_back_to_table_body_context();
                let _ = self.open_elements.pop();
                self.switch_to(InsertionMode::InTable);
                Step::Reprocess(token)
            }
            Token::EndTag {
                tag:
                    TagName::Body
                    | TagName::Caption
                    | TagName::Col
                    | TagName::Colgroup
                    | TagName::Html
                    | TagName::Td
                    | TagName::Th
                    | TagName::Tr,
                ..
            } => {
                self.error(ParseErrorCode::UnexpectedEndTag);
                Step::Done
            }
            _ => self.in_table(token),
        }
    }

    /// Close the current row, if a `tr` is in table scope. Returns false when
    /// the token should be ignored.
    fn close_row(&mut self) -> bool {
        if !self.open_elements.has_in_table_scope(TagName::Tr) {
            self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
            return false;
        }
        // "Clear the stack back to a table row context. Pop the current node
        // (which will be a tr element) from the stack of open elements. Switch
        // the insertion mode to "in table body"."
        self.open_elements.clear_back_to_table_row_context();
        let _ = self.open_elements.pop();
        self.switch_to(InsertionMode::InTableBody);
        true
    }

    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intr)
    pub(super) fn in_row(&mut self, token: Token) -> Step {
        match token {
            // "Clear the stack back to a table row context. Insert an HTML
            // element for the token, then switch the insertion mode to "in
            // cell". Insert a marker at the end of the list of active
            // formatting elements."
            Token::StartTag {
                tag: TagName::Th | TagName::Td,
                ref name,
                ref attributes,
                ..
            } => {
                self.open_elements.clear_back_to_table_row_context();
                let _ = self.insert_html_element(name, attributes);
                self.switch_to(InsertionMode::InCell);
                self.active_formatting.push_marker();
                Step::Done
            }
            Token::EndTag {
                tag: TagName::Tr, ..
            } => {
                let _ = self.close_row();
                Step::Done
            }
            Token::StartTag {
                tag:
                    TagName::Caption
                    | TagName::Col
                    | TagName::Colgroup
                    | TagName::Tbody
                    | TagName::Tfoot
                    | TagName::Thead
                    | TagName::Tr,
                ..
            }
            | Token::EndTag {
                tag: TagName::Table, ..
            } => {
                if self.close_row() {
                    Step::Reprocess(token)
                } else {
                    Step::Done
                }
            }
            Token::EndTag {
                tag: tag @ (TagName::Tbody | TagName::Tfoot | TagName::Thead),
                ..
            } => {
                if !self.open_elements.has_in_table_scope(tag) {
                    self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                    return Step::Done;
                }
                if self.close_row() {
                    Step::Reprocess(token)
                } else {
                    Step::Done
                }
            }
            Token::EndTag {
                tag:
                    TagName::Body
                    | TagName::Caption
                    | TagName::Col
                    | TagName::Colgroup
                    | TagName::Html
                    | TagName::Td
                    | TagName::Th,
                ..
            } => {
                self.error(ParseErrorCode::UnexpectedEndTag);
                Step::Done
            }
            _ => self.in_table(token),
        }
    }

    /// [§ 13.2.6.4.15 Close the cell](https://html.spec.whatwg.org/multipage/parsing.html#close-the-cell)
    fn close_the_cell(&mut self) {
        // STEP 1: "Generate implied end tags."
        self.open_elements.generate_implied_end_tags(None);
        // STEP 2: "If the current node is not now a td element or a th element,
        //          then this is a parse error."
        if !self.open_elements.current_is_one_of(CELLS) {
            self.error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
        }
        // STEP 3: "Pop elements from the stack of open elements until a td
        //          element or a th element has been popped from the stack."
        self.open_elements.pop_until_one_of(CELLS);
        // STEP 4: "Clear the list of active formatting elements up to the last marker."
        self.active_formatting.clear_to_last_marker();
        // STEP 5: "Switch the insertion mode to "in row"."
        self.switch_to(InsertionMode::InRow);
    }

    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intd)
    pub(super) fn in_cell(&mut self, token: Token) -> Step {
        match token {
            Token::EndTag {
                tag: tag @ (TagName::Td | TagName::Th),
                ..
            } => {
                if !self.open_elements.has_in_table_scope(tag) {
                    self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                    return Step::Done;
                }
                self.open_elements.generate_implied_end_tags(None);
                if !self.open_elements.current_is(tag) {
                    self.error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
                }
                self.open_elements.pop_until(tag);
                self.active_formatting.clear_to_last_marker();
                self.switch_to(InsertionMode::InRow);
                Step::Done
            }
            Token::StartTag {
                tag:
                    TagName::Caption
                    | TagName::Col
                    | TagName::Colgroup
                    | TagName::Tbody
                    | TagName::Td
                    | TagName::Tfoot
                    | TagName::Th
                    | TagName::Thead
                    | TagName::Tr,
                ..
            } => {
                // "Assert: The stack of open elements has a td or th element in
                // table scope."
                if !self.open_elements.has_any_in_scope(CELLS, Scope::Table) {
                    self.error(ParseErrorCode::UnexpectedStartTag);
                    return Step::Done;
                }
                self.close_the_cell();
                Step::Reprocess(token)
            }
            Token::EndTag {
                tag:
                    TagName::Body
                    | TagName::Caption
                    | TagName::Col
                    | TagName::Colgroup
                    | TagName::Html,
                ..
            } => {
                self.error(ParseErrorCode::UnexpectedEndTag);
                Step::Done
            }
            Token::EndTag {
                tag:
                    tag @ (TagName::Table
                    | TagName::Tbody
                    | TagName::Tfoot
                    | TagName::Thead
                    | TagName::Tr),
                ..
            } => {
                if !self.open_elements.has_in_table_scope(tag) {
                    self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                    return Step::Done;
                }
                self.close_the_cell();
                Step::Reprocess(token)
            }
            _ => self.in_body(token),
        }
    }
}
