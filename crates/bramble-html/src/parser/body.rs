//! [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)

use bramble_dom::{Attribute, Namespace, QuirksMode, TreeSink};

use super::adoption::AdoptionOutcome;
use super::foreign_content::{adjust_mathml_attributes, adjust_svg_attributes};
use super::open_elements::Scope;
use super::tree_builder::{InsertionMode, Step, TreeBuilder};
use crate::error::ParseErrorCode;
use crate::tag::TagName;
use crate::tokenizer::{Token, TokenizerState};

/// Start tags that close a `p` in button scope and then insert themselves.
const BLOCK_START_TAGS: &[TagName] = &[
    TagName::Address,
    TagName::Article,
    TagName::Aside,
    TagName::Blockquote,
    TagName::Center,
    TagName::Details,
    TagName::Dialog,
    TagName::Dir,
    TagName::Div,
    TagName::Dl,
    TagName::Fieldset,
    TagName::Figcaption,
    TagName::Figure,
    TagName::Footer,
    TagName::Header,
    TagName::Hgroup,
    TagName::Main,
    TagName::Menu,
    TagName::Nav,
    TagName::Ol,
    TagName::P,
    TagName::Search,
    TagName::Section,
    TagName::Summary,
    TagName::Ul,
];

/// End tags closed with "generate implied end tags, then pop until".
const BLOCK_END_TAGS: &[TagName] = &[
    TagName::Address,
    TagName::Article,
    TagName::Aside,
    TagName::Blockquote,
    TagName::Button,
    TagName::Center,
    TagName::Details,
    TagName::Dialog,
    TagName::Dir,
    TagName::Div,
    TagName::Dl,
    TagName::Fieldset,
    TagName::Figcaption,
    TagName::Figure,
    TagName::Footer,
    TagName::Header,
    TagName::Hgroup,
    TagName::Listing,
    TagName::Main,
    TagName::Menu,
    TagName::Nav,
    TagName::Ol,
    TagName::Pre,
    TagName::Search,
    TagName::Section,
    TagName::Summary,
    TagName::Ul,
];

const HEADINGS: &[TagName] = &[
    TagName::H1,
    TagName::H2,
    TagName::H3,
    TagName::H4,
    TagName::H5,
    TagName::H6,
];

impl<S: TreeSink> TreeBuilder<S> {
    pub(super) fn in_body(&mut self, token: Token) -> Step {
        match token {
            Token::Character { data: '\0' } => {
                self.error(ParseErrorCode::UnexpectedNullCharacter);
                Step::Done
            }
            Token::Character { data } => {
                self.reconstruct_active_formatting_elements();
                self.insert_character(data);
                if !token.is_whitespace_character() {
                    self.frameset_ok = false;
                }
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
            Token::StartTag { .. } => self.in_body_start_tag(token),
            Token::EndTag { .. } => self.in_body_end_tag(token),
            Token::EndOfFile => {
                // "If the stack of template insertion modes is not empty, then
                // process the token using the rules for the "in template"
                // insertion mode."
                if !self.template_modes.is_empty() {
                    return self.in_template(token);
                }
                self.check_open_elements_at_eof();
                self.stop_parsing();
                Step::Done
            }
        }
    }

    fn in_body_start_tag(&mut self, token: Token) -> Step {
        let Token::StartTag {
            ref name,
            tag,
            self_closing,
            ref attributes,
        } = token
        else {
            return Step::Done;
        };

        match tag {
            // "Parse error. If there is a template element on the stack of open
            // elements, then ignore the token. Otherwise, for each attribute on
            // the token, check to see if the attribute is already present on
            // the top element of the stack of open elements. If it is not, add
            // the attribute and its corresponding value to that element."
            TagName::Html => {
                self.error(ParseErrorCode::UnexpectedStartTag);
                if self.open_elements.template_count() > 0 {
                    return Step::Done;
                }
                if let Some(html) = self.open_elements.get(0).map(|e| e.handle.clone()) {
                    self.sink.adopt_attributes(&html, attributes.clone());
                }
            }

            TagName::Base
            | TagName::Basefont
            | TagName::Bgsound
            | TagName::Link
            | TagName::Meta
            | TagName::Noframes
            | TagName::Script
            | TagName::Style
            | TagName::Template
            | TagName::Title => return self.in_head(token),

            // "Parse error. If the stack of open elements has only one node on
            // it, or if the second element on the stack of open elements is
            // not a body element, or if there is a template element on the
            // stack of open elements, then ignore the token. Otherwise, set the
            // frameset-ok flag to "not ok"; then, for each attribute on the
            // token, ... add the attribute ... to the body element"
            TagName::Body => {
                self.error(ParseErrorCode::UnexpectedStartTag);
                let body = self
                    .open_elements
                    .get(1)
                    .filter(|e| e.is_html(TagName::Body))
                    .map(|e| e.handle.clone());
                if let Some(body) = body
                    && self.open_elements.template_count() == 0
                {
                    self.frameset_ok = false;
                    self.sink.adopt_attributes(&body, attributes.clone());
                }
            }

            TagName::Frameset => {
                self.error(ParseErrorCode::UnexpectedStartTag);
                let body = self
                    .open_elements
                    .get(1)
                    .filter(|e| e.is_html(TagName::Body))
                    .map(|e| e.handle.clone());
                let Some(body) = body else {
                    return Step::Done;
                };
                if !self.frameset_ok {
                    return Step::Done;
                }
                // "1. Remove the second element on the stack of open elements
                // from its parent node, if it has one. 2. Pop all the nodes
                // from the bottom of the stack of open elements, from the
                // current node up to, but not including, the root html element.
                // 3. Insert an HTML element for the token. 4. Switch the
                // insertion mode to "in frameset"."
                self.sink.detach(&body);
                self.open_elements.truncate(1);
                let _ = self.insert_html_element(name, attributes);
                self.switch_to(InsertionMode::InFrameset);
            }

            _ if BLOCK_START_TAGS.contains(&tag) => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(name, attributes);
            }

            _ if tag.is_heading() => {
                self.close_p_if_in_button_scope();
                // "If the current node is an HTML element whose tag name is one
                // of "h1", "h2", "h3", "h4", "h5", or "h6", then this is a parse
                // error; pop the current node off the stack of open elements."
                if self.open_elements.current_is_one_of(HEADINGS) {
                    self.error(ParseErrorCode::MisnestedTag);
                    let _ = self.open_elements.pop();
                }
                let _ = self.insert_html_element(name, attributes);
            }

            TagName::Pre | TagName::Listing => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(name, attributes);
                // "If the next token is a U+000A LINE FEED (LF) character
                // token, then ignore that token and move on to the next one.
                // (Newlines at the start of pre blocks are ignored as an
                // authoring convenience.)"
                self.ignore_lf = true;
                self.frameset_ok = false;
            }

            TagName::Form => {
                let in_template = self.open_elements.template_count() > 0;
                if self.form_element.is_some() && !in_template {
                    self.error(ParseErrorCode::UnexpectedStartTag);
                    return Step::Done;
                }
                self.close_p_if_in_button_scope();
                let form = self.insert_html_element(name, attributes);
                if !in_template {
                    self.form_element = Some(form);
                }
            }

            TagName::Li => {
                self.frameset_ok = false;
                self.close_list_item(&[TagName::Li]);
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(name, attributes);
            }

            TagName::Dd | TagName::Dt => {
                self.frameset_ok = false;
                self.close_list_item(&[TagName::Dd, TagName::Dt]);
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(name, attributes);
            }

            TagName::Plaintext => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(name, attributes);
                // "Switch the tokenizer to the PLAINTEXT state."
                self.tokenizer_state = Some(TokenizerState::Plaintext);
            }

            TagName::Button => {
                if self.open_elements.has_in_scope(TagName::Button) {
                    self.error(ParseErrorCode::UnexpectedStartTag);
                    self.open_elements.generate_implied_end_tags(None);
                    self.open_elements.pop_until(TagName::Button);
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(name, attributes);
                self.frameset_ok = false;
            }

            TagName::A => {
                // "If the list of active formatting elements contains an a
                // element between the end of the list and the last marker on
                // the list (or the start of the list if there is no marker on
                // the list), then this is a parse error; run the adoption
                // agency algorithm for the token, then remove that element
                // from the list of active formatting elements and the stack of
                // open elements if the adoption agency algorithm didn't already
                // remove it"
                if let Some(index) = self.active_formatting.find_after_last_marker("a") {
                    let stale = self.active_formatting.get(index).and_then(|e| e.element()).map(|e| e.id);
                    self.error(ParseErrorCode::MisnestedTag);
                    let _ = self.run_adoption_agency("a");
                    if let Some(id) = stale {
                        self.active_formatting.remove_id(id);
                        let _ = self.open_elements.remove(id);
                    }
                }
                self.reconstruct_active_formatting_elements();
                let element = self.insert_html_element(name, attributes);
                self.active_formatting.push(element, token);
            }

            TagName::B
            | TagName::Big
            | TagName::Code
            | TagName::Em
            | TagName::Font
            | TagName::I
            | TagName::S
            | TagName::Small
            | TagName::Strike
            | TagName::Strong
            | TagName::Tt
            | TagName::U => {
                self.reconstruct_active_formatting_elements();
                let element = self.insert_html_element(name, attributes);
                self.active_formatting.push(element, token);
            }

            TagName::Nobr => {
                self.reconstruct_active_formatting_elements();
                if self.open_elements.has_in_scope(TagName::Nobr) {
                    self.error(ParseErrorCode::MisnestedTag);
                    let _ = self.run_adoption_agency("nobr");
                    self.reconstruct_active_formatting_elements();
                }
                let element = self.insert_html_element(name, attributes);
                self.active_formatting.push(element, token);
            }

            TagName::Applet | TagName::Marquee | TagName::Object => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(name, attributes);
                self.active_formatting.push_marker();
                self.frameset_ok = false;
            }

            TagName::Table => {
                // "If the Document is not set to quirks mode, and the stack of
                // open elements has a p element in button scope, then close a p
                // element."
                if self.quirks_mode != QuirksMode::Quirks {
                    self.close_p_if_in_button_scope();
                }
                let _ = self.insert_html_element(name, attributes);
                self.frameset_ok = false;
                self.switch_to(InsertionMode::InTable);
            }

            TagName::Area | TagName::Br | TagName::Embed | TagName::Img | TagName::Keygen | TagName::Wbr => {
                self.insert_void_element(name, attributes);
                self.frameset_ok = false;
            }

            TagName::Input => {
                // "If the token does not have an attribute with the name
                // "type", or if it does, but that attribute's value is not an
                // ASCII case-insensitive match for the string "hidden", then:
                // set the frameset-ok flag to "not ok"."
                let hidden = attributes
                    .iter()
                    .any(|attr| attr.name == "type" && attr.value.eq_ignore_ascii_case("hidden"));
                self.insert_void_element(name, attributes);
                if !hidden {
                    self.frameset_ok = false;
                }
            }

            TagName::Param | TagName::Source | TagName::Track => {
                let _ = self.insert_html_element(name, attributes);
                let _ = self.open_elements.pop();
                self.acknowledge_self_closing();
            }

            TagName::Hr => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(name, attributes);
                let _ = self.open_elements.pop();
                self.acknowledge_self_closing();
                self.frameset_ok = false;
            }

            // "Parse error. Change the token's tag name to "img" and reprocess
            // it. (Don't ask.)"
            TagName::Image => {
                self.error(ParseErrorCode::UnexpectedStartTag);
                return Step::Reprocess(Token::StartTag {
                    name: "img".to_string(),
                    tag: TagName::Img,
                    self_closing,
                    attributes: attributes.clone(),
                });
            }

            TagName::Textarea => {
                // "1. Insert an HTML element for the token. 2. If the next token
                // is a U+000A LINE FEED (LF) character token, then ignore that
                // token... 3. Switch the tokenizer to the RCDATA state. 4. Let
                // the original insertion mode be the current insertion mode.
                // 5. Set the frameset-ok flag to "not ok". 6. Switch the
                // insertion mode to "text"."
                self.parse_text_only_element(name, attributes, TokenizerState::Rcdata);
                self.ignore_lf = true;
                self.frameset_ok = false;
            }

            TagName::Xmp => {
                self.close_p_if_in_button_scope();
                self.reconstruct_active_formatting_elements();
                self.frameset_ok = false;
                self.parse_text_only_element(name, attributes, TokenizerState::Rawtext);
            }

            TagName::Iframe => {
                self.frameset_ok = false;
                self.parse_text_only_element(name, attributes, TokenizerState::Rawtext);
            }

            TagName::Noembed => {
                self.parse_text_only_element(name, attributes, TokenizerState::Rawtext);
            }
            TagName::Noscript if self.scripting => {
                self.parse_text_only_element(name, attributes, TokenizerState::Rawtext);
            }

            TagName::Select => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(name, attributes);
                self.frameset_ok = false;
                // "If the insertion mode is one of "in table", "in caption", "in
                // table body", "in row", or "in cell", then switch the
                // insertion mode to "in select in table". Otherwise, switch the
                // insertion mode to "in select"."
                let next = match self.mode {
                    InsertionMode::InTable
                    | InsertionMode::InCaption
                    | InsertionMode::InTableBody
                    | InsertionMode::InRow
                    | InsertionMode::InCell => InsertionMode::InSelectInTable,
                    _ => InsertionMode::InSelect,
                };
                self.switch_to(next);
            }

            TagName::Optgroup | TagName::Option => {
                if self.open_elements.current_is(TagName::Option) {
                    let _ = self.open_elements.pop();
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(name, attributes);
            }

            TagName::Rb | TagName::Rtc => {
                if self.open_elements.has_in_scope(TagName::Ruby) {
                    self.open_elements.generate_implied_end_tags(None);
                    if !self.open_elements.current_is(TagName::Ruby) {
                        self.error(ParseErrorCode::MisnestedTag);
                    }
                }
                let _ = self.insert_html_element(name, attributes);
            }

            TagName::Rp | TagName::Rt => {
                if self.open_elements.has_in_scope(TagName::Ruby) {
                    self.open_elements.generate_implied_end_tags(Some(TagName::Rtc));
                    if !self.open_elements.current_is_one_of(&[TagName::Rtc, TagName::Ruby]) {
                        self.error(ParseErrorCode::MisnestedTag);
                    }
                }
                let _ = self.insert_html_element(name, attributes);
            }

            // "Reconstruct the active formatting elements, if any. Adjust
            // MathML attributes for the token. (This fixes the case of MathML
            // attributes that are not all lowercase.) Adjust foreign
            // attributes for the token. Insert a foreign element for the
            // token, with MathML namespace and false. If the token has its
            // self-closing flag set, pop the current node off the stack of
            // open elements and acknowledge the token's self-closing flag."
            TagName::Math | TagName::Svg => {
                self.reconstruct_active_formatting_elements();
                let mut attributes = attributes.clone();
                let namespace = if tag == TagName::Math {
                    adjust_mathml_attributes(&mut attributes);
                    Namespace::MathMl
                } else {
                    adjust_svg_attributes(&mut attributes);
                    Namespace::Svg
                };
                let _ = self.insert_element(name, namespace, &attributes);
                if self_closing {
                    let _ = self.open_elements.pop();
                    self.acknowledge_self_closing();
                }
            }

            TagName::Caption
            | TagName::Col
            | TagName::Colgroup
            | TagName::Frame
            | TagName::Head
            | TagName::Tbody
            | TagName::Td
            | TagName::Tfoot
            | TagName::Th
            | TagName::Thead
            | TagName::Tr => {
                self.error(ParseErrorCode::UnexpectedStartTag);
            }

            // "Reconstruct the active formatting elements, if any. Insert an
            // HTML element for the token."
            _ => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(name, attributes);
            }
        }
        Step::Done
    }

    /// The shared loop of the "li" and "dd"/"dt" start tag rules: close an
    /// open item of the same kind unless a special element intervenes.
    fn close_list_item(&mut self, kinds: &[TagName]) {
        let matching = self.open_elements.iter().rev().find_map(|node| {
            if node.is_html_one_of(kinds) {
                return Some(Some(node.tag));
            }
            // "If node is in the special category, but is not an address,
            // div, or p element, then jump to the step labeled done below."
            if node.is_special() && !node.is_html_one_of(&[TagName::Address, TagName::Div, TagName::P]) {
                return Some(None);
            }
            None
        });
        if let Some(Some(tag)) = matching {
            // "Generate implied end tags, except for li elements. If the
            // current node is not an li element, then this is a parse error.
            // Pop elements from the stack of open elements until an li element
            // has been popped from the stack."
            self.open_elements.generate_implied_end_tags(Some(tag));
            if !self.open_elements.current_is(tag) {
                self.error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
            }
            self.open_elements.pop_until(tag);
        }
    }

    /// "Reconstruct the active formatting elements, if any. Insert an HTML
    /// element for the token. Immediately pop the current node off the stack
    /// of open elements. Acknowledge the token's self-closing flag, if it is
    /// set."
    fn insert_void_element(&mut self, name: &str, attributes: &[Attribute]) {
        self.reconstruct_active_formatting_elements();
        let _ = self.insert_html_element(name, attributes);
        let _ = self.open_elements.pop();
        self.acknowledge_self_closing();
    }

    fn in_body_end_tag(&mut self, token: Token) -> Step {
        let Token::EndTag { ref name, tag, .. } = token else {
            return Step::Done;
        };

        match tag {
            TagName::Template => return self.in_head(token),

            // "If the stack of open elements does not have a body element in
            // scope, this is a parse error; ignore the token."
            TagName::Body | TagName::Html => {
                if !self.open_elements.has_in_scope(TagName::Body) {
                    self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                    return Step::Done;
                }
                self.check_open_elements_at_eof();
                self.switch_to(InsertionMode::AfterBody);
                if tag == TagName::Html {
                    return Step::Reprocess(token);
                }
            }

            _ if BLOCK_END_TAGS.contains(&tag) => {
                if !self.open_elements.has_in_scope(tag) {
                    self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                    return Step::Done;
                }
                self.open_elements.generate_implied_end_tags(None);
                if !self.open_elements.current_is(tag) {
                    self.error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
                }
                self.open_elements.pop_until(tag);
            }

            TagName::Form => self.close_form_element(),

            // "If the stack of open elements does not have a p element in
            // button scope, then this is a parse error; insert an HTML element
            // for a "p" start tag token with no attributes. Close a p element."
            TagName::P => {
                if !self.open_elements.has_in_button_scope(TagName::P) {
                    self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                    let _ = self.insert_html_element("p", &[]);
                }
                self.close_p_element();
            }

            TagName::Li => {
                if !self.open_elements.has_in_list_item_scope(TagName::Li) {
                    self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                    return Step::Done;
                }
                self.open_elements.generate_implied_end_tags(Some(TagName::Li));
                if !self.open_elements.current_is(TagName::Li) {
                    self.error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
                }
                self.open_elements.pop_until(TagName::Li);
            }

            TagName::Dd | TagName::Dt => {
                if !self.open_elements.has_in_scope(tag) {
                    self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                    return Step::Done;
                }
                self.open_elements.generate_implied_end_tags(Some(tag));
                if !self.open_elements.current_is(tag) {
                    self.error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
                }
                self.open_elements.pop_until(tag);
            }

            // "If the stack of open elements does not have an element in scope
            // that is an HTML element and whose tag name is one of "h1", "h2",
            // "h3", "h4", "h5", or "h6", then this is a parse error; ignore the
            // token."
            _ if tag.is_heading() => {
                if !self.open_elements.has_any_in_scope(HEADINGS, Scope::Default) {
                    self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                    return Step::Done;
                }
                self.open_elements.generate_implied_end_tags(None);
                if !self.open_elements.current_is(tag) {
                    self.error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
                }
                self.open_elements.pop_until_one_of(HEADINGS);
            }

            _ if tag.is_formatting() => {
                if self.run_adoption_agency(name) == AdoptionOutcome::AnyOtherEndTag {
                    self.any_other_end_tag(name);
                }
            }

            TagName::Applet | TagName::Marquee | TagName::Object => {
                if !self.open_elements.has_in_scope(tag) {
                    self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                    return Step::Done;
                }
                self.open_elements.generate_implied_end_tags(None);
                if !self.open_elements.current_is(tag) {
                    self.error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
                }
                self.open_elements.pop_until(tag);
                self.active_formatting.clear_to_last_marker();
            }

            // "Parse error. Drop the attributes from the token, and act as
            // described in the next entry; i.e. act as if this was a "br"
            // start tag token with no attributes, rather than the end tag
            // token that it actually is."
            TagName::Br => {
                self.error(ParseErrorCode::UnexpectedEndTag);
                self.insert_void_element("br", &[]);
                self.frameset_ok = false;
            }

            _ => self.any_other_end_tag(name),
        }
        Step::Done
    }

    /// The `</form>` rules, which differ depending on whether a template is
    /// open.
    fn close_form_element(&mut self) {
        if self.open_elements.template_count() == 0 {
            // "1. Let node be the element that the form element pointer is set
            // to, or null if it is not set to an element. 2. Set the form
            // element pointer to null. 3. If node is null or if the stack of
            // open elements does not have node in scope, then this is a parse
            // error; return and ignore the token."
            let node = self.form_element.take();
            let Some(node) = node.filter(|form| self.open_elements.has_id_in_scope(form.id)) else {
                self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                return;
            };
            // "4. Generate implied end tags. 5. If the current node is not
            // node, then this is a parse error. 6. Remove node from the stack
            // of open elements."
            self.open_elements.generate_implied_end_tags(None);
            if self.current_node().is_none_or(|current| current.id != node.id) {
                self.error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
            }
            let _ = self.open_elements.remove(node.id);
        } else {
            if !self.open_elements.has_in_scope(TagName::Form) {
                self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                return;
            }
            self.open_elements.generate_implied_end_tags(None);
            if !self.open_elements.current_is(TagName::Form) {
                self.error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
            }
            self.open_elements.pop_until(TagName::Form);
        }
    }

    /// "Any other end tag" in body.
    pub(super) fn any_other_end_tag(&mut self, name: &str) {
        // STEP 1: "Initialize node to be the current node (the bottommost node
        //          of the stack)."
        for index in (0..self.open_elements.len()).rev() {
            let Some(node) = self.open_elements.get(index) else {
                break;
            };
            // STEP 2: "Loop: If node is an HTML element with the same tag name
            //          as the token, then: generate implied end tags, except
            //          for HTML elements with the same tag name as the token.
            //          If node is not the current node, then this is a parse
            //          error. Pop all the nodes from the current node up to
            //          node, including node, then stop these steps."
            if node.is_html_named(name) {
                let id = node.id;
                self.open_elements
                    .generate_implied_end_tags(Some(TagName::from_name(name)));
                if self.current_node().is_none_or(|current| current.id != id) {
                    self.error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
                }
                self.open_elements.pop_until_id(id);
                return;
            }
            // STEP 3: "Otherwise, if node is in the special category, then this
            //          is a parse error; ignore the token, and return."
            if node.is_special() {
                self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                return;
            }
        }
    }
}
