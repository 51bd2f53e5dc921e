//! The insertion modes from the start of the document up to `<body>`, and
//! the "text" mode used by every RCDATA/RAWTEXT element.

use bramble_dom::{Attribute, Namespace, QuirksMode, TreeSink};

use super::quirks::{document_mode, is_doctype_error};
use super::tree_builder::{InsertionMode, Step, TreeBuilder};
use crate::error::ParseErrorCode;
use crate::tag::TagName;
use crate::tokenizer::{Token, TokenizerState};

impl<S: TreeSink> TreeBuilder<S> {
    pub(super) fn set_quirks_mode(&mut self, mode: QuirksMode) {
        log::debug!(target: "bramble::tree_builder", "document mode {mode:?}");
        self.quirks_mode = mode;
        self.sink.set_document_mode(mode);
    }

    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    pub(super) fn initial(&mut self, token: Token) -> Step {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION,
            // U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE
            // RETURN (CR), or U+0020 SPACE": "Ignore the token."
            Token::Character { .. } if token.is_whitespace_character() => Step::Done,

            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => {
                let document = self.sink.document();
                self.append_comment_to(&document, &data);
                Step::Done
            }

            Token::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => {
                let (name, public, system) = (
                    name.as_deref(),
                    public_identifier.as_deref(),
                    system_identifier.as_deref(),
                );
                if is_doctype_error(name, public, system) {
                    self.error(ParseErrorCode::NonConformingDoctype);
                }

                // "Append a DocumentType node to the Document node, with its
                // name set to the name given in the DOCTYPE token, or the
                // empty string if the name was missing..."
                self.sink.append_doctype(
                    name.unwrap_or_default(),
                    public.unwrap_or_default(),
                    system.unwrap_or_default(),
                );

                self.set_quirks_mode(document_mode(name, public, system, force_quirks));
                self.switch_to(InsertionMode::BeforeHtml);
                Step::Done
            }

            // "If the document is not an iframe srcdoc document, then this is
            // a parse error; if the parser cannot change the mode flag is
            // false, set the Document to quirks mode."
            _ => {
                self.error(ParseErrorCode::MissingDoctype);
                self.set_quirks_mode(QuirksMode::Quirks);
                self.switch_to(InsertionMode::BeforeHtml);
                Step::Reprocess(token)
            }
        }
    }

    /// Create the `html` element, make it the document element and push it.
    fn insert_root_element(&mut self, attributes: &[Attribute]) {
        let element = self.create_element("html", Namespace::Html, attributes);
        let document = self.sink.document();
        self.sink.append_child(&document, &element.handle);
        self.open_elements.push(element);
        self.switch_to(InsertionMode::BeforeHead);
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    pub(super) fn before_html(&mut self, token: Token) -> Step {
        match token {
            Token::Doctype { .. } => {
                self.error(ParseErrorCode::MisplacedDoctype);
                Step::Done
            }
            Token::Comment { data } => {
                let document = self.sink.document();
                self.append_comment_to(&document, &data);
                Step::Done
            }
            Token::Character { .. } if token.is_whitespace_character() => Step::Done,

            // "Create an element for the token in the HTML namespace, with the
            // Document as the intended parent. Append it to the Document
            // object. Put this element in the stack of open elements."
            Token::StartTag {
                tag: TagName::Html,
                ref attributes,
                ..
            } => {
                self.insert_root_element(attributes);
                Step::Done
            }

            Token::EndTag {
                tag: TagName::Head | TagName::Body | TagName::Html | TagName::Br,
                ..
            } => {
                self.insert_root_element(&[]);
                Step::Reprocess(token)
            }
            Token::EndTag { .. } => {
                self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                Step::Done
            }

            // "Create an html element whose node document is the Document
            // object. Append it to the Document object. Put this element in
            // the stack of open elements."
            _ => {
                self.insert_root_element(&[]);
                Step::Reprocess(token)
            }
        }
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    pub(super) fn before_head(&mut self, token: Token) -> Step {
        match token {
            Token::Character { .. } if token.is_whitespace_character() => Step::Done,
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

            // "Insert an HTML element for the token. Set the head element
            // pointer to the newly created head element."
            Token::StartTag {
                tag: TagName::Head,
                ref attributes,
                ..
            } => {
                let head = self.insert_html_element("head", attributes);
                self.head_element = Some(head);
                self.switch_to(InsertionMode::InHead);
                Step::Done
            }

            Token::EndTag {
                tag: TagName::Head | TagName::Body | TagName::Html | TagName::Br,
                ..
            } => {
                self.insert_implied_head();
                Step::Reprocess(token)
            }
            Token::EndTag { .. } => {
                self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                Step::Done
            }
            _ => {
                self.insert_implied_head();
                Step::Reprocess(token)
            }
        }
    }

    /// "Insert an HTML element for a "head" start tag token with no
    /// attributes. Set the head element pointer to the newly created head
    /// element. Switch the insertion mode to "in head"."
    fn insert_implied_head(&mut self) {
        let head = self.insert_html_element("head", &[]);
        self.head_element = Some(head);
        self.switch_to(InsertionMode::InHead);
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    pub(super) fn in_head(&mut self, token: Token) -> Step {
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

            // "Insert an HTML element for the token. Immediately pop the
            // current node off the stack of open elements. Acknowledge the
            // token's self-closing flag, if it is set."
            Token::StartTag {
                tag: TagName::Base | TagName::Basefont | TagName::Bgsound | TagName::Link | TagName::Meta,
                ref name,
                ref attributes,
                ..
            } => {
                let _ = self.insert_html_element(name, attributes);
                let _ = self.open_elements.pop();
                self.acknowledge_self_closing();
                Step::Done
            }

            // "Follow the generic RCDATA element parsing algorithm."
            Token::StartTag {
                tag: TagName::Title,
                ref name,
                ref attributes,
                ..
            } => {
                self.parse_text_only_element(name, attributes, TokenizerState::Rcdata);
                Step::Done
            }

            // "A start tag whose tag name is "noscript", if the scripting flag
            // is enabled; A start tag whose tag name is one of: "noframes",
            // "style"": "Follow the generic raw text element parsing algorithm."
            Token::StartTag {
                tag: TagName::Noscript,
                ref name,
                ref attributes,
                ..
            } if self.scripting => {
                self.parse_text_only_element(name, attributes, TokenizerState::Rawtext);
                Step::Done
            }
            Token::StartTag {
                tag: TagName::Noframes | TagName::Style,
                ref name,
                ref attributes,
                ..
            } => {
                self.parse_text_only_element(name, attributes, TokenizerState::Rawtext);
                Step::Done
            }

            Token::StartTag {
                tag: TagName::Noscript,
                ref attributes,
                ..
            } => {
                let _ = self.insert_html_element("noscript", attributes);
                self.switch_to(InsertionMode::InHeadNoscript);
                Step::Done
            }

            // "Let the adjusted insertion location be the appropriate place
            // for inserting a node... Switch the tokenizer to the script data
            // state. Let the original insertion mode be the current insertion
            // mode. Switch the insertion mode to "text"."
            Token::StartTag {
                tag: TagName::Script,
                ref attributes,
                ..
            } => {
                self.parse_text_only_element("script", attributes, TokenizerState::ScriptData);
                Step::Done
            }

            Token::EndTag {
                tag: TagName::Head, ..
            } => {
                let _ = self.open_elements.pop();
                self.switch_to(InsertionMode::AfterHead);
                Step::Done
            }
            Token::EndTag {
                tag: TagName::Body | TagName::Html | TagName::Br,
                ..
            } => {
                self.pop_head_and_switch();
                Step::Reprocess(token)
            }

            Token::StartTag {
                tag: TagName::Template,
                ref attributes,
                ..
            } => {
                // "Insert an HTML element for the token. Insert a marker at
                // the end of the list of active formatting elements. Set the
                // frameset-ok flag to "not ok". Switch the insertion mode to
                // "in template". Push "in template" onto the stack of template
                // insertion modes..."
                let _ = self.insert_html_element("template", attributes);
                self.active_formatting.push_marker();
                self.frameset_ok = false;
                self.switch_to(InsertionMode::InTemplate);
                self.template_modes.push(InsertionMode::InTemplate);
                Step::Done
            }
            Token::EndTag {
                tag: TagName::Template,
                ..
            } => {
                self.close_template_element();
                Step::Done
            }

            Token::StartTag {
                tag: TagName::Head, ..
            } => {
                self.error(ParseErrorCode::MisplacedStartTagForHeadElement);
                Step::Done
            }
            Token::EndTag { .. } => {
                self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                Step::Done
            }

            _ => {
                self.pop_head_and_switch();
                Step::Reprocess(token)
            }
        }
    }

    /// "Pop the current node (which will be the head element) off the stack
    /// of open elements. Switch the insertion mode to "after head"."
    fn pop_head_and_switch(&mut self) {
        let _ = self.open_elements.pop();
        self.switch_to(InsertionMode::AfterHead);
    }

    /// The `</template>` end tag rules from "in head".
    pub(super) fn close_template_element(&mut self) {
        // "If there is no template element on the stack of open elements,
        // then this is a parse error; ignore the token."
        if self.open_elements.template_count() == 0 {
            self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
            return;
        }
        // STEP 1: "Generate all implied end tags thoroughly."
        self.open_elements.generate_all_implied_end_tags_thoroughly();
        // STEP 2: "If the current node is not a template element, then this is
        //          a parse error."
        if !self.open_elements.current_is(TagName::Template) {
            self.error(ParseErrorCode::ClosingOfElementWithOpenChildElements);
        }
        // STEP 3: "Pop elements from the stack of open elements until a
        //          template element has been popped from the stack."
        self.open_elements.pop_until(TagName::Template);
        // STEP 4: "Clear the list of active formatting elements up to the last marker."
        self.active_formatting.clear_to_last_marker();
        // STEP 5: "Pop the current template insertion mode off the stack of
        //          template insertion modes."
        let _ = self.template_modes.pop();
        // STEP 6: "Reset the insertion mode appropriately."
        self.reset_insertion_mode_appropriately();
    }

    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    pub(super) fn in_head_noscript(&mut self, token: Token) -> Step {
        match token {
            Token::Doctype { .. } => {
                self.error(ParseErrorCode::MisplacedDoctype);
                Step::Done
            }
            Token::StartTag {
                tag: TagName::Html, ..
            } => self.in_body(token),

            // "Pop the current node (which will be a noscript element) from
            // the stack of open elements; the new current node will be a head
            // element. Switch the insertion mode to "in head"."
            Token::EndTag {
                tag: TagName::Noscript,
                ..
            } => {
                let _ = self.open_elements.pop();
                self.switch_to(InsertionMode::InHead);
                Step::Done
            }

            Token::Character { .. } if token.is_whitespace_character() => self.in_head(token),
            Token::Comment { .. }
            | Token::StartTag {
                tag:
                    TagName::Basefont
                    | TagName::Bgsound
                    | TagName::Link
                    | TagName::Meta
                    | TagName::Noframes
                    | TagName::Style,
                ..
            } => self.in_head(token),

            Token::StartTag {
                tag: TagName::Head, ..
            } => {
                self.error(ParseErrorCode::MisplacedStartTagForHeadElement);
                Step::Done
            }
            Token::StartTag {
                tag: TagName::Noscript,
                ..
            } => {
                self.error(ParseErrorCode::NestedNoscriptInHead);
                Step::Done
            }
            Token::EndTag { tag, .. } if tag != TagName::Br => {
                self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                Step::Done
            }

            // "Parse error. Pop the current node (which will be a noscript
            // element) from the stack of open elements; the new current node
            // will be a head element. Switch the insertion mode to "in head".
            // Reprocess the token."
            _ => {
                self.error(ParseErrorCode::DisallowedContentInNoscriptInHead);
                let _ = self.open_elements.pop();
                self.switch_to(InsertionMode::InHead);
                Step::Reprocess(token)
            }
        }
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    pub(super) fn after_head(&mut self, token: Token) -> Step {
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
                tag: TagName::Body,
                ref attributes,
                ..
            } => {
                let _ = self.insert_html_element("body", attributes);
                self.frameset_ok = false;
                self.switch_to(InsertionMode::InBody);
                Step::Done
            }
            Token::StartTag {
                tag: TagName::Frameset,
                ref attributes,
                ..
            } => {
                let _ = self.insert_html_element("frameset", attributes);
                self.switch_to(InsertionMode::InFrameset);
                Step::Done
            }

            // "Parse error. Push the node pointed to by the head element
            // pointer onto the stack of open elements. Process the token using
            // the rules for the "in head" insertion mode. Remove the node
            // pointed to by the head element pointer from the stack of open
            // elements. (It might not be the current node at this point.)"
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
            } => {
                self.error(ParseErrorCode::AbandonedHeadElementChild);
                let Some(head) = self.head_element.clone() else {
                    return self.in_head(token);
                };
                let id = head.id;
                self.open_elements.push(head);
                let step = self.in_head(token);
                let _ = self.open_elements.remove(id);
                step
            }

            Token::EndTag {
                tag: TagName::Template,
                ..
            } => self.in_head(token),

            Token::StartTag {
                tag: TagName::Head, ..
            } => {
                self.error(ParseErrorCode::MisplacedStartTagForHeadElement);
                Step::Done
            }
            Token::EndTag { tag, .. }
                if !matches!(tag, TagName::Body | TagName::Html | TagName::Br) =>
            {
                self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                Step::Done
            }

            // "Insert an HTML element for a "body" start tag token with no
            // attributes. Switch the insertion mode to "in body". Reprocess
            // the current token."
            _ => {
                let _ = self.insert_html_element("body", &[]);
                self.switch_to(InsertionMode::InBody);
                Step::Reprocess(token)
            }
        }
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    pub(super) fn text(&mut self, token: Token) -> Step {
        match token {
            Token::Character { data } => {
                self.insert_character(data);
                Step::Done
            }
            // "Parse error. If the current node is a script element, then set
            // its already started to true. Pop the current node off the stack
            // of open elements. Switch the insertion mode to the original
            // insertion mode and reprocess the token."
            Token::EndOfFile => {
                self.error(ParseErrorCode::EofInElementThatCanOnlyContainText);
                let _ = self.open_elements.pop();
                self.switch_to(self.original_mode);
                Step::Reprocess(token)
            }
            Token::EndTag {
                tag: TagName::Script,
                ..
            } => {
                // The script is not run; the host can pick it up afterwards.
                if let Some(script) = self.open_elements.pop() {
                    self.pending_script = Some(script.handle);
                }
                self.switch_to(self.original_mode);
                Step::Done
            }
            _ => {
                let _ = self.open_elements.pop();
                self.switch_to(self.original_mode);
                Step::Done
            }
        }
    }
}
