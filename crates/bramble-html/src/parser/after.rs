//! Insertion modes that run once the body or frameset has been closed, plus
//! "in frameset".

use bramble_dom::TreeSink;

use super::tree_builder::{InsertionMode, Step, TreeBuilder};
use crate::error::ParseErrorCode;
use crate::tag::TagName;
use crate::tokenizer::Token;

impl<S: TreeSink> TreeBuilder<S> {
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    pub(super) fn after_body(&mut self, token: Token) -> Step {
        match token {
            Token::Character { .. } if token.is_whitespace_character() => self.in_body(token),
            // "Insert a comment as the last child of the first element in the
            // stack of open elements (the html element)."
            Token::Comment { data } => {
                if let Some(html) = self.open_elements.get(0).map(|element| element.handle.clone()) {
                    self.append_comment_to(&html, &data);
                }
                Step::Done
            }
            Token::Doctype { .. } => {
                self.error(ParseErrorCode::MisplacedDoctype);
                Step::Done
            }
            Token::StartTag {
                tag: TagName::Html, ..
            } => self.in_body(token),
            Token::EndTag {
                tag: TagName::Html, ..
            } => {
                self.switch_to(InsertionMode::AfterAfterBody);
                Step::Done
            }
            Token::EndOfFile => {
                self.stop_parsing();
                Step::Done
            }
            // "Parse error. Switch the insertion mode to "in body" and
            // reprocess the token."
            _ => {
                self.error(ParseErrorCode::UnexpectedCharacterToken);
                self.switch_to(InsertionMode::InBody);
                Step::Reprocess(token)
            }
        }
    }

    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    pub(super) fn in_frameset(&mut self, token: Token) -> Step {
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
                tag: TagName::Frameset,
                ref attributes,
                ..
            } => {
                let _ = self.insert_html_element("frameset", attributes);
                Step::Done
            }
            // "If the current node is the root html element, then this is a
            // parse error; ignore the token. (fragment case) Otherwise, pop the
            // current node from the stack of open elements. If the parser was
            // not created as part of the HTML fragment parsing algorithm
            // (fragment case), and the current node is no longer a frameset
            // element, then switch the insertion mode to "after frameset"."
            Token::EndTag {
                tag: TagName::Frameset,
                ..
            } => {
                if self.open_elements.len() <= 1 {
                    self.error(ParseErrorCode::EndTagWithoutMatchingOpenElement);
                    return Step::Done;
                }
                let _ = self.open_elements.pop();
                if !self.open_elements.current_is(TagName::Frameset) {
                    self.switch_to(InsertionMode::AfterFrameset);
                }
                Step::Done
            }
            Token::StartTag {
                tag: TagName::Frame,
                ref attributes,
                ..
            } => {
                let _ = self.insert_html_element("frame", attributes);
                let _ = self.open_elements.pop();
                self.acknowledge_self_closing();
                Step::Done
            }
            Token::StartTag {
                tag: TagName::Noframes,
                ..
            } => self.in_head(token),
            Token::EndOfFile => {
                if self.open_elements.len() > 1 {
                    self.error(ParseErrorCode::EofInFrameset);
                }
                self.stop_parsing();
                Step::Done
            }
            _ => {
                self.error(ParseErrorCode::UnexpectedCharacterToken);
                Step::Done
            }
        }
    }

    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    pub(super) fn after_frameset(&mut self, token: Token) -> Step {
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
            Token::EndTag {
                tag: TagName::Html, ..
            } => {
                self.switch_to(InsertionMode::AfterAfterFrameset);
                Step::Done
            }
            Token::StartTag {
                tag: TagName::Noframes,
                ..
            } => self.in_head(token),
            Token::EndOfFile => {
                self.stop_parsing();
                Step::Done
            }
            _ => {
                self.error(ParseErrorCode::UnexpectedCharacterToken);
                Step::Done
            }
        }
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    pub(super) fn after_after_body(&mut self, token: Token) -> Step {
        match token {
            Token::Comment { data } => {
                let document = self.sink.document();
                self.append_comment_to(&document, &data);
                Step::Done
            }
            Token::Doctype { .. }
            | Token::StartTag {
                tag: TagName::Html, ..
            } => self.in_body(token),
            Token::Character { .. } if token.is_whitespace_character() => self.in_body(token),
            Token::EndOfFile => {
                self.stop_parsing();
                Step::Done
            }
            _ => {
                self.error(ParseErrorCode::UnexpectedCharacterToken);
                self.switch_to(InsertionMode::InBody);
                Step::Reprocess(token)
            }
        }
    }

    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    pub(super) fn after_after_frameset(&mut self, token: Token) -> Step {
        match token {
            Token::Comment { data } => {
                let document = self.sink.document();
                self.append_comment_to(&document, &data);
                Step::Done
            }
            Token::Doctype { .. }
            | Token::StartTag {
                tag: TagName::Html, ..
            } => self.in_body(token),
            Token::Character { .. } if token.is_whitespace_character() => self.in_body(token),
            Token::StartTag {
                tag: TagName::Noframes,
                ..
            } => self.in_head(token),
            Token::EndOfFile => {
                self.stop_parsing();
                Step::Done
            }
            _ => {
                self.error(ParseErrorCode::UnexpectedCharacterToken);
                Step::Done
            }
        }
    }
}
