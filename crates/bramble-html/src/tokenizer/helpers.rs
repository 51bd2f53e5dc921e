//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling ("Consume the next input character")
//! - Token emission ("Emit the current token")
//! - End tag name helpers for the text-like states
//! - Attribute helpers for duplicate detection

use crate::error::{ParseError, ParseErrorCode};

use super::core::{HTMLTokenizer, TokenizerState};
use super::input::input_stream_error;
use super::token::Token;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next iteration of the main
    /// loop.
    pub(super) fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The same character will be processed again in the new state.
    pub(super) fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// Reconsume in whatever state the character reference began in.
    pub(super) fn reconsume_in_return_state(&mut self) {
        self.reconsume_in(self.return_state);
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Consume the next input character"
    ///
    /// Reports control characters and noncharacters as they are read.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input.consume()?;
        if let Some(code) = input_stream_error(c) {
            self.parse_error(code);
        }
        Some(c)
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// "If the next few characters are..." followed by "Consume those characters".
    pub(super) fn consume_if_next_are(&mut self, target: &str) -> bool {
        if self.input.next_few_characters_are(target) {
            self.input.consume_string(target);
            true
        } else {
            false
        }
    }

    /// ASCII case-insensitive variant of [`Self::consume_if_next_are`].
    pub(super) fn consume_if_next_are_case_insensitive(&mut self, target: &str) -> bool {
        if self.input.next_few_characters_are_case_insensitive(target) {
            self.input.consume_string(target);
            true
        } else {
            false
        }
    }

    /// "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF),
    /// U+000C FORM FEED (FF), U+0020 SPACE"
    ///
    /// CR never reaches the tokenizer; preprocessing turns it into LF.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Emit the current token"
    pub(super) fn emit_token(&mut self) {
        self.discard_duplicate_attribute();
        let Some(mut token) = self.current_token.take() else {
            return;
        };
        token.classify();
        match &token {
            Token::StartTag { name, .. } => {
                // "The last start tag token emitted is used as part of the
                // tree construction stage and in the RCDATA, RAWTEXT, and
                // script data states."
                self.last_start_tag_name = Some(name.clone());
            }
            Token::EndTag { attributes, .. } => {
                // "When an end tag token is emitted with attributes, that is an
                // end-tag-with-attributes parse error."
                if !attributes.is_empty() {
                    self.parse_error(ParseErrorCode::EndTagWithAttributes);
                }
            }
            _ => {}
        }
        self.emit(token);
    }

    /// "Emit the current input character as a character token."
    pub(super) fn emit_character_token(&mut self, c: char) {
        self.emit(Token::Character { data: c });
    }

    /// Emit every character of `text` as character tokens.
    pub(super) fn emit_characters(&mut self, text: &str) {
        for c in text.chars() {
            self.emit_character_token(c);
        }
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof_token(&mut self) {
        self.emit(Token::EndOfFile);
    }

    fn emit(&mut self, token: Token) {
        log::trace!(target: "bramble::tokenizer", "emit {token} in {}", self.state);
        self.pending.push_back(token);
    }
}

// =============================================================================
// End Tag Name Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        if let (Some(last_start_tag), Some(Token::EndTag { name, .. })) =
            (&self.last_start_tag_name, &self.current_token)
        {
            return name == last_start_tag;
        }
        false
    }

    /// The shared body of the RCDATA, RAWTEXT, script data and script data
    /// escaped end tag name states.
    ///
    /// `text_state` is the state the "anything else" branch reconsumes in.
    pub(super) fn handle_end_tag_name(&mut self, text_state: TokenizerState) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab)", "U+000A LINE FEED (LF)",
            // "U+000C FORM FEED (FF)", "U+0020 SPACE"
            // "If the current end tag token is an appropriate end tag token,
            // then switch to the before attribute name state."
            Some(c) if Self::is_whitespace_char(c) && self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "U+002F SOLIDUS (/)"
            // "If the current end tag token is an appropriate end tag token,
            // then switch to the self-closing start tag state."
            Some('/') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "If the current end tag token is an appropriate end tag token,
            // then switch to the data state and emit the current tag token."
            Some('>') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "ASCII upper alpha"
            // "Append the lowercase version of the current input character
            // to the current tag token's tag name. Append the current input
            // character to the temporary buffer."
            Some(c) if c.is_ascii_alphabetic() => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_tag_name(c.to_ascii_lowercase());
                }
                self.temporary_buffer.push(c);
            }
            // "Anything else"
            // "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS
            // character token, and a character token for each of the
            // characters in the temporary buffer (in the order they were added
            // to the buffer). Reconsume in the [text] state."
            _ => {
                self.emit_character_token('<');
                self.emit_character_token('/');
                let buffer = std::mem::take(&mut self.temporary_buffer);
                self.emit_characters(&buffer);
                self.current_token = None;
                self.reconsume_in(text_state);
            }
        }
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "When the user agent leaves the attribute name state (and before
    /// emitting the tag token, if appropriate), the complete attribute's name
    /// must be compared to the other attributes on the same token; if there is
    /// already an attribute on the token with the exact same name, then this
    /// is a duplicate-attribute parse error and the new attribute must be
    /// removed from the token."
    ///
    /// The duplicate stays on the token until its value is read, so the value
    /// cannot leak into the earlier attribute; it is dropped when the next
    /// attribute starts or the token is emitted.
    pub(super) fn check_duplicate_attribute(&mut self) {
        let is_duplicate = self
            .current_token
            .as_ref()
            .is_some_and(Token::current_attribute_name_is_duplicate);
        if is_duplicate {
            self.parse_error(ParseErrorCode::DuplicateAttribute);
            self.current_attribute_is_duplicate = true;
        }
    }

    /// "Start a new attribute in the current tag token."
    pub(super) fn start_new_attribute(&mut self) {
        self.discard_duplicate_attribute();
        if let Some(ref mut token) = self.current_token {
            token.start_new_attribute();
        }
    }

    fn discard_duplicate_attribute(&mut self) {
        if std::mem::take(&mut self.current_attribute_is_duplicate)
            && let Some(ref mut token) = self.current_token
        {
            token.remove_current_attribute();
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Records a parse error at the current input position. The parser drains
    /// these after every token.
    pub(super) fn parse_error(&mut self, code: ParseErrorCode) {
        let position = self.input.position();
        log::trace!(target: "bramble::tokenizer", "parse error {code} at {position}");
        self.errors.push(ParseError::new(code, position));
    }
}
