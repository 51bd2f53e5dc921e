//! DOCTYPE states, [§ 13.2.5.53](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
//! through [§ 13.2.5.68](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state).

use crate::error::ParseErrorCode;

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::Token;

/// Which identifier a shared DOCTYPE state is reading.
#[derive(Clone, Copy)]
enum Identifier {
    Public,
    System,
}

impl HTMLTokenizer {
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(super) fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            // "Switch to the before DOCTYPE name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDoctypeName);
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "Reconsume in the before DOCTYPE name state."
            Some('>') => self.reconsume_in(TokenizerState::BeforeDoctypeName),
            // "EOF"
            // "This is an eof-in-doctype parse error. Create a new DOCTYPE
            // token. Set its force-quirks flag to on. Emit the current token.
            // Emit an end-of-file token."
            None => self.eof_in_doctype(),
            // "Anything else"
            // "This is a missing-whitespace-before-doctype-name parse error.
            // Reconsume in the before DOCTYPE name state."
            Some(_) => {
                self.parse_error(ParseErrorCode::MissingWhitespaceBeforeDoctypeName);
                self.reconsume_in(TokenizerState::BeforeDoctypeName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(super) fn handle_before_doctype_name_state(&mut self) {
        match self.current_input_character {
            // "Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+0000 NULL"
            // "This is an unexpected-null-character parse error. Create a new
            // DOCTYPE token. Set the token's name to a U+FFFD REPLACEMENT
            // CHARACTER character. Switch to the DOCTYPE name state."
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                self.start_doctype_name('\u{FFFD}');
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "This is a missing-doctype-name parse error. Create a new
            // DOCTYPE token. Set its force-quirks flag to on. Switch to the
            // data state. Emit the current token."
            Some('>') => {
                self.parse_error(ParseErrorCode::MissingDoctypeName);
                let mut token = Token::new_doctype();
                token.set_force_quirks();
                self.current_token = Some(token);
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.eof_in_doctype(),
            // "ASCII upper alpha"
            // "Create a new DOCTYPE token. Set the token's name to the
            // lowercase version of the current input character."
            // "Anything else"
            // "Create a new DOCTYPE token. Set the token's name to the current
            // input character. Switch to the DOCTYPE name state."
            Some(c) => self.start_doctype_name(c.to_ascii_lowercase()),
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(super) fn handle_doctype_name_state(&mut self) {
        match self.current_input_character {
            // "Switch to the after DOCTYPE name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterDoctypeName);
            }
            // "Switch to the data state. Emit the current DOCTYPE token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                if let Some(ref mut token) = self.current_token {
                    token.append_to_doctype_name('\u{FFFD}');
                }
            }
            None => self.eof_in_doctype(),
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_doctype_name(c.to_ascii_lowercase());
                }
            }
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    pub(super) fn handle_after_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.eof_in_doctype(),
            Some(c) => {
                // "If the six characters starting from the current input
                // character are an ASCII case-insensitive match for the word
                // "PUBLIC", then consume those characters and switch to the
                // after DOCTYPE public keyword state."
                if c.eq_ignore_ascii_case(&'p')
                    && self.consume_if_next_are_case_insensitive("UBLIC")
                {
                    self.switch_to(TokenizerState::AfterDoctypePublicKeyword);
                }
                // "Otherwise, if the six characters starting from the current
                // input character are an ASCII case-insensitive match for the
                // word "SYSTEM", then consume those characters and switch to
                // the after DOCTYPE system keyword state."
                else if c.eq_ignore_ascii_case(&'s')
                    && self.consume_if_next_are_case_insensitive("YSTEM")
                {
                    self.switch_to(TokenizerState::AfterDoctypeSystemKeyword);
                }
                // "Otherwise, this is an
                // invalid-character-sequence-after-doctype-name parse error.
                // Set the current DOCTYPE token's force-quirks flag to on.
                // Reconsume in the bogus DOCTYPE state."
                else {
                    self.parse_error(ParseErrorCode::InvalidCharacterSequenceAfterDoctypeName);
                    self.force_quirks();
                    self.reconsume_in(TokenizerState::BogusDoctype);
                }
            }
        }
    }

    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    pub(super) fn handle_after_doctype_public_keyword_state(&mut self) {
        self.handle_after_doctype_keyword(Identifier::Public);
    }

    /// [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    pub(super) fn handle_after_doctype_system_keyword_state(&mut self) {
        self.handle_after_doctype_keyword(Identifier::System);
    }

    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    pub(super) fn handle_before_doctype_public_identifier_state(&mut self) {
        self.handle_before_doctype_identifier(Identifier::Public);
    }

    /// [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    pub(super) fn handle_before_doctype_system_identifier_state(&mut self) {
        self.handle_before_doctype_identifier(Identifier::System);
    }

    /// [§ 13.2.5.59](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    /// and [§ 13.2.5.60](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(single-quoted)-state)
    /// DOCTYPE public identifier (quoted) states.
    pub(super) fn handle_doctype_public_identifier_quoted_state(&mut self, quote: char) {
        self.handle_doctype_identifier_quoted(Identifier::Public, quote);
    }

    /// [§ 13.2.5.65](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(double-quoted)-state)
    /// and [§ 13.2.5.66](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(single-quoted)-state)
    /// DOCTYPE system identifier (quoted) states.
    pub(super) fn handle_doctype_system_identifier_quoted_state(&mut self, quote: char) {
        self.handle_doctype_identifier_quoted(Identifier::System, quote);
    }

    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    pub(super) fn handle_after_doctype_public_identifier_state(&mut self) {
        match self.current_input_character {
            // "Switch to the between DOCTYPE public and system identifiers state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BetweenDoctypePublicAndSystemIdentifiers);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "This is a
            // missing-whitespace-between-doctype-public-and-system-identifiers
            // parse error. Set the DOCTYPE token's system identifier to the
            // empty string (not missing), then switch to the DOCTYPE system
            // identifier (double-quoted) state."
            Some(quote @ ('"' | '\'')) => {
                self.parse_error(
                    ParseErrorCode::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
                );
                self.begin_identifier(Identifier::System, quote);
            }
            None => self.eof_in_doctype(),
            Some(_) => self.missing_quote_before_identifier(Identifier::System),
        }
    }

    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    pub(super) fn handle_between_doctype_public_and_system_identifiers_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some(quote @ ('"' | '\'')) => self.begin_identifier(Identifier::System, quote),
            None => self.eof_in_doctype(),
            Some(_) => self.missing_quote_before_identifier(Identifier::System),
        }
    }

    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    pub(super) fn handle_after_doctype_system_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.eof_in_doctype(),
            // "This is an unexpected-character-after-doctype-system-identifier
            // parse error. Reconsume in the bogus DOCTYPE state. (This does
            // not set the DOCTYPE token's force-quirks flag to on.)"
            Some(_) => {
                self.parse_error(ParseErrorCode::UnexpectedCharacterAfterDoctypeSystemIdentifier);
                self.reconsume_in(TokenizerState::BogusDoctype);
            }
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(super) fn handle_bogus_doctype_state(&mut self) {
        match self.current_input_character {
            // "Switch to the data state. Emit the DOCTYPE token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            // "This is an unexpected-null-character parse error. Ignore the character."
            Some('\0') => self.parse_error(ParseErrorCode::UnexpectedNullCharacter),
            // "Emit the DOCTYPE token. Emit an end-of-file token."
            None => {
                self.emit_token();
                self.emit_eof_token();
            }
            Some(_) => {}
        }
    }

    fn handle_after_doctype_keyword(&mut self, which: Identifier) {
        match self.current_input_character {
            // "Switch to the before DOCTYPE [public|system] identifier state."
            Some(c) if Self::is_whitespace_char(c) => match which {
                Identifier::Public => self.switch_to(TokenizerState::BeforeDoctypePublicIdentifier),
                Identifier::System => self.switch_to(TokenizerState::BeforeDoctypeSystemIdentifier),
            },
            // "This is a missing-whitespace-after-doctype-[public|system]-keyword
            // parse error. Set the DOCTYPE token's identifier to the empty
            // string (not missing), then switch to the quoted state."
            Some(quote @ ('"' | '\'')) => {
                self.parse_error(match which {
                    Identifier::Public => ParseErrorCode::MissingWhitespaceAfterDoctypePublicKeyword,
                    Identifier::System => ParseErrorCode::MissingWhitespaceAfterDoctypeSystemKeyword,
                });
                self.begin_identifier(which, quote);
            }
            Some('>') => self.missing_identifier(which),
            None => self.eof_in_doctype(),
            Some(_) => self.missing_quote_before_identifier(which),
        }
    }

    fn handle_before_doctype_identifier(&mut self, which: Identifier) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some(quote @ ('"' | '\'')) => self.begin_identifier(which, quote),
            Some('>') => self.missing_identifier(which),
            None => self.eof_in_doctype(),
            Some(_) => self.missing_quote_before_identifier(which),
        }
    }

    fn handle_doctype_identifier_quoted(&mut self, which: Identifier, quote: char) {
        match self.current_input_character {
            // "Switch to the after DOCTYPE [public|system] identifier state."
            Some(c) if c == quote => match which {
                Identifier::Public => self.switch_to(TokenizerState::AfterDoctypePublicIdentifier),
                Identifier::System => self.switch_to(TokenizerState::AfterDoctypeSystemIdentifier),
            },
            Some('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedNullCharacter);
                self.append_to_identifier(which, '\u{FFFD}');
            }
            // "This is an abrupt-doctype-[public|system]-identifier parse
            // error. Set the current DOCTYPE token's force-quirks flag to on.
            // Switch to the data state. Emit the current DOCTYPE token."
            Some('>') => {
                self.parse_error(match which {
                    Identifier::Public => ParseErrorCode::AbruptDoctypePublicIdentifier,
                    Identifier::System => ParseErrorCode::AbruptDoctypeSystemIdentifier,
                });
                self.force_quirks();
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => self.eof_in_doctype(),
            Some(c) => self.append_to_identifier(which, c),
        }
    }

    fn begin_identifier(&mut self, which: Identifier, quote: char) {
        if let Some(ref mut token) = self.current_token {
            match which {
                Identifier::Public => token.set_public_identifier_empty(),
                Identifier::System => token.set_system_identifier_empty(),
            }
        }
        let next = match (which, quote) {
            (Identifier::Public, '"') => TokenizerState::DoctypePublicIdentifierDoubleQuoted,
            (Identifier::Public, _) => TokenizerState::DoctypePublicIdentifierSingleQuoted,
            (Identifier::System, '"') => TokenizerState::DoctypeSystemIdentifierDoubleQuoted,
            (Identifier::System, _) => TokenizerState::DoctypeSystemIdentifierSingleQuoted,
        };
        self.switch_to(next);
    }

    fn append_to_identifier(&mut self, which: Identifier, c: char) {
        if let Some(ref mut token) = self.current_token {
            match which {
                Identifier::Public => token.append_to_public_identifier(c),
                Identifier::System => token.append_to_system_identifier(c),
            }
        }
    }

    /// "This is a missing-doctype-[public|system]-identifier parse error. Set
    /// the current DOCTYPE token's force-quirks flag to on. Switch to the data
    /// state. Emit the current DOCTYPE token."
    fn missing_identifier(&mut self, which: Identifier) {
        self.parse_error(match which {
            Identifier::Public => ParseErrorCode::MissingDoctypePublicIdentifier,
            Identifier::System => ParseErrorCode::MissingDoctypeSystemIdentifier,
        });
        self.force_quirks();
        self.switch_to(TokenizerState::Data);
        self.emit_token();
    }

    /// "This is a missing-quote-before-doctype-[public|system]-identifier parse
    /// error. Set the current DOCTYPE token's force-quirks flag to on.
    /// Reconsume in the bogus DOCTYPE state."
    fn missing_quote_before_identifier(&mut self, which: Identifier) {
        self.parse_error(match which {
            Identifier::Public => ParseErrorCode::MissingQuoteBeforeDoctypePublicIdentifier,
            Identifier::System => ParseErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier,
        });
        self.force_quirks();
        self.reconsume_in(TokenizerState::BogusDoctype);
    }

    fn start_doctype_name(&mut self, first: char) {
        let mut token = Token::new_doctype();
        token.append_to_doctype_name(first);
        self.current_token = Some(token);
        self.switch_to(TokenizerState::DoctypeName);
    }

    fn force_quirks(&mut self) {
        if let Some(ref mut token) = self.current_token {
            token.set_force_quirks();
        }
    }

    /// "This is an eof-in-doctype parse error. Set the current DOCTYPE token's
    /// force-quirks flag to on. Emit the current DOCTYPE token. Emit an
    /// end-of-file token."
    fn eof_in_doctype(&mut self) {
        self.parse_error(ParseErrorCode::EofInDoctype);
        let mut token = self.current_token.take().unwrap_or_else(Token::new_doctype);
        token.set_force_quirks();
        self.current_token = Some(token);
        self.emit_token();
        self.emit_eof_token();
    }
}
