//! The input stream.
//!
//! [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
//!
//! "Before the tokenization stage, the input stream must be preprocessed by
//! normalizing newlines. Thus, newlines in HTML DOMs are represented by U+000A
//! LF characters, and there are never any U+000D CR characters in the input to
//! the tokenization stage."

use bramble_common::Position;

use crate::error::ParseErrorCode;

/// Preprocessed characters plus a read cursor that tracks line and column.
#[derive(Debug, Clone)]
pub struct InputStream {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl InputStream {
    /// Normalize newlines and wrap the result.
    ///
    /// "To normalize newlines in a string, replace every U+000D CR U+000A LF
    /// code point pair with a single U+000A LF code point, and then replace
    /// every remaining U+000D CR code point with a U+000A LF code point."
    #[must_use]
    pub fn new(input: &str) -> Self {
        let mut chars = Vec::with_capacity(input.len());
        let mut iter = input.chars().peekable();
        while let Some(c) = iter.next() {
            if c == '\r' {
                let _ = iter.next_if_eq(&'\n');
                chars.push('\n');
            } else {
                chars.push(c);
            }
        }
        Self {
            chars,
            pos: 0,
            line: 1,
            col: 0,
        }
    }

    /// "Consume the next input character". `None` is EOF.
    pub fn consume(&mut self) -> Option<char> {
        let c = *self.chars.get(self.pos)?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    /// Look `offset` characters past the cursor without consuming.
    #[must_use]
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// "If the next few characters are..." (exact match).
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        target
            .chars()
            .enumerate()
            .all(|(i, expected)| self.peek(i) == Some(expected))
    }

    /// "...an ASCII case-insensitive match for the word..."
    #[must_use]
    pub fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        target
            .chars()
            .enumerate()
            .all(|(i, expected)| self.peek(i).is_some_and(|c| c.eq_ignore_ascii_case(&expected)))
    }

    /// Consume as many characters as `target` has. Callers check the match
    /// first with one of the `next_few_characters_are*` methods.
    pub fn consume_string(&mut self, target: &str) {
        for _ in target.chars() {
            let _ = self.consume();
        }
    }

    /// Line and column of the most recently consumed character.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }

    /// True once every character has been consumed.
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }
}

/// The input stream error a consumed character triggers, if any.
///
/// "Any occurrences of any characters in the ranges U+0001 to U+0008, U+000E
/// to U+001F, U+007F to U+009F ... are control-character-in-input-stream
/// parse errors." Noncharacters give noncharacter-in-input-stream. Surrogates
/// cannot occur in a Rust `str`.
#[must_use]
pub const fn input_stream_error(c: char) -> Option<ParseErrorCode> {
    if is_noncharacter(c as u32) {
        Some(ParseErrorCode::NoncharacterInInputStream)
    } else if is_control(c as u32) && !matches!(c, '\0' | '\t' | '\n' | '\x0C' | '\r' | ' ') {
        Some(ParseErrorCode::ControlCharacterInInputStream)
    } else {
        None
    }
}

/// [Infra: noncharacter](https://infra.spec.whatwg.org/#noncharacter)
#[must_use]
pub const fn is_noncharacter(code: u32) -> bool {
    matches!(code, 0xFDD0..=0xFDEF) || (code & 0xFFFE == 0xFFFE && code <= 0x10_FFFF)
}

/// [Infra: control](https://infra.spec.whatwg.org/#control), C0 controls
/// plus U+007F DELETE through U+009F.
#[must_use]
pub const fn is_control(code: u32) -> bool {
    matches!(code, 0x00..=0x1F | 0x7F..=0x9F)
}
