//! Parse errors.
//!
//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! "Certain points in the parsing algorithm are said to be parse errors. The
//! error handling for parse errors is well-defined."
//!
//! Parse errors are data, not failures: every one is followed by a recovery
//! action and parsing always runs to completion.

use std::fmt;

use bramble_common::Position;
use bramble_common::warning::warn_once;
use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Named parse errors.
///
/// Tokenizer errors use the names from the WHATWG table in § 13.2.2. Tree
/// construction errors, which the standard leaves unnamed, use the names
/// below the divider.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum ParseErrorCode {
    AbruptClosingOfEmptyComment,
    AbruptDoctypePublicIdentifier,
    AbruptDoctypeSystemIdentifier,
    AbsenceOfDigitsInNumericCharacterReference,
    CdataInHtmlContent,
    CharacterReferenceOutsideUnicodeRange,
    ControlCharacterInInputStream,
    ControlCharacterReference,
    DuplicateAttribute,
    EndTagWithAttributes,
    EndTagWithTrailingSolidus,
    EofBeforeTagName,
    EofInCdata,
    EofInComment,
    EofInDoctype,
    EofInScriptHtmlCommentLikeText,
    EofInTag,
    IncorrectlyClosedComment,
    IncorrectlyOpenedComment,
    InvalidCharacterSequenceAfterDoctypeName,
    InvalidFirstCharacterOfTagName,
    MissingAttributeValue,
    MissingDoctypeName,
    MissingDoctypePublicIdentifier,
    MissingDoctypeSystemIdentifier,
    MissingEndTagName,
    MissingQuoteBeforeDoctypePublicIdentifier,
    MissingQuoteBeforeDoctypeSystemIdentifier,
    MissingSemicolonAfterCharacterReference,
    MissingWhitespaceAfterDoctypePublicKeyword,
    MissingWhitespaceAfterDoctypeSystemKeyword,
    MissingWhitespaceBeforeDoctypeName,
    MissingWhitespaceBetweenAttributes,
    MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
    NestedComment,
    NoncharacterCharacterReference,
    NoncharacterInInputStream,
    NonVoidHtmlElementStartTagWithTrailingSolidus,
    NullCharacterReference,
    SurrogateCharacterReference,
    UnexpectedCharacterAfterDoctypeSystemIdentifier,
    UnexpectedCharacterInAttributeName,
    UnexpectedCharacterInUnquotedAttributeValue,
    UnexpectedEqualsSignBeforeAttributeName,
    UnexpectedNullCharacter,
    UnexpectedQuestionMarkInsteadOfTagName,
    UnexpectedSolidusInTag,
    UnknownNamedCharacterReference,

    // ---- tree construction ----
    MissingDoctype,
    NonConformingDoctype,
    MisplacedDoctype,
    EndTagWithoutMatchingOpenElement,
    ClosingOfElementWithOpenChildElements,
    DisallowedContentInNoscriptInHead,
    OpenElementsLeftAfterEof,
    AbandonedHeadElementChild,
    MisplacedStartTagForHeadElement,
    NestedNoscriptInHead,
    EofInElementThatCanOnlyContainText,
    EofInTemplate,
    EofInFrameset,
    UnexpectedStartTag,
    UnexpectedEndTag,
    UnexpectedCharacterToken,
    MisnestedTag,
    FosterParentedContent,
}

impl ParseErrorCode {
    /// The kebab-case error name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// One reported parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParseError {
    /// Which error.
    pub code: ParseErrorCode,
    /// Where in the input it was detected.
    pub position: Position,
}

impl ParseError {
    /// Create a parse error record.
    #[must_use]
    pub const fn new(code: ParseErrorCode, position: Position) -> Self {
        Self { code, position }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.code)
    }
}

/// Receives parse errors as they happen.
///
/// Reporting never influences parsing; a reporter may ignore, log or store
/// what it is given.
pub trait ErrorReporter {
    /// Called once per parse error, in input order.
    fn report(&mut self, code: ParseErrorCode, position: Position);
}

impl ErrorReporter for Vec<ParseError> {
    fn report(&mut self, code: ParseErrorCode, position: Position) {
        self.push(ParseError::new(code, position));
    }
}

/// Prints each distinct error once to stderr through the shared warning
/// system.
#[derive(Debug, Default)]
pub struct WarningReporter {
    seen: usize,
}

impl WarningReporter {
    /// A fresh reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self { seen: 0 }
    }

    /// Number of errors reported so far, duplicates included.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.seen
    }
}

impl ErrorReporter for WarningReporter {
    fn report(&mut self, code: ParseErrorCode, position: Position) {
        self.seen += 1;
        warn_once("HTML Parser", &ParseError::new(code, position).to_string());
    }
}
