//! HTML tokenizer and tree builder.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Every tokenizer state, script data escapes and CDATA sections included
//!   - Named and numeric character references
//!   - The complete tokenizer parse error table
//!
//! - **Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - All 23 insertion modes and the rules for foreign content
//!   - Foster parenting, active formatting reconstruction and the adoption
//!     agency algorithm
//!   - Template contents and quirks mode detection
//!
//! The tree is built through [`bramble_dom::TreeSink`], so any host DOM can
//! be the target. Parse errors are reported, never fatal.
//!
//! # Not Implemented
//!
//! - The fragment parsing algorithm (`innerHTML`)
//! - Script execution and `document.write`
//! - Encoding sniffing; input is already a `&str`
//!
//! ```
//! let output = bramble_html::parse_document("<!DOCTYPE html><b>1<p>2</b>3</p>");
//! assert!(output.errors.len() > 0);
//! assert_eq!(output.quirks_mode, bramble_dom::QuirksMode::NoQuirks);
//! ```

/// Parser options and their loading.
pub mod config;
/// Parse error codes and reporters.
pub mod error;
/// HTML tree construction.
pub mod parser;
/// Debug printing of parsed trees.
pub mod print;
/// Tag name classification.
pub mod tag;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use config::{ConfigError, ParserConfig};
pub use error::{ErrorReporter, ParseError, ParseErrorCode, WarningReporter};
pub use parser::{
    InsertionMode, ParseOutput, Parser, TreeBuilder, parse_document, parse_document_with,
    parse_with_sink,
};
pub use print::{format_tree, print_tree};
pub use tag::TagName;
pub use tokenizer::{Attribute, HTMLTokenizer, Token, TokenizerState};
