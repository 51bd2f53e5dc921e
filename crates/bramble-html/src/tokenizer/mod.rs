//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard.

mod character_reference;
mod comment;
mod doctype;
mod helpers;
mod script;

/// HTML tokenizer state machine implementation.
pub mod core;
/// Newline normalization and position tracking.
pub mod input;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
/// Token types produced by the tokenizer.
pub mod token;

pub use core::{HTMLTokenizer, TokenizerState};
pub use token::{Attribute, Token};
