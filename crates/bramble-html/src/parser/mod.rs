//! Tree construction.
//!
//! [`TreeBuilder`] owns the insertion modes and the two element stacks;
//! [`Parser`] pulls tokens from the tokenizer and feeds them in.

mod adoption;
mod after;
mod body;
mod driver;
mod foreign_content;
mod formatting;
mod head;
mod open_elements;
pub mod quirks;
mod select;
mod table;
mod template;
mod tree_builder;

pub use driver::{ParseOutput, Parser, parse_document, parse_document_with, parse_with_sink};
pub use tree_builder::{InsertionMode, Step, TreeBuilder};
