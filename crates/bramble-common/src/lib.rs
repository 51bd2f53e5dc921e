//! Common utilities for the bramble parser.
//!
//! This crate provides shared infrastructure used by the other crates:
//! - **Source positions** - line/column locations attached to parse errors
//! - **Warning System** - colored, deduplicated terminal output

pub mod position;
pub mod warning;

pub use position::Position;
