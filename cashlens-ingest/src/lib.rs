//! cashlens-ingest: CSV statement tokenizing, field conversion, and validation.

pub mod fields;
pub mod parser;
pub mod tokenizer;

pub use parser::{parse_statement, ParsedStatement, REQUIRED_COLUMNS, SAMPLE_CSV};
pub use tokenizer::split_line;
