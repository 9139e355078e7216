//! Storage module for the line-oriented sheet format and value output

mod parser;
mod writer;

pub use parser::parse_sheet_content;
pub use writer::{OutputOptions, OutputStyle, write_values, write_values_content};
