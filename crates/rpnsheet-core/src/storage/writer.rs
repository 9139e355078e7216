//! Writer for solved values

use crate::error::Result;
use rpnsheet_engine::engine::{ValueGrid, format_number};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Digits after the decimal point unless configured otherwise.
pub const DEFAULT_PRECISION: usize = 5;

/// Layout of the written values.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// One value per line, row-major.
    #[default]
    Lines,
    /// One row per line under a `Print Spreadsheet:` header.
    Table,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OutputOptions {
    pub style: OutputStyle,
    pub precision: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        OutputOptions {
            style: OutputStyle::default(),
            precision: DEFAULT_PRECISION,
        }
    }
}

/// Write solved values to a file
pub fn write_values(path: &Path, grid: &ValueGrid, options: &OutputOptions) -> Result<()> {
    let content = write_values_content(grid, options);
    fs::write(path, content)?;
    Ok(())
}

/// Render solved values as text
pub fn write_values_content(grid: &ValueGrid, options: &OutputOptions) -> String {
    let mut out = String::new();
    match options.style {
        OutputStyle::Lines => {
            for (_, value) in grid.iter() {
                out.push_str(&format_number(value, options.precision));
                out.push('\n');
            }
        }
        OutputStyle::Table => {
            out.push_str("Print Spreadsheet:\n");
            for row in grid.rows() {
                out.push_str("    ");
                for value in row {
                    out.push_str(&format_number(value, options.precision));
                    out.push(' ');
                }
                out.push('\n');
            }
        }
    }
    out
}
