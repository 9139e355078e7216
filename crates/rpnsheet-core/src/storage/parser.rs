//! Parser for the line-oriented sheet format.
//!
//! ```text
//! 3 2
//! 5
//! A1 3 +
//! ...
//! ```
//!
//! The first line holds `x_dim y_dim`; each of the next `x_dim * y_dim` lines
//! is one cell expression, in scan order.

use crate::document::Document;
use crate::error::{Result, RpnsheetError};
use rpnsheet_engine::engine::Dimensions;

/// Parse sheet content from a string
pub fn parse_sheet_content(content: &str) -> Result<Document> {
    let mut lines = content.lines().enumerate().skip_while(|(_, l)| l.trim().is_empty());

    let Some((header_idx, header)) = lines.next() else {
        return Err(RpnsheetError::Parse {
            line: 1,
            message: "Missing 'x_dim y_dim' header".to_string(),
        });
    };
    let dims = parse_header(header, header_idx + 1)?;

    // The header is untrusted; grow with the lines actually present.
    let mut expressions: Vec<Vec<String>> = Vec::new();
    let mut last_line = header_idx + 1;
    for (line_idx, line) in lines.by_ref().take(dims.len()) {
        expressions.push(line.split_whitespace().map(str::to_string).collect());
        last_line = line_idx + 1;
    }

    if expressions.len() < dims.len() {
        return Err(RpnsheetError::Parse {
            line: last_line + 1,
            message: format!(
                "Expected {} cell expressions, found {}",
                dims.len(),
                expressions.len()
            ),
        });
    }

    if let Some((line_idx, _)) = lines.find(|(_, l)| !l.trim().is_empty()) {
        return Err(RpnsheetError::Parse {
            line: line_idx + 1,
            message: format!("Unexpected content after {} cell expressions", dims.len()),
        });
    }

    log::debug!(
        "parsed {}x{} sheet ({} cells)",
        dims.x_dim(),
        dims.y_dim(),
        expressions.len()
    );
    Document::new(dims, expressions)
}

fn parse_header(header: &str, line: usize) -> Result<Dimensions> {
    let parse_error = || RpnsheetError::Parse {
        line,
        message: format!("Expected 'x_dim y_dim', got '{}'", header.trim()),
    };

    let parts: Vec<&str> = header.split_whitespace().collect();
    let [x_dim, y_dim] = parts.as_slice() else {
        return Err(parse_error());
    };
    let x_dim = x_dim.parse::<usize>().map_err(|_| parse_error())?;
    let y_dim = y_dim.parse::<usize>().map_err(|_| parse_error())?;

    Ok(Dimensions::new(x_dim, y_dim)?)
}
