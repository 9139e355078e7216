use super::Document;
use crate::error::{Result, RpnsheetError};
use crate::storage::parse_sheet_content;
use std::io::Read;
use std::path::Path;

const MAX_SHEET_FILE_BYTES: u64 = 64 * 1_048_576; // 64 MiB

impl Document {
    /// Load a sheet from a file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > MAX_SHEET_FILE_BYTES {
            return Err(RpnsheetError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "Refusing to read {}: sheet file too large ({} bytes, max {})",
                    path.display(),
                    meta.len(),
                    MAX_SHEET_FILE_BYTES
                ),
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let mut doc = parse_sheet_content(&content)?;
        doc.file_path = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Load a sheet from any reader, e.g. stdin.
    pub fn load_reader<R: Read>(reader: R) -> Result<Self> {
        let mut content = String::new();
        reader
            .take(MAX_SHEET_FILE_BYTES + 1)
            .read_to_string(&mut content)?;
        if content.len() as u64 > MAX_SHEET_FILE_BYTES {
            return Err(RpnsheetError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Refusing to read input larger than {} bytes", MAX_SHEET_FILE_BYTES),
            )));
        }
        parse_sheet_content(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{OutputOptions, write_values_content};

    #[test]
    fn test_load_reader_and_solve() {
        let input = "3 1\n5\nA1 3 +\nA2 2 *\n";
        let doc = Document::load_reader(input.as_bytes()).unwrap();
        assert!(doc.file_path.is_none());
        let solution = doc.solve().unwrap();
        let out = write_values_content(&solution.grid, &OutputOptions::default());
        assert_eq!(out, "5.00000\n8.00000\n16.00000\n");
    }

    #[test]
    fn test_cycle_in_loaded_sheet_fails_to_solve() {
        let input = "2 1\nA2\nA1\n";
        let doc = Document::load_reader(input.as_bytes()).unwrap();
        assert!(doc.solve().is_err());
    }

    #[test]
    fn test_load_reader_rejects_huge_header() {
        let err = Document::load_reader("100000000000 26\n1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, RpnsheetError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Document::load_file(Path::new("/nonexistent/sheet.txt")).unwrap_err();
        assert!(matches!(err, RpnsheetError::Io(_)));
    }
}
