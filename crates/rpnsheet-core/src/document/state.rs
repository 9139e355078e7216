use crate::error::Result;
use rpnsheet_engine::engine::{Dimensions, EngineError, Sheet, Solution};
use std::path::PathBuf;

/// UI-agnostic document state: a parsed sheet waiting to be solved.
///
/// Solving never mutates the document, so the same document can be solved
/// any number of times with identical results.
#[derive(Clone, Debug)]
pub struct Document {
    dims: Dimensions,
    /// Raw tokens per cell, in scan order
    expressions: Vec<Vec<String>>,
    /// File the document was loaded from, if any
    pub file_path: Option<PathBuf>,
}

impl Document {
    /// Create a document from raw token lists in scan order.
    pub fn new(dims: Dimensions, expressions: Vec<Vec<String>>) -> Result<Self> {
        if expressions.len() != dims.len() {
            return Err(EngineError::CellCountMismatch {
                expected: dims.len(),
                found: expressions.len(),
            }
            .into());
        }
        Ok(Document {
            dims,
            expressions,
            file_path: None,
        })
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn expressions(&self) -> &[Vec<String>] {
        &self.expressions
    }

    /// Resolve every cell. Fails as a whole; no partial grid is returned.
    pub fn solve(&self) -> Result<Solution> {
        let sheet = Sheet::new(self.dims, &self.expressions)?;
        let solution = sheet.solve()?;
        log::info!(
            "solved {} cells in {} passes",
            self.dims.len(),
            solution.passes
        );
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RpnsheetError;

    fn doc(x_dim: usize, y_dim: usize, exprs: &[&str]) -> Document {
        let expressions = exprs
            .iter()
            .map(|e| e.split_whitespace().map(str::to_string).collect())
            .collect();
        Document::new(Dimensions::new(x_dim, y_dim).unwrap(), expressions).unwrap()
    }

    #[test]
    fn test_solve_twice_is_identical() {
        let doc = doc(1, 3, &["5", "A1 3 +", "B1 2 *"]);
        let first = doc.solve().unwrap();
        let second = doc.solve().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.grid.get_name("C1"), Some(16.0));
    }

    #[test]
    fn test_cycle_is_reported_as_unresolved() {
        let doc = doc(1, 2, &["B1", "A1"]);
        let err = doc.solve().unwrap_err();
        assert!(err.is_unresolved());
        assert_eq!(
            err.to_string(),
            "Circular dependency between cells A1, B1 (cycle: A1 -> B1 -> A1)"
        );
    }

    #[test]
    fn test_wrong_cell_count() {
        let err = Document::new(Dimensions::new(2, 2).unwrap(), vec![vec!["1".to_string()]])
            .unwrap_err();
        assert!(matches!(
            err,
            RpnsheetError::Engine(EngineError::CellCountMismatch { expected: 4, found: 1 })
        ));
    }
}
