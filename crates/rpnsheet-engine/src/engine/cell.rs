//! Cell data structures for the solver.
//!
//! This module provides:
//! - [`Cell`] - One grid position with its mutable token buffer and result
//! - [`Registry`] - Name to arena index lookup, built once per sheet
//! - [`ResolvedView`] - Read-only view of which peers are resolved, used during a pass

use std::collections::HashMap;

use super::cell_ref::CellRef;
use super::error::{EngineError, Result};
use super::rpn::{self, Token};

/// A cell in the grid.
#[derive(Clone, Debug)]
pub struct Cell {
    pub pos: CellRef,
    pub name: String,
    tokens: Vec<Token>,
    resolved: bool,
    value: Option<f64>,
}

impl Cell {
    pub fn new(pos: CellRef, tokens: Vec<Token>) -> Cell {
        Cell {
            pos,
            name: pos.name(),
            tokens,
            resolved: false,
            value: None,
        }
    }

    /// Create a cell from raw whitespace-separated tokens.
    pub fn from_raw<S: AsRef<str>>(pos: CellRef, raw: &[S]) -> Cell {
        Cell::new(pos, raw.iter().map(|t| Token::parse(t.as_ref())).collect())
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// References still waiting on another cell.
    pub fn pending_refs(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|t| match t {
            Token::Ref(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// The current (possibly partially substituted) expression as text.
    pub fn expression(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Substitute every reference whose target is resolved in `view`, then
    /// evaluate if nothing is left pending.
    ///
    /// Returns whether the cell is resolved after this attempt. Substitutions
    /// are kept even when other references are still pending.
    pub fn try_evaluate(&mut self, view: &ResolvedView<'_>) -> Result<bool> {
        self.resolved = false;
        let mut pending = false;

        for token in self.tokens.iter_mut() {
            let Token::Ref(name) = token else {
                continue;
            };
            if *name == self.name {
                return Err(EngineError::SelfReference {
                    cell: self.name.clone(),
                });
            }
            match view.lookup(name) {
                Lookup::Resolved(value) => {
                    log::trace!("{}: {} -> {}", self.name, name, value);
                    *token = Token::Number(value);
                }
                Lookup::Pending | Lookup::Unknown => pending = true,
            }
        }

        if pending {
            return Ok(false);
        }

        let value =
            rpn::evaluate(&self.tokens).map_err(|source| EngineError::MalformedExpression {
                cell: self.name.clone(),
                source,
            })?;
        self.value = Some(value);
        self.resolved = true;
        Ok(true)
    }
}

/// Maps cell names to their index in the sheet's cell arena.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    names: HashMap<String, usize>,
}

impl Registry {
    pub fn build<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Registry {
        let names = cells
            .into_iter()
            .enumerate()
            .map(|(index, cell)| (cell.name.clone(), index))
            .collect();
        Registry { names }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }
}

/// Outcome of looking a reference up in a [`ResolvedView`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Lookup {
    Resolved(f64),
    Pending,
    Unknown,
}

/// Resolved values of every cell as of the start of a pass.
pub struct ResolvedView<'a> {
    registry: &'a Registry,
    values: &'a [Option<f64>],
}

impl<'a> ResolvedView<'a> {
    pub fn new(registry: &'a Registry, values: &'a [Option<f64>]) -> ResolvedView<'a> {
        ResolvedView { registry, values }
    }

    pub fn lookup(&self, name: &str) -> Lookup {
        match self.registry.get(name) {
            None => Lookup::Unknown,
            Some(index) => match self.values.get(index).copied().flatten() {
                Some(value) => Lookup::Resolved(value),
                None => Lookup::Pending,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(exprs: &[&str]) -> Vec<Cell> {
        exprs
            .iter()
            .enumerate()
            .map(|(i, e)| Cell::new(CellRef::new(i, 0), rpn::tokenize(e)))
            .collect()
    }

    #[test]
    fn test_literal_cell_resolves_without_peers() {
        let registry = Registry::default();
        let mut cell = Cell::new(CellRef::new(0, 0), rpn::tokenize("3 4 +"));
        assert!(cell.try_evaluate(&ResolvedView::new(&registry, &[])).unwrap());
        assert!(cell.is_resolved());
        assert_eq!(cell.value(), Some(7.0));
    }

    #[test]
    fn test_substitutes_resolved_reference() {
        let sheet = cells(&["5", "A1 3 +"]);
        let registry = Registry::build(&sheet);
        let mut cell = sheet[1].clone();
        let values = [Some(5.0), None];
        assert!(cell.try_evaluate(&ResolvedView::new(&registry, &values)).unwrap());
        assert_eq!(cell.value(), Some(8.0));
        assert_eq!(cell.expression(), "5 3 +");
    }

    #[test]
    fn test_pending_reference_keeps_partial_substitution() {
        let sheet = cells(&["5", "6", "A1 A2 +"]);
        let registry = Registry::build(&sheet);
        let mut cell = sheet[2].clone();
        let values = [Some(5.0), None, None];
        assert!(!cell.try_evaluate(&ResolvedView::new(&registry, &values)).unwrap());
        assert!(!cell.is_resolved());
        assert_eq!(cell.value(), None);
        assert_eq!(cell.expression(), "5 A2 +");
        assert_eq!(cell.pending_refs().collect::<Vec<_>>(), vec!["A2"]);
    }

    #[test]
    fn test_unknown_reference_is_pending_not_error() {
        let registry = Registry::default();
        let mut cell = Cell::new(CellRef::new(0, 0), rpn::tokenize("Q9 1 +"));
        assert!(!cell.try_evaluate(&ResolvedView::new(&registry, &[])).unwrap());
    }

    #[test]
    fn test_self_reference_is_fatal() {
        let registry = Registry::default();
        let mut cell = Cell::new(CellRef::new(0, 0), rpn::tokenize("A1 1 +"));
        assert_eq!(
            cell.try_evaluate(&ResolvedView::new(&registry, &[])),
            Err(EngineError::SelfReference {
                cell: "A1".to_string()
            })
        );
    }

    #[test]
    fn test_malformed_expression_names_cell() {
        let registry = Registry::default();
        let mut cell = Cell::new(CellRef::new(1, 0), rpn::tokenize("3 +"));
        let err = cell
            .try_evaluate(&ResolvedView::new(&registry, &[]))
            .unwrap_err();
        assert!(matches!(err, EngineError::MalformedExpression { ref cell, .. } if cell == "A2"));
    }

    #[test]
    fn test_malformed_expression_keeps_rpn_error_as_source() {
        use std::error::Error;

        let registry = Registry::default();
        let mut cell = Cell::new(CellRef::new(0, 0), rpn::tokenize("3 +"));
        let err = cell
            .try_evaluate(&ResolvedView::new(&registry, &[]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Malformed expression in cell A1");
        let source = err.source().expect("rpn error should be chained");
        assert_eq!(
            source.to_string(),
            "operator '+' at token 1 needs two operands"
        );
    }
}
