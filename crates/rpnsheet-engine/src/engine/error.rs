//! Error types for the rpnsheet engine.

use thiserror::Error;

/// Failures of the RPN stack machine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RpnError {
    #[error("operator '{operator}' at token {position} needs two operands")]
    StackUnderflow { operator: char, position: usize },

    #[error("expression leaves {remaining} values on the stack, expected exactly 1")]
    UnbalancedStack { remaining: usize },

    #[error("unresolved reference '{0}' reached the evaluator")]
    UnresolvedReference(String),
}

/// Errors that can occur while building or solving a sheet.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid cell name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Grid must have at least one row and one column")]
    EmptyGrid,

    #[error("Grid has {rows} rows, at most {max} are addressable")]
    TooManyRows { rows: usize, max: usize },

    #[error("Grid of {x_dim}x{y_dim} cells is too large")]
    TooManyCells { x_dim: usize, y_dim: usize },

    #[error("Expected {expected} cell expressions, found {found}")]
    CellCountMismatch { expected: usize, found: usize },

    #[error("Circular dependency: cell {cell} references itself")]
    SelfReference { cell: String },

    #[error("Malformed expression in cell {cell}")]
    MalformedExpression {
        cell: String,
        #[source]
        source: RpnError,
    },

    #[error("Circular dependency between cells {} (cycle: {})", .cells.join(", "), .cycle.join(" -> "))]
    CircularDependency {
        cells: Vec<String>,
        cycle: Vec<String>,
    },

    #[error("Unresolvable reference to {} from cells {}", .missing.join(", "), .cells.join(", "))]
    UnresolvableReference {
        cells: Vec<String>,
        missing: Vec<String>,
    },
}

impl EngineError {
    /// Cells left unresolved when the fixpoint loop stalled, if this is a stall failure.
    pub fn stuck_cells(&self) -> Option<&[String]> {
        match self {
            EngineError::CircularDependency { cells, .. }
            | EngineError::UnresolvableReference { cells, .. } => Some(cells),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
