//! Spreadsheet engine API.
//!
//! This module provides the batch solver for RPN sheets:
//!
//! - [`CellRef`], [`Dimensions`] - Cell naming (row letter + column number ↔ x/y indices)
//! - [`Token`], [`evaluate`] - The RPN stack machine
//! - [`Cell`], [`Registry`] - Cell storage and name lookup
//! - [`Sheet`], [`solve`] - Fixpoint resolution of a whole grid
//! - [`detect_cycle`] - Names a cycle among cells left unresolved
//! - [`format_number`] - Fixed-point output formatting

mod cell;
mod cell_ref;
mod cycle;
mod error;
mod format;
mod resolve;
pub mod rpn;

pub use cell::{Cell, Lookup, Registry, ResolvedView};
pub use cell_ref::{CellRef, Dimensions, MAX_ROWS};
pub use cycle::detect_cycle;
pub use error::{EngineError, Result, RpnError};
pub use format::format_number;
pub use resolve::{Sheet, Solution, ValueGrid, solve};
pub use rpn::{Operator, Token, evaluate, evaluate_str, tokenize};
