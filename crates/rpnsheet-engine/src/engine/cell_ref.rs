//! Cell name parsing and formatting.
//!
//! Names are a single row letter followed by a 1-based column number, so the
//! cell at `x = 3, y = 1` is `"B4"`. Only 26 rows are addressable; grids are
//! checked against that limit when their [`Dimensions`] are built.
//!
//! # Examples
//!
//! ```
//! use rpnsheet_engine::engine::CellRef;
//!
//! let cell: CellRef = "B4".parse().unwrap();
//! assert_eq!(cell.x, 3);  // 0-indexed
//! assert_eq!(cell.y, 1);
//! assert_eq!(cell.to_string(), "B4");
//! ```

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use super::error::{EngineError, Result};

/// Number of rows the single-letter naming scheme can address.
pub const MAX_ROWS: usize = 26;

/// A reference to a cell by column (`x`) and row (`y`) indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CellRef {
    pub x: usize,
    pub y: usize,
}

impl CellRef {
    pub fn new(x: usize, y: usize) -> CellRef {
        CellRef { x, y }
    }

    /// The spreadsheet name of this cell, e.g. `"A1"`.
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Row letter for a 0-indexed row (0 -> A, 25 -> Z).
    pub fn row_letter(y: usize) -> Option<char> {
        (y < MAX_ROWS).then(|| (b'A' + y as u8) as char)
    }

    fn parse_name(name: &str) -> Result<CellRef> {
        let invalid = |reason: &str| EngineError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        let caps = name_re()
            .captures(name)
            .ok_or_else(|| invalid("expected a row letter A-Z followed by a column number"))?;
        let letter = caps["row"].as_bytes()[0];
        let column = caps["col"]
            .parse::<usize>()
            .map_err(|_| invalid("column number is too large"))?;
        let x = column
            .checked_sub(1)
            .ok_or_else(|| invalid("column numbers start at 1"))?;

        Ok(CellRef::new(x, (letter - b'A') as usize))
    }
}

impl std::str::FromStr for CellRef {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_name(s)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match CellRef::row_letter(self.y) {
            Some(letter) => write!(f, "{}{}", letter, self.x + 1),
            // Not reachable through `Dimensions`; kept printable for diagnostics.
            None => write!(f, "R{}C{}", self.y + 1, self.x + 1),
        }
    }
}

fn name_re() -> &'static Regex {
    static NAME_RE: OnceLock<Regex> = OnceLock::new();
    NAME_RE.get_or_init(|| {
        Regex::new(r"^(?<row>[A-Z])(?<col>[0-9]+)$").expect("cell name regex must compile")
    })
}

/// Declared extent of a grid: `x_dim` columns by `y_dim` rows.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Dimensions {
    x_dim: usize,
    y_dim: usize,
}

impl Dimensions {
    pub fn new(x_dim: usize, y_dim: usize) -> Result<Dimensions> {
        if x_dim == 0 || y_dim == 0 {
            return Err(EngineError::EmptyGrid);
        }
        if y_dim > MAX_ROWS {
            return Err(EngineError::TooManyRows {
                rows: y_dim,
                max: MAX_ROWS,
            });
        }
        if x_dim.checked_mul(y_dim).is_none() {
            return Err(EngineError::TooManyCells { x_dim, y_dim });
        }
        Ok(Dimensions { x_dim, y_dim })
    }

    pub fn x_dim(&self) -> usize {
        self.x_dim
    }

    pub fn y_dim(&self) -> usize {
        self.y_dim
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.x_dim * self.y_dim
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        cell.x < self.x_dim && cell.y < self.y_dim
    }

    /// Position of the `index`-th cell in scan order (`x = i % x_dim`, `y = i / x_dim`).
    pub fn cell_at(&self, index: usize) -> CellRef {
        CellRef::new(index % self.x_dim, index / self.x_dim)
    }

    /// Scan-order index of a cell.
    pub fn index_of(&self, cell: &CellRef) -> usize {
        cell.y * self.x_dim + cell.x
    }

    /// All cells in scan order (row-major by `(y, x)`).
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        (0..self.len()).map(|i| self.cell_at(i))
    }

    /// Parse a cell name and check that it lies inside this grid.
    pub fn parse_name(&self, name: &str) -> Result<CellRef> {
        let cell: CellRef = name.parse()?;
        if !self.contains(&cell) {
            return Err(EngineError::InvalidName {
                name: name.to_string(),
                reason: format!("outside the {}x{} grid", self.x_dim, self.y_dim),
            });
        }
        Ok(cell)
    }
}
