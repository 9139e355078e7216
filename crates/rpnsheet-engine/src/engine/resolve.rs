//! Fixpoint resolution of a whole sheet.
//!
//! Each pass asks every unresolved cell to substitute whatever references
//! have become available and evaluate itself. Cells resolved during a pass
//! are committed at the end of that pass, so every cell in a pass sees the
//! same snapshot and the visiting order cannot change the result. The loop
//! stops as soon as a pass resolves nothing; any cell still active at that
//! point sits on a cycle or depends on a name that does not exist.

use std::collections::BTreeSet;

use super::cell::{Cell, Registry, ResolvedView};
use super::cell_ref::{CellRef, Dimensions};
use super::cycle::detect_cycle;
use super::error::{EngineError, Result};

/// Dense grid of results indexed `[x][y]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueGrid {
    dims: Dimensions,
    values: Vec<Vec<f64>>,
}

impl ValueGrid {
    fn new(dims: Dimensions) -> ValueGrid {
        ValueGrid {
            dims,
            values: vec![vec![0.0; dims.y_dim()]; dims.x_dim()],
        }
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        self.values.get(x)?.get(y).copied()
    }

    pub fn get_ref(&self, cell: &CellRef) -> Option<f64> {
        self.get(cell.x, cell.y)
    }

    /// Look a value up by cell name, e.g. `"B4"`.
    pub fn get_name(&self, name: &str) -> Option<f64> {
        let cell = self.dims.parse_name(name).ok()?;
        self.get_ref(&cell)
    }

    /// Values in scan order (row-major by `(y, x)`).
    pub fn iter(&self) -> impl Iterator<Item = (CellRef, f64)> + '_ {
        self.dims
            .cells()
            .map(|cell| (cell, self.values[cell.x][cell.y]))
    }

    /// Rows top to bottom, each row's values left to right.
    pub fn rows(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        (0..self.dims.y_dim()).map(|y| {
            (0..self.dims.x_dim())
                .map(|x| self.values[x][y])
                .collect()
        })
    }

    fn set(&mut self, cell: &CellRef, value: f64) {
        self.values[cell.x][cell.y] = value;
    }
}

/// A successfully solved sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    pub grid: ValueGrid,
    /// Number of evaluation passes the fixpoint loop ran.
    pub passes: usize,
}

/// A grid of cells ready to be solved.
pub struct Sheet {
    dims: Dimensions,
    cells: Vec<Cell>,
    registry: Registry,
}

impl Sheet {
    /// Build a sheet from one raw token list per cell, in scan order.
    pub fn new<I, T, S>(dims: Dimensions, expressions: I) -> Result<Sheet>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[S]>,
        S: AsRef<str>,
    {
        let cells: Vec<Cell> = expressions
            .into_iter()
            .enumerate()
            .map(|(i, raw)| Cell::from_raw(dims.cell_at(i), raw.as_ref()))
            .collect();
        Sheet::from_cells(dims, cells)
    }

    /// Build a sheet from already tokenized cells, in scan order.
    pub fn from_cells(dims: Dimensions, cells: Vec<Cell>) -> Result<Sheet> {
        if cells.len() != dims.len() {
            return Err(EngineError::CellCountMismatch {
                expected: dims.len(),
                found: cells.len(),
            });
        }
        let registry = Registry::build(&cells);
        Ok(Sheet {
            dims,
            cells,
            registry,
        })
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Run the fixpoint loop to completion.
    pub fn solve(mut self) -> Result<Solution> {
        let mut grid = ValueGrid::new(self.dims);
        let mut resolved: Vec<Option<f64>> = vec![None; self.cells.len()];
        let mut active: Vec<usize> = (0..self.cells.len()).collect();
        let mut passes = 0;

        while !active.is_empty() {
            passes += 1;
            let mut newly_resolved = Vec::new();
            {
                let view = ResolvedView::new(&self.registry, &resolved);
                for &index in &active {
                    if self.cells[index].try_evaluate(&view)? {
                        newly_resolved.push(index);
                    }
                }
            }

            for &index in &newly_resolved {
                let cell = &self.cells[index];
                if let Some(value) = cell.value() {
                    resolved[index] = Some(value);
                    grid.set(&cell.pos, value);
                }
            }
            active.retain(|index| resolved[*index].is_none());

            log::debug!(
                "pass {}: resolved {} cells, {} remaining",
                passes,
                newly_resolved.len(),
                active.len()
            );

            if newly_resolved.is_empty() {
                return Err(self.stalled(&active));
            }
        }

        Ok(Solution { grid, passes })
    }

    fn stalled(&self, active: &[usize]) -> EngineError {
        for &index in active {
            let cell = &self.cells[index];
            log::debug!("stuck: {} = {}", cell.name, cell.expression());
        }

        let cells: Vec<String> = active.iter().map(|&i| self.cells[i].name.clone()).collect();
        let missing: BTreeSet<String> = active
            .iter()
            .flat_map(|&i| self.cells[i].pending_refs())
            .filter(|name| !self.registry.contains(name))
            .map(str::to_string)
            .collect();

        if !missing.is_empty() {
            return EngineError::UnresolvableReference {
                cells,
                missing: missing.into_iter().collect(),
            };
        }

        let cycle = detect_cycle(active, &self.cells, &self.registry).unwrap_or_default();
        EngineError::CircularDependency { cells, cycle }
    }
}

/// Build and solve a sheet in one call.
pub fn solve<I, T, S>(dims: Dimensions, expressions: I) -> Result<Solution>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[S]>,
    S: AsRef<str>,
{
    Sheet::new(dims, expressions)?.solve()
}
