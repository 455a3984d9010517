//! Grid store: the rectangular collection of cells forming one generation.
//!
//! The grid owns the "current generation" of the automaton. The step engine
//! replaces it wholesale on every step; nothing mutates a stored cell in
//! place, so a `&Grid` is always a consistent snapshot.
//!
//! Invariants, enforced at construction:
//! - every row has the same length (rectangularity)
//! - every cell's stored position matches its storage location
//! - vegetation and density agree about the absence of fuel

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellState};
use crate::error::GridError;

/// Rectangular, row-major collection of cells (`height` rows of `width`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid from rows of cells, validating every invariant.
    ///
    /// # Errors
    ///
    /// - `GridError::Empty` if there are no rows or the first row is empty
    /// - `GridError::NotRectangular` if any row's length differs
    /// - `GridError::PositionMismatch` if a cell's position disagrees with
    ///   its slot
    /// - `GridError::FuelMismatch` if a cell pairs vegetation and density
    ///   inconsistently
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GridError::Empty);
        }
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::NotRectangular {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
        }

        let grid = Grid {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Build a uniform grid from a template cell.
    ///
    /// Every cell shares the template's state and terrain; positions are
    /// assigned per slot. Convenient for small scenarios and tests.
    ///
    /// # Errors
    ///
    /// Same validation as [`Grid::from_rows`].
    pub fn uniform(width: usize, height: usize, template: Cell) -> Result<Self, GridError> {
        let rows = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| {
                        let mut cell = template;
                        cell.x = x as i32;
                        cell.y = y as i32;
                        cell
                    })
                    .collect()
            })
            .collect();
        Self::from_rows(rows)
    }

    /// Assemble a grid from an already-validated row-major cell vector.
    ///
    /// Only the step engine uses this; it rebuilds every cell with
    /// `Cell::with_state`, which cannot break the invariants of a validated
    /// source grid.
    pub(crate) fn from_parts(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Grid {
            width,
            height,
            cells,
        }
    }

    /// Re-check every structural invariant.
    ///
    /// # Errors
    ///
    /// Same as [`Grid::from_rows`].
    pub fn validate(&self) -> Result<(), GridError> {
        if self.width == 0 || self.height == 0 || self.cells.len() != self.width * self.height {
            return Err(GridError::Empty);
        }
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = &self.cells[y * self.width + x];
                if cell.x != x as i32 || cell.y != y as i32 {
                    return Err(GridError::PositionMismatch { x, y });
                }
                if !cell.fuel_consistent() {
                    return Err(GridError::FuelMismatch { x, y });
                }
            }
        }
        Ok(())
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid dimensions as `(height, width)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Cell at column `x`, row `y` (bounds-checked).
    pub fn cell_at(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Rebuild the grid with the cell at `(x, y)` replaced.
    ///
    /// The original grid is untouched; the replacement is validated like any
    /// freshly constructed grid.
    ///
    /// # Errors
    ///
    /// `GridError::OutOfBounds` for coordinates outside the grid, plus the
    /// usual validation errors if the new cell breaks an invariant.
    pub fn with_cell(&self, x: usize, y: usize, cell: Cell) -> Result<Self, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfBounds { x, y });
        }
        let mut next = self.clone();
        next.cells[y * self.width + x] = cell;
        next.validate()?;
        Ok(next)
    }

    /// Row-major iterator over all cells.
    ///
    /// This is the read interface for renderers and analysis: states (and
    /// terrain, if wanted) of the whole generation in a single pass.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Number of cells currently in `state`.
    pub fn state_count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }

    /// Cells burned out so far (the "scar size" of the fire).
    pub fn burned_out_count(&self) -> usize {
        self.state_count(CellState::BurnedOut)
    }

    /// Whether any cell is still burning.
    pub fn has_active_fire(&self) -> bool {
        self.cells.iter().any(|c| c.state == CellState::Burning)
    }
}
