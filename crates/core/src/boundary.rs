//! Boundary policy: padded view of a grid.
//!
//! Surrounds the real grid with a synthetic one-cell ring of non-flammable
//! cells so that every real cell has a full 3x3 neighborhood and the ignition
//! model never branches on grid edges. The padding exists only inside this
//! read-only view: it is never stored in a [`Grid`] and never transitions.

use crate::cell::{Cell, CellState, Density, Vegetation};
use crate::grid::Grid;

/// Window offsets of the eight neighbors in fixed row-major scan order,
/// center excluded. The ignition model consumes random draws in exactly this
/// order, which pins the RNG stream for reproducible runs.
const RING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Borrowed view of a grid with a one-cell non-flammable ring around it.
#[derive(Debug, Clone, Copy)]
pub struct PaddedGrid<'a> {
    grid: &'a Grid,
}

impl<'a> PaddedGrid<'a> {
    /// Wrap a grid in the padded view.
    pub fn new(grid: &'a Grid) -> Self {
        PaddedGrid { grid }
    }

    /// Synthetic padding cell for a coordinate outside the real grid.
    fn padding_cell(x: i32, y: i32) -> Cell {
        Cell::new(
            CellState::NonFlammable,
            x,
            y,
            0.0,
            Vegetation::NoVegetation,
            Density::NoVegetation,
        )
    }

    /// Cell at signed coordinates; positions outside the real grid yield the
    /// synthetic non-flammable padding cell.
    pub fn cell_at(&self, x: i32, y: i32) -> Cell {
        if x < 0 || y < 0 {
            return Self::padding_cell(x, y);
        }
        self.grid
            .cell_at(x as usize, y as usize)
            .copied()
            .unwrap_or_else(|| Self::padding_cell(x, y))
    }

    /// Full 3x3 window centered on the real cell at `(x, y)`.
    pub fn neighborhood(&self, x: usize, y: usize) -> Neighborhood {
        let (cx, cy) = (x as i32, y as i32);
        let mut cells = [Self::padding_cell(cx, cy); 9];
        for dy in -1..=1 {
            for dx in -1..=1 {
                cells[((dy + 1) * 3 + (dx + 1)) as usize] = self.cell_at(cx + dx, cy + dy);
            }
        }
        Neighborhood { cells }
    }
}

/// 3x3 window of cells in row-major order, center at index 4.
#[derive(Debug, Clone, Copy)]
pub struct Neighborhood {
    cells: [Cell; 9],
}

impl Neighborhood {
    /// The cell being evaluated.
    pub fn center(&self) -> &Cell {
        &self.cells[4]
    }

    /// The eight neighbors in row-major scan order, each with its window
    /// offset `(dx, dy)` relative to the center.
    pub fn ring(&self) -> impl Iterator<Item = ((i32, i32), &Cell)> + '_ {
        RING_OFFSETS.iter().map(move |&(dx, dy)| {
            let idx = ((dy + 1) * 3 + (dx + 1)) as usize;
            ((dx, dy), &self.cells[idx])
        })
    }

    /// Number of neighbors currently burning.
    pub fn burning_neighbors(&self) -> usize {
        self.ring()
            .filter(|(_, cell)| cell.state == CellState::Burning)
            .count()
    }
}
