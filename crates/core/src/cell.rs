//! Cell model for the wildfire automaton.
//!
//! A cell is an immutable-per-generation value describing one grid location:
//! burn state, position, terrain altitude, and the fuel (vegetation type and
//! density) available there. Cells are plain `Copy` values; the step engine
//! never mutates a cell in place, it builds a replacement cell for the next
//! generation.

use serde::{Deserialize, Serialize};

/// Burn state of a single cell.
///
/// Legal transitions between generations:
/// - `Flammable -> {Flammable, Burning}` (stochastic, needs a burning neighbor)
/// - `Burning -> BurnedOut` (a cell burns for exactly one generation)
/// - `BurnedOut -> BurnedOut` (terminal)
/// - `NonFlammable -> NonFlammable` (terminal; water, barren ground, padding)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    /// Unburned fuel that can ignite.
    Flammable,
    /// Actively burning this generation.
    Burning,
    /// Fuel exhausted.
    BurnedOut,
    /// Cannot burn at all.
    NonFlammable,
}

/// Vegetation type found in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vegetation {
    Forest,
    Agriculture,
    Shrubland,
    NoVegetation,
}

/// Vegetation density of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Density {
    Dense,
    Normal,
    Sparse,
    NoVegetation,
}

/// One grid location of the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Burn state for the current generation.
    pub state: CellState,
    /// Column index in the owning grid (0-indexed).
    pub x: i32,
    /// Row index in the owning grid (0-indexed).
    pub y: i32,
    /// Terrain altitude at the cell center (meters above sea level).
    pub altitude: f32,
    /// Vegetation type.
    pub vegetation: Vegetation,
    /// Vegetation density.
    pub density: Density,
}

impl Cell {
    /// Create a new cell.
    pub fn new(
        state: CellState,
        x: i32,
        y: i32,
        altitude: f32,
        vegetation: Vegetation,
        density: Density,
    ) -> Self {
        Cell {
            state,
            x,
            y,
            altitude,
            vegetation,
            density,
        }
    }

    /// Replacement cell for the next generation: same location and terrain,
    /// new burn state.
    #[must_use]
    pub fn with_state(self, state: CellState) -> Self {
        Cell { state, ..self }
    }

    /// Whether vegetation and density agree about the absence of fuel.
    ///
    /// The probability tables pair `Vegetation::NoVegetation` with
    /// `Density::NoVegetation`; a cell claiming one without the other is a
    /// malformed grid description.
    pub fn fuel_consistent(&self) -> bool {
        (self.vegetation == Vegetation::NoVegetation) == (self.density == Density::NoVegetation)
    }
}
