//! Scenario descriptors: the JSON interface to the grid-generation tools.
//!
//! A scenario file carries the initial grid (per-cell state, altitude,
//! vegetation, density) and the run parameters (wind, base ignition
//! probability, random seed). The format matches the output of the grid
//! generators: burn states are the integer codes 0-3, vegetation and density
//! use the three-letter codes `for|agr|shr|nov` and `den|nor|spa|nov`.
//!
//! Parsing is strict: unknown codes and malformed shapes surface as typed
//! errors and are never coerced into a runnable simulation.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellState, Density, Vegetation};
use crate::error::ScenarioError;
use crate::grid::Grid;
use crate::ignition::{IgnitionModel, IgnitionParams, Wind};
use crate::simulation::Simulation;

fn default_p0() -> f32 {
    IgnitionParams::default().p0
}

/// Per-cell entry of a scenario grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellDescriptor {
    /// Burn state code: 0 flammable, 1 burning, 2 burned out, 3 non-flammable.
    pub sta: u8,
    /// Altitude in meters.
    #[serde(default)]
    pub alt: f32,
    /// Vegetation code: `for`, `agr`, `shr`, `nov`.
    pub veg: String,
    /// Density code: `den`, `nor`, `spa`, `nov`.
    pub den: String,
}

impl CellDescriptor {
    /// Decode into a cell at grid position `(x, y)`.
    ///
    /// # Errors
    ///
    /// One `ScenarioError` variant per unrecognized code.
    pub fn to_cell(&self, x: i32, y: i32) -> Result<Cell, ScenarioError> {
        let state = match self.sta {
            0 => CellState::Flammable,
            1 => CellState::Burning,
            2 => CellState::BurnedOut,
            3 => CellState::NonFlammable,
            code => return Err(ScenarioError::UnknownStateCode(code)),
        };
        let vegetation = match self.veg.as_str() {
            "for" => Vegetation::Forest,
            "agr" => Vegetation::Agriculture,
            "shr" => Vegetation::Shrubland,
            "nov" => Vegetation::NoVegetation,
            code => return Err(ScenarioError::UnknownVegetationCode(code.to_owned())),
        };
        let density = match self.den.as_str() {
            "den" => Density::Dense,
            "nor" => Density::Normal,
            "spa" => Density::Sparse,
            "nov" => Density::NoVegetation,
            code => return Err(ScenarioError::UnknownDensityCode(code.to_owned())),
        };
        Ok(Cell::new(state, x, y, self.alt, vegetation, density))
    }
}

/// Complete scenario: initial grid plus run parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Wind direction vector `[x, y]` in grid coordinates (x grows with the
    /// column index, y with the row index).
    pub wind_dir: (f32, f32),
    /// Wind speed in m/s.
    pub wind_speed: f32,
    /// Seed for the simulation's random source.
    pub seed: u64,
    /// Base ignition probability; defaults to the model calibration.
    #[serde(default = "default_p0")]
    pub p0: f32,
    /// Initial grid, row by row.
    pub grid: Vec<Vec<CellDescriptor>>,
}

impl Scenario {
    /// Parse a scenario from its JSON encoding.
    ///
    /// # Errors
    ///
    /// `ScenarioError::Parse` for malformed JSON; decoding errors surface
    /// later, from [`Scenario::build_grid`].
    pub fn from_json(input: &str) -> Result<Self, ScenarioError> {
        serde_json::from_str(input).map_err(|e| ScenarioError::Parse(e.to_string()))
    }

    /// Build the initial grid store.
    ///
    /// # Errors
    ///
    /// Unknown codes from [`CellDescriptor::to_cell`]; structural problems
    /// from [`Grid::from_rows`].
    pub fn build_grid(&self) -> Result<Grid, ScenarioError> {
        let mut rows = Vec::with_capacity(self.grid.len());
        for (y, row) in self.grid.iter().enumerate() {
            let mut cells = Vec::with_capacity(row.len());
            for (x, descriptor) in row.iter().enumerate() {
                cells.push(descriptor.to_cell(x as i32, y as i32)?);
            }
            rows.push(cells);
        }
        Ok(Grid::from_rows(rows)?)
    }

    /// Build a ready-to-run simulation with the default coefficient set and
    /// this scenario's wind, `p0`, and seed.
    ///
    /// # Errors
    ///
    /// Everything [`Scenario::build_grid`] reports, plus configuration
    /// errors for the wind and `p0`.
    pub fn build_simulation(&self) -> Result<Simulation, ScenarioError> {
        let wind = Wind::new(
            Vector2::new(self.wind_dir.0, self.wind_dir.1),
            self.wind_speed,
        )?;
        let params = IgnitionParams {
            p0: self.p0,
            ..IgnitionParams::default()
        };
        let model = IgnitionModel::new(params, wind)?;
        let grid = self.build_grid()?;
        Ok(Simulation::new(grid, model, self.seed)?)
    }
}
