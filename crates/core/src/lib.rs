//! Wildfire CA Core Library
//!
//! Probabilistic cellular automaton for wildfire spread over a 2D terrain.
//! Each cell carries a burn state, vegetation type and density, and an
//! altitude; every generation, each flammable cell may catch fire from its
//! burning neighbors with a probability that combines vegetation, density,
//! wind-alignment, and slope factors.
//!
//! All randomness flows through one explicitly seeded source consumed in a
//! fixed scan order, so a run is bit-for-bit reproducible from its scenario
//! and seed.

pub mod boundary;
pub mod cell;
pub mod error;
pub mod grid;
pub mod ignition;
pub mod scenario;
pub mod simulation;

// Re-export main types
pub use boundary::{Neighborhood, PaddedGrid};
pub use cell::{Cell, CellState, Density, Vegetation};
pub use error::{ConfigError, GridError, ScenarioError};
pub use grid::Grid;
pub use ignition::{IgnitionModel, IgnitionParams, Wind};
pub use scenario::{CellDescriptor, Scenario};
pub use simulation::Simulation;
