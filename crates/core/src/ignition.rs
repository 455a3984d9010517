//! Stochastic ignition model: the state-transition rule of the automaton.
//!
//! A flammable cell catches fire from each burning neighbor with probability
//!
//! `p = p0 * (1 + pveg) * (1 + pdens) * pwind * pslope`
//!
//! where `pveg` and `pdens` weigh the cell's fuel, `pwind` rewards spread
//! aligned with the wind, and `pslope` rewards spread along the terrain
//! gradient. Every burning neighbor is an independent Bernoulli trial; the
//! cell ignites if any trial succeeds.
//!
//! # Determinism
//!
//! [`IgnitionModel::evolve`] is pure given the random source. Exactly one
//! draw is consumed per burning neighbor, in the neighborhood's fixed
//! row-major ring order, and draws keep being consumed after a trial has
//! already succeeded. The draw count therefore depends only on the grid
//! contents, never on draw outcomes, which keeps the RNG stream identical
//! across runs with the same seed.

use nalgebra::Vector2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::boundary::Neighborhood;
use crate::cell::{Cell, CellState, Density, Vegetation};
use crate::error::ConfigError;

/// Wind over the terrain: a unit direction and a scalar speed, fixed for the
/// whole run.
///
/// Directions live in grid coordinates: `x` grows with the column index,
/// `y` with the row index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    direction: Vector2<f32>,
    speed: f32,
}

impl Wind {
    /// Create a wind field. The direction is normalized here, so callers may
    /// pass any non-zero vector.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidWindSpeed` if the speed is negative or not
    ///   finite
    /// - `ConfigError::DirectionlessWind` if the direction has zero length
    ///   while the speed is nonzero
    pub fn new(direction: Vector2<f32>, speed: f32) -> Result<Self, ConfigError> {
        if !speed.is_finite() || speed < 0.0 {
            return Err(ConfigError::InvalidWindSpeed(speed));
        }
        let norm = direction.norm();
        if norm == 0.0 || !norm.is_finite() {
            if speed == 0.0 {
                return Ok(Self::calm());
            }
            return Err(ConfigError::DirectionlessWind);
        }
        Ok(Wind {
            direction: direction / norm,
            speed,
        })
    }

    /// Calm conditions: zero speed, no direction.
    pub fn calm() -> Self {
        Wind {
            direction: Vector2::zeros(),
            speed: 0.0,
        }
    }

    /// Unit direction vector (zero for calm wind).
    pub fn direction(&self) -> Vector2<f32> {
        self.direction
    }

    /// Wind speed in m/s.
    pub fn speed(&self) -> f32 {
        self.speed
    }
}

/// Coefficients of the ignition probability formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IgnitionParams {
    /// Base ignition probability, in `(0, 1]`.
    pub p0: f32,
    /// First wind coefficient.
    pub c1: f32,
    /// Second wind coefficient.
    pub c2: f32,
    /// Slope coefficient.
    pub slope_coefficient: f32,
    /// Physical edge length of one grid cell (meters). Converts grid
    /// distance to physical distance in the slope term.
    pub cell_diameter: f32,
}

impl Default for IgnitionParams {
    /// Calibration of the published model this rule follows
    /// (Alexandridis et al. 2008, the Spetses island fire).
    fn default() -> Self {
        IgnitionParams {
            p0: 0.58,
            c1: 0.045,
            c2: 0.131,
            slope_coefficient: 0.078,
            cell_diameter: 25.0,
        }
    }
}

impl IgnitionParams {
    /// Check that every coefficient is usable.
    ///
    /// # Errors
    ///
    /// One `ConfigError` variant per violated constraint; the model refuses
    /// to guess around a bad coefficient.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.p0.is_finite() || self.p0 <= 0.0 || self.p0 > 1.0 {
            return Err(ConfigError::BaseProbabilityOutOfRange(self.p0));
        }
        for (name, value) in [
            ("c1", self.c1),
            ("c2", self.c2),
            ("slope_coefficient", self.slope_coefficient),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteCoefficient(name));
            }
        }
        if !self.cell_diameter.is_finite() || self.cell_diameter <= 0.0 {
            return Err(ConfigError::NonPositiveCellDiameter(self.cell_diameter));
        }
        Ok(())
    }
}

/// Vegetation spread factor `pveg`.
fn vegetation_factor(vegetation: Vegetation) -> f32 {
    match vegetation {
        Vegetation::NoVegetation => -1.0,
        Vegetation::Agriculture => -0.4,
        Vegetation::Forest | Vegetation::Shrubland => 0.4,
    }
}

/// Density spread factor `pdens`.
fn density_factor(density: Density) -> f32 {
    match density {
        Density::NoVegetation => -1.0,
        Density::Sparse => -0.3,
        Density::Normal => 0.0,
        Density::Dense => 0.3,
    }
}

/// The probabilistic evolution rule, bundling the coefficient set with the
/// run's wind conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IgnitionModel {
    params: IgnitionParams,
    wind: Wind,
}

impl IgnitionModel {
    /// Create a model from validated parameters and wind.
    ///
    /// # Errors
    ///
    /// Propagates [`IgnitionParams::validate`].
    pub fn new(params: IgnitionParams, wind: Wind) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(IgnitionModel { params, wind })
    }

    /// The coefficient set.
    pub fn params(&self) -> &IgnitionParams {
        &self.params
    }

    /// The run's wind conditions.
    pub fn wind(&self) -> &Wind {
        &self.wind
    }

    /// Raw probability of `cell` catching fire from the burning `neighbor`
    /// at window offset `(dx, dy)` (neighbor position minus cell position,
    /// in cells).
    ///
    /// The product may exceed 1 for favorable fuel; the Bernoulli draw in
    /// [`IgnitionModel::evolve`] saturates for such values, so no clamping
    /// happens here and callers see the literal product.
    pub fn ignition_probability(&self, cell: &Cell, neighbor: &Cell, dx: i32, dy: i32) -> f32 {
        let pveg = vegetation_factor(cell.vegetation);
        let pdens = density_factor(cell.density);

        let dist = ((dx * dx + dy * dy) as f32).sqrt();
        // Spread direction: from the burning neighbor toward the candidate cell
        let toward_cell = Vector2::new(-(dx as f32), -(dy as f32)) / dist;

        let pwind = self.wind_factor(&toward_cell);
        let pslope = self.slope_factor(neighbor.altitude - cell.altitude, dist);

        self.params.p0 * (1.0 + pveg) * (1.0 + pdens) * pwind * pslope
    }

    /// `pwind = exp(V * c1 * c2 * (cos(theta_w) - 1))`.
    ///
    /// `theta_w` is the angle between the wind direction and the spread
    /// direction. Aligned spread gets the maximum factor 1, decaying as the
    /// spread direction turns away from the wind; calm wind gives 1 for
    /// every direction.
    fn wind_factor(&self, toward_cell: &Vector2<f32>) -> f32 {
        let cos_theta = self.wind.direction().dot(toward_cell).clamp(-1.0, 1.0);
        (self.wind.speed() * self.params.c1 * self.params.c2 * (cos_theta - 1.0)).exp()
    }

    /// `pslope = exp(a * atan(dh / (d * cell_diameter)))`.
    ///
    /// `dh` is the burning neighbor's altitude minus the candidate cell's,
    /// `d` the grid distance between them (1 orthogonal, sqrt(2) diagonal).
    fn slope_factor(&self, altitude_delta: f32, dist: f32) -> f32 {
        let slope = (altitude_delta / (dist * self.params.cell_diameter)).atan();
        (self.params.slope_coefficient * slope).exp()
    }

    /// Evolve the neighborhood's center cell to its next-generation value.
    ///
    /// The neighborhood must come from the previous generation's padded
    /// view; the returned cell belongs to the next generation. See the
    /// module docs for the RNG consumption contract.
    pub fn evolve<R: Rng>(&self, hood: &Neighborhood, rng: &mut R) -> Cell {
        let cell = *hood.center();
        match cell.state {
            CellState::Burning => cell.with_state(CellState::BurnedOut),
            CellState::BurnedOut | CellState::NonFlammable => cell,
            CellState::Flammable => {
                let mut ignited = false;
                for ((dx, dy), neighbor) in hood.ring() {
                    if neighbor.state != CellState::Burning {
                        continue;
                    }
                    let p = self.ignition_probability(&cell, neighbor, dx, dy);
                    let draw: f32 = rng.random();
                    if draw < p {
                        ignited = true;
                    }
                }
                if ignited {
                    cell.with_state(CellState::Burning)
                } else {
                    cell
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::PaddedGrid;
    use crate::grid::Grid;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cell(vegetation: Vegetation, density: Density) -> Cell {
        Cell::new(CellState::Flammable, 0, 0, 0.0, vegetation, density)
    }

    fn burning_neighbor(altitude: f32) -> Cell {
        Cell::new(CellState::Burning, 1, 0, altitude, Vegetation::Forest, Density::Normal)
    }

    fn calm_model(p0: f32) -> IgnitionModel {
        let params = IgnitionParams {
            p0,
            ..IgnitionParams::default()
        };
        IgnitionModel::new(params, Wind::calm()).unwrap()
    }

    #[test]
    fn test_reference_probability() {
        // Forest/Normal fuel, flat terrain, calm wind, p0 = 1:
        // p = 1 * (1 + 0.4) * (1 + 0) * 1 * 1 = 1.4, reported unclamped
        let model = calm_model(1.0);
        let p = model.ignition_probability(
            &cell(Vegetation::Forest, Density::Normal),
            &burning_neighbor(0.0),
            1,
            0,
        );
        assert_relative_eq!(p, 1.4, epsilon = 1e-6);
    }

    #[test]
    fn test_density_factor_strictly_increases() {
        let model = calm_model(0.58);
        let neighbor = burning_neighbor(0.0);
        let sparse =
            model.ignition_probability(&cell(Vegetation::Forest, Density::Sparse), &neighbor, 1, 0);
        let normal =
            model.ignition_probability(&cell(Vegetation::Forest, Density::Normal), &neighbor, 1, 0);
        let dense =
            model.ignition_probability(&cell(Vegetation::Forest, Density::Dense), &neighbor, 1, 0);

        assert!(sparse < normal);
        assert!(normal < dense);
    }

    #[test]
    fn test_vegetation_factor_ordering() {
        let model = calm_model(0.58);
        let neighbor = burning_neighbor(0.0);
        let forest =
            model.ignition_probability(&cell(Vegetation::Forest, Density::Normal), &neighbor, 1, 0);
        let shrubland = model.ignition_probability(
            &cell(Vegetation::Shrubland, Density::Normal),
            &neighbor,
            1,
            0,
        );
        let agriculture = model.ignition_probability(
            &cell(Vegetation::Agriculture, Density::Normal),
            &neighbor,
            1,
            0,
        );

        assert_eq!(forest, shrubland);
        assert!(agriculture < forest);
        assert!(agriculture > 0.0);
    }

    #[test]
    fn test_no_vegetation_never_ignites() {
        // An inconsistent pairing never reaches the model through a validated
        // grid, but the factor itself must still zero the product
        let model = calm_model(1.0);
        let p = model.ignition_probability(
            &Cell::new(
                CellState::Flammable,
                0,
                0,
                0.0,
                Vegetation::NoVegetation,
                Density::NoVegetation,
            ),
            &burning_neighbor(0.0),
            1,
            0,
        );
        assert_eq!(p, 0.0);
    }

    #[test]
    fn test_downwind_spread_favored() {
        // Wind blowing toward +x; fire spreading with the wind keeps the
        // full factor, fire spreading against it is damped
        let params = IgnitionParams::default();
        let wind = Wind::new(Vector2::new(1.0, 0.0), 8.0).unwrap();
        let model = IgnitionModel::new(params, wind).unwrap();
        let target = cell(Vegetation::Forest, Density::Normal);

        // Neighbor west of the cell: spread direction is +x (downwind)
        let downwind = model.ignition_probability(&target, &burning_neighbor(0.0), -1, 0);
        // Neighbor east of the cell: spread direction is -x (upwind)
        let upwind = model.ignition_probability(&target, &burning_neighbor(0.0), 1, 0);

        assert!(downwind > upwind);
        // Aligned spread leaves the wind factor at exactly 1
        assert_relative_eq!(downwind, 0.58 * 1.4, epsilon = 1e-6);
    }

    #[test]
    fn test_calm_wind_is_isotropic() {
        let model = calm_model(0.58);
        let target = cell(Vegetation::Forest, Density::Normal);
        let east = model.ignition_probability(&target, &burning_neighbor(0.0), 1, 0);
        let west = model.ignition_probability(&target, &burning_neighbor(0.0), -1, 0);
        let diag = model.ignition_probability(&target, &burning_neighbor(0.0), 1, 1);

        assert_relative_eq!(east, west, epsilon = 1e-6);
        assert_relative_eq!(east, diag, epsilon = 1e-6);
    }

    #[test]
    fn test_slope_factor_follows_altitude_delta() {
        let model = calm_model(0.58);
        let target = cell(Vegetation::Forest, Density::Normal);
        let level = model.ignition_probability(&target, &burning_neighbor(0.0), 1, 0);
        let from_above = model.ignition_probability(&target, &burning_neighbor(80.0), 1, 0);
        let from_below = model.ignition_probability(&target, &burning_neighbor(-80.0), 1, 0);

        assert!(from_above > level);
        assert!(from_below < level);
    }

    #[test]
    fn test_diagonal_distance_weakens_slope_term() {
        let model = calm_model(0.58);
        let target = cell(Vegetation::Forest, Density::Normal);
        let orthogonal = model.ignition_probability(&target, &burning_neighbor(80.0), 1, 0);
        let diagonal = model.ignition_probability(&target, &burning_neighbor(80.0), 1, 1);

        // Same altitude difference over a longer run: shallower slope
        assert!(diagonal < orthogonal);
    }

    #[test]
    fn test_wind_rejects_zero_direction_with_speed() {
        assert_eq!(
            Wind::new(Vector2::zeros(), 5.0),
            Err(ConfigError::DirectionlessWind)
        );
        assert!(Wind::new(Vector2::zeros(), 0.0).is_ok());
        assert_eq!(
            Wind::new(Vector2::new(1.0, 0.0), -1.0),
            Err(ConfigError::InvalidWindSpeed(-1.0))
        );
    }

    #[test]
    fn test_params_validation() {
        let zero_p0 = IgnitionParams {
            p0: 0.0,
            ..IgnitionParams::default()
        };
        assert_eq!(
            zero_p0.validate(),
            Err(ConfigError::BaseProbabilityOutOfRange(0.0))
        );

        let excessive_p0 = IgnitionParams {
            p0: 1.5,
            ..IgnitionParams::default()
        };
        assert_eq!(
            excessive_p0.validate(),
            Err(ConfigError::BaseProbabilityOutOfRange(1.5))
        );

        let nan_c2 = IgnitionParams {
            c2: f32::NAN,
            ..IgnitionParams::default()
        };
        assert_eq!(nan_c2.validate(), Err(ConfigError::NonFiniteCoefficient("c2")));

        let flat_cell = IgnitionParams {
            cell_diameter: 0.0,
            ..IgnitionParams::default()
        };
        assert_eq!(
            flat_cell.validate(),
            Err(ConfigError::NonPositiveCellDiameter(0.0))
        );
    }

    fn hood_with_center_state(state: CellState) -> Neighborhood {
        let template = Cell::new(state, 0, 0, 0.0, Vegetation::Forest, Density::Normal);
        let grid = Grid::uniform(3, 3, template).unwrap();
        PaddedGrid::new(&grid).neighborhood(1, 1)
    }

    #[test]
    fn test_burning_cell_burns_out() {
        let model = calm_model(0.58);
        let mut rng = StdRng::seed_from_u64(1);
        let hood = hood_with_center_state(CellState::Burning);
        let next = model.evolve(&hood, &mut rng);
        assert_eq!(next.state, CellState::BurnedOut);
    }

    #[test]
    fn test_terminal_states_stay_put() {
        let model = calm_model(0.58);
        let mut rng = StdRng::seed_from_u64(1);

        let burned = hood_with_center_state(CellState::BurnedOut);
        assert_eq!(model.evolve(&burned, &mut rng).state, CellState::BurnedOut);

        let rock = hood_with_center_state(CellState::NonFlammable);
        assert_eq!(model.evolve(&rock, &mut rng).state, CellState::NonFlammable);
    }

    #[test]
    fn test_flammable_without_burning_neighbors_stays_flammable() {
        let model = calm_model(0.58);
        let mut rng = StdRng::seed_from_u64(1);
        let hood = hood_with_center_state(CellState::Flammable);
        assert_eq!(model.evolve(&hood, &mut rng).state, CellState::Flammable);
    }

    #[test]
    fn test_certain_ignition_above_one() {
        // Forest/Dense with p0 = 1 gives p = 1.4 * 1.3 = 1.82 > 1; every
        // draw in [0, 1) succeeds, so ignition is deterministic
        let template = Cell::new(
            CellState::Flammable,
            0,
            0,
            0.0,
            Vegetation::Forest,
            Density::Dense,
        );
        let grid = Grid::uniform(3, 3, template).unwrap();
        let burning = grid.cell_at(0, 1).unwrap().with_state(CellState::Burning);
        let grid = grid.with_cell(0, 1, burning).unwrap();
        let hood = PaddedGrid::new(&grid).neighborhood(1, 1);

        let model = calm_model(1.0);
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(model.evolve(&hood, &mut rng).state, CellState::Burning);
        }
    }
}
