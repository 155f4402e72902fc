//! Two-node building zone model.
//!
//! The zone is an RC network with an interior air node and a structural
//! node, driven by the exterior temperature and two heat gains. See
//! [`derivative`] for the node balances.
//!
//! # Example
//!
//! ```
//! use twine_zone::models::thermal::zone::{TimeGrid, ZoneParameters, ZoneSimulation, ZoneState};
//!
//! let simulation = ZoneSimulation::new(ZoneParameters::reference());
//! let trajectory = simulation
//!     .run(ZoneState::from_celsius(20.0, 18.0), &TimeGrid::reference())
//!     .unwrap();
//!
//! assert_eq!(trajectory.len(), 100);
//! ```

pub(crate) mod core;

pub use self::core::{
    Capacitances, CrossingConfig, CrossingError, HeatGains, ParameterError, Resistances, Sample,
    SimulateError, TimeGrid, TimeGridError, Trajectory, ZoneDerivative, ZoneInput, ZoneModel,
    ZoneParameters, ZoneProblem, ZoneState, analytical, derivative, simulate,
    time_to_interior_temperature,
};

use uom::si::f64::{ThermodynamicTemperature, Time};

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    ode::OdeConfig,
};

/// Runs a zone with fixed parameters and integrator settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneSimulation {
    params: ZoneParameters,
    ode: OdeConfig,
}

impl ZoneSimulation {
    /// Creates a simulation with default integrator settings.
    #[must_use]
    pub fn new(params: ZoneParameters) -> Self {
        Self::with_config(params, OdeConfig::default())
    }

    #[must_use]
    pub fn with_config(params: ZoneParameters, ode: OdeConfig) -> Self {
        Self { params, ode }
    }

    #[must_use]
    pub fn params(&self) -> &ZoneParameters {
        &self.params
    }

    /// Integrates from `initial` over `grid`.
    ///
    /// # Errors
    ///
    /// Returns a [`SimulateError`] if integration fails.
    pub fn run(&self, initial: ZoneState, grid: &TimeGrid) -> Result<Trajectory, SimulateError> {
        simulate(&self.params, initial, grid, &self.ode)
    }

    /// Finds when the interior node first reaches `target` within `horizon`.
    ///
    /// Trial simulations use this simulation's integrator settings.
    ///
    /// # Errors
    ///
    /// Returns a [`CrossingError`] if the target is not reached or the search fails.
    pub fn time_to_interior_temperature(
        &self,
        initial: ZoneState,
        target: ThermodynamicTemperature,
        horizon: Constrained<Time, StrictlyPositive>,
    ) -> Result<Time, CrossingError> {
        let config = CrossingConfig {
            ode: self.ode,
            ..CrossingConfig::default()
        };
        time_to_interior_temperature(&self.params, initial, target, horizon, &config)
    }
}
