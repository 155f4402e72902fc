use twine_solvers::equation::bisection;
use uom::si::{
    f64::{TemperatureInterval, Time},
    temperature_interval::kelvin as delta_kelvin,
    time::second,
};

use crate::support::ode::OdeConfig;

/// Solver configuration for the interior crossing search.
#[derive(Debug, Clone, Copy)]
pub struct CrossingConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on the crossing time.
    pub time_tol: Time,

    /// Absolute tolerance on the interior temperature residual.
    pub temp_tol: TemperatureInterval,

    /// Integrator settings for each trial simulation.
    pub ode: OdeConfig,
}

impl Default for CrossingConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            time_tol: Time::new::<second>(1e-6),
            temp_tol: TemperatureInterval::new::<delta_kelvin>(1e-9),
            ode: OdeConfig::default(),
        }
    }
}

impl CrossingConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.time_tol.get::<second>(),
            x_rel_tol: 0.0,
            residual_tol: self.temp_tol.get::<delta_kelvin>(),
        }
    }
}
