use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::{TemperatureInterval, ThermodynamicTemperature, Time};

use crate::models::thermal::zone::core::SimulateError;

/// Errors that can occur while searching for an interior crossing time.
#[derive(Debug, Error)]
pub enum CrossingError {
    /// A trial simulation failed.
    #[error("zone simulation failed")]
    Simulate(#[from] SimulateError),

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The target is not between the initial and final interior temperatures.
    #[error("target not reached within {horizon:?}: final interior temperature {final_interior:?}")]
    NotReached {
        /// Interior temperature at the end of the horizon.
        final_interior: ThermodynamicTemperature,

        /// The searched horizon.
        horizon: Time,
    },

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual:?}")]
    MaxIters {
        /// Best interior temperature residual achieved.
        residual: TemperatureInterval,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
