//! Time for the interior node to reach a target temperature.
//!
//! The search treats the zone simulation as a model of elapsed time and
//! bisects on that time until the interior temperature matches the target.

mod config;
mod error;
mod problem;

pub use config::CrossingConfig;
pub use error::CrossingError;

use log::debug;
use twine_core::Model;
use twine_solvers::equation::bisection;
use uom::{
    ConstZero,
    si::{
        f64::{TemperatureInterval, ThermodynamicTemperature, Time},
        temperature_interval::kelvin as delta_kelvin,
        time::second,
    },
};

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    units::TemperatureDifference,
};

use super::{ZoneParameters, ZoneState};

use problem::{ElapsedModel, InteriorTargetProblem};

/// Finds when the interior temperature first reaches `target` within `horizon`.
///
/// Returns zero if the initial interior temperature already equals `target`.
/// The target must be bracketed by the interior temperatures at the start
/// and end of the horizon; if the interior temperature crosses the target
/// more than once, any one crossing may be returned.
///
/// # Errors
///
/// Returns [`CrossingError::NotReached`] if the target is not bracketed,
/// [`CrossingError::Simulate`] if a simulation fails, and
/// [`CrossingError::MaxIters`] if bisection does not converge.
pub fn time_to_interior_temperature(
    params: &ZoneParameters,
    initial: ZoneState,
    target: ThermodynamicTemperature,
    horizon: Constrained<Time, StrictlyPositive>,
    config: &CrossingConfig,
) -> Result<Time, CrossingError> {
    let horizon = horizon.into_inner();

    let start_residual = initial.interior.minus(target);
    if start_residual == TemperatureInterval::ZERO {
        return Ok(Time::ZERO);
    }

    let model = ElapsedModel::new(params, initial, config.ode);

    let end = model.call(&horizon)?.state;
    let end_residual = end.interior.minus(target);
    if end_residual == TemperatureInterval::ZERO {
        return Ok(horizon);
    }

    let start_sign = start_residual.get::<delta_kelvin>().signum();
    let end_sign = end_residual.get::<delta_kelvin>().signum();
    if start_sign == end_sign {
        return Err(CrossingError::NotReached {
            final_interior: end.interior,
            horizon,
        });
    }

    let problem = InteriorTargetProblem::new(target);

    let solution = bisection::solve(
        &model,
        &problem,
        [0.0, horizon.get::<second>()],
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| -> Option<bisection::Action> {
            if event.result().is_err() {
                debug!("interior crossing search: simulation failed during bisection");
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(CrossingError::MaxIters {
            residual: TemperatureInterval::new::<delta_kelvin>(solution.residual),
            iters: solution.iters,
        });
    }

    debug!(
        "interior crossing found after {} bisection iterations",
        solution.iters
    );

    Ok(solution.snapshot.output.time)
}
