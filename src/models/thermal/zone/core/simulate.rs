use log::debug;
use thiserror::Error;

use crate::support::ode::{self, OdeConfig, OdeError};

use super::{
    Sample, TimeGrid, Trajectory, ZoneInput, ZoneModel, ZoneParameters, ZoneProblem, ZoneState,
};

/// Errors that can occur while simulating a zone.
#[derive(Debug, Error)]
pub enum SimulateError {
    /// The integrator could not produce a finite solution.
    ///
    /// Typically caused by invalid integrator settings, degenerate parameters
    /// (a zero capacitance or resistance), or a step limit too small for the
    /// tolerances.
    #[error("zone integration failed")]
    Integration(#[from] OdeError),
}

/// Integrates the zone from `initial` and reports its state at each grid sample.
///
/// The [`ZoneModel`] is driven through [`ZoneProblem`] by the BDF integrator
/// in [`ode`]. The first sample of the returned trajectory is `initial` at the
/// first grid time, exactly. The grid's first sample is the initial time.
///
/// # Errors
///
/// Returns [`SimulateError::Integration`] if the integrator fails. No partial
/// trajectory is returned.
pub fn simulate(
    params: &ZoneParameters,
    initial: ZoneState,
    grid: &TimeGrid,
    config: &OdeConfig,
) -> Result<Trajectory, SimulateError> {
    let model = ZoneModel::new(*params);
    let start = ZoneInput {
        time: grid.start(),
        state: initial,
    };

    let solution = ode::solve::<_, _, 2>(&model, &ZoneProblem, start, &grid.seconds(), config)?;

    debug!(
        "zone simulated over {} samples: {} steps, {} error test failures, {} newton iterations",
        grid.len(),
        solution.stats.steps,
        solution.stats.error_test_failures,
        solution.stats.nonlinear_iterations,
    );

    let samples = grid
        .times()
        .iter()
        .zip(solution.history)
        .map(|(&time, snapshot)| Sample {
            time,
            state: snapshot.input.state,
        })
        .collect();

    Ok(Trajectory::new(samples))
}
