//! Problem formulation for the interior crossing search.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::{
    ConstZero,
    si::{
        f64::{ThermodynamicTemperature, Time},
        temperature_interval::kelvin as delta_kelvin,
        time::second,
    },
};

use crate::models::thermal::zone::core::{
    Sample, SimulateError, TimeGrid, ZoneParameters, ZoneState, simulate,
};
use crate::support::{
    ode::{OdeConfig, OdeError},
    units::TemperatureDifference,
};

/// Model adapter exposing elapsed time as the sole input.
///
/// Each call simulates the zone from its initial state and returns the sample
/// at the given time.
pub(super) struct ElapsedModel<'a> {
    params: &'a ZoneParameters,
    initial: ZoneState,
    ode: OdeConfig,
}

impl<'a> ElapsedModel<'a> {
    pub(super) fn new(params: &'a ZoneParameters, initial: ZoneState, ode: OdeConfig) -> Self {
        Self {
            params,
            initial,
            ode,
        }
    }
}

impl Model for ElapsedModel<'_> {
    type Input = Time;
    type Output = Sample;
    type Error = SimulateError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let initial = Sample {
            time: *input,
            state: self.initial,
        };
        if input.get::<second>() <= 0.0 {
            return Ok(initial);
        }

        let grid = TimeGrid::new(vec![Time::ZERO, *input])
            .map_err(|_| OdeError::NonFiniteTime { index: 1 })?;
        let trajectory = simulate(self.params, self.initial, &grid, &self.ode)?;

        Ok(trajectory.last().copied().unwrap_or(initial))
    }
}

/// Equation problem definition for an interior temperature target.
///
/// Computes the residual as `interior - target`.
pub(super) struct InteriorTargetProblem {
    target: ThermodynamicTemperature,
}

impl InteriorTargetProblem {
    pub(super) fn new(target: ThermodynamicTemperature) -> Self {
        Self { target }
    }
}

impl EquationProblem<1> for InteriorTargetProblem {
    type Input = Time;
    type Output = Sample;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(Time::new::<second>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.state.interior.minus(self.target).get::<delta_kelvin>()])
    }
}
