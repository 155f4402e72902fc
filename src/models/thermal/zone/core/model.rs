use std::convert::Infallible;

use twine_core::{Model, OdeProblem};
use uom::si::f64::Time;

use super::{ZoneDerivative, ZoneParameters, ZoneState, derivative};

/// Input to [`ZoneModel`]: the zone state at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneInput {
    pub time: Time,
    pub state: ZoneState,
}

/// A [`Model`] mapping a zone state to its node temperature rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneModel {
    params: ZoneParameters,
}

impl ZoneModel {
    #[must_use]
    pub fn new(params: ZoneParameters) -> Self {
        Self { params }
    }

    #[must_use]
    pub fn params(&self) -> &ZoneParameters {
        &self.params
    }
}

impl Model for ZoneModel {
    type Input = ZoneInput;
    type Output = ZoneDerivative;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(derivative(&input.state, input.time, &self.params))
    }
}

/// Integrates both node temperatures of a [`ZoneModel`] over time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneProblem;

impl OdeProblem for ZoneProblem {
    type Input = ZoneInput;
    type Output = ZoneDerivative;
    type Delta = Time;
    type State = ZoneState;
    type Error = Infallible;

    fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error> {
        Ok(input.state)
    }

    fn derivative(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<ZoneDerivative, Self::Error> {
        Ok(*output)
    }

    fn build_input(
        &self,
        base: &Self::Input,
        state: &Self::State,
        delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error> {
        Ok(ZoneInput {
            time: base.time + *delta,
            state: *state,
        })
    }
}
