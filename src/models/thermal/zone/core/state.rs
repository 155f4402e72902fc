use twine_core::StepIntegrable;
use uom::si::{
    f64::{ThermodynamicTemperature, Time},
    thermodynamic_temperature::degree_celsius,
    time::second,
};

use crate::support::{
    ode::OdeVector,
    units::{TemperatureRate, kelvin_per_second, temperature_rate},
};

/// Instantaneous temperatures of the two zone nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneState {
    /// Interior (air) node temperature.
    pub interior: ThermodynamicTemperature,

    /// Structural (wall) node temperature.
    pub structure: ThermodynamicTemperature,
}

impl ZoneState {
    /// Creates a state from node temperatures in °C.
    #[must_use]
    pub fn from_celsius(interior: f64, structure: f64) -> Self {
        Self {
            interior: ThermodynamicTemperature::new::<degree_celsius>(interior),
            structure: ThermodynamicTemperature::new::<degree_celsius>(structure),
        }
    }

    /// Returns `[interior, structure]` in °C.
    #[must_use]
    pub fn to_celsius(&self) -> [f64; 2] {
        [
            self.interior.get::<degree_celsius>(),
            self.structure.get::<degree_celsius>(),
        ]
    }
}

impl From<[f64; 2]> for ZoneState {
    fn from([interior, structure]: [f64; 2]) -> Self {
        Self::from_celsius(interior, structure)
    }
}

/// `[interior, structure]` in °C.
impl OdeVector<2> for ZoneState {
    fn to_array(&self) -> [f64; 2] {
        self.to_celsius()
    }

    fn from_array(values: [f64; 2]) -> Self {
        Self::from(values)
    }
}

impl StepIntegrable<Time> for ZoneState {
    type Derivative = ZoneDerivative;

    fn step(&self, derivative: ZoneDerivative, delta: Time) -> Self {
        let dt = delta.get::<second>();
        let [interior, structure] = self.to_celsius();
        Self::from_celsius(
            interior + kelvin_per_second(derivative.interior) * dt,
            structure + kelvin_per_second(derivative.structure) * dt,
        )
    }
}

/// Rates of change of the two node temperatures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneDerivative {
    pub interior: TemperatureRate,
    pub structure: TemperatureRate,
}

impl From<[f64; 2]> for ZoneDerivative {
    fn from([interior, structure]: [f64; 2]) -> Self {
        Self {
            interior: temperature_rate(interior),
            structure: temperature_rate(structure),
        }
    }
}

/// `[interior, structure]` in K/s.
impl OdeVector<2> for ZoneDerivative {
    fn to_array(&self) -> [f64; 2] {
        [
            kelvin_per_second(self.interior),
            kelvin_per_second(self.structure),
        ]
    }

    fn from_array(values: [f64; 2]) -> Self {
        Self::from(values)
    }
}
