use thiserror::Error;
use uom::si::{
    f64::{HeatCapacity, Power, ThermodynamicTemperature},
    heat_capacity::joule_per_kelvin,
    power::watt,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::{
    constraint::{ConstraintError, StrictlyPositive},
    units::{ThermalResistance, thermal_resistance},
};

/// Physical parameters of a two-node zone.
///
/// Parameters are fixed for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneParameters {
    /// Thermal capacitances of the interior and structural nodes.
    pub capacitances: Capacitances,

    /// Resistances coupling the nodes and the exterior.
    pub resistances: Resistances,

    /// Exterior ambient temperature.
    pub exterior_temperature: ThermodynamicTemperature,

    /// Heat injected into the nodes.
    pub gains: HeatGains,
}

impl ZoneParameters {
    /// Parameters of the reference zone.
    ///
    /// | Parameter                | Value     |
    /// |--------------------------|-----------|
    /// | Interior capacitance     | 1e6 J/K   |
    /// | Structural capacitance   | 5e5 J/K   |
    /// | Interior resistance      | 5 K/W     |
    /// | Exterior resistance      | 10 K/W    |
    /// | Window resistance        | 3 K/W     |
    /// | Exterior temperature     | 10 °C     |
    /// | Interior heat gain       | 5000 W    |
    /// | Solar heat gain          | 2000 W    |
    #[must_use]
    pub fn reference() -> Self {
        Self {
            capacitances: Capacitances::new_unchecked(
                HeatCapacity::new::<joule_per_kelvin>(1.0e6),
                HeatCapacity::new::<joule_per_kelvin>(5.0e5),
            ),
            resistances: Resistances::new_unchecked(
                thermal_resistance(5.0),
                thermal_resistance(10.0),
                thermal_resistance(3.0),
            ),
            exterior_temperature: ThermodynamicTemperature::new::<degree_celsius>(10.0),
            gains: HeatGains {
                interior: Power::new::<watt>(5000.0),
                solar: Power::new::<watt>(2000.0),
            },
        }
    }
}

/// A parameter failed its precondition check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid {parameter}")]
pub struct ParameterError {
    /// Name of the offending parameter.
    pub parameter: &'static str,

    /// The violated constraint.
    #[source]
    pub source: ConstraintError,
}

impl ParameterError {
    fn check<T>(parameter: &'static str, value: T) -> Result<T, Self>
    where
        T: PartialOrd + num_traits::Zero,
    {
        StrictlyPositive::new(value)
            .map(|v| v.into_inner())
            .map_err(|source| Self { parameter, source })
    }
}

/// Lumped thermal capacitances of the two nodes.
///
/// Each capacitance is guaranteed to be strictly positive unless built with
/// [`Capacitances::new_unchecked`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capacitances {
    interior: HeatCapacity,
    structure: HeatCapacity,
}

impl Capacitances {
    /// Constructs validated capacitances.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] naming the first capacitance that is not
    /// strictly positive.
    pub fn new(interior: HeatCapacity, structure: HeatCapacity) -> Result<Self, ParameterError> {
        Ok(Self {
            interior: ParameterError::check("interior capacitance", interior)?,
            structure: ParameterError::check("structural capacitance", structure)?,
        })
    }

    /// Constructs capacitances without validation.
    ///
    /// # Warning
    ///
    /// A zero or negative capacitance produces non-finite or nonphysical
    /// derivatives, which surface later as an integration failure.
    #[must_use]
    pub fn new_unchecked(interior: HeatCapacity, structure: HeatCapacity) -> Self {
        Self {
            interior,
            structure,
        }
    }

    /// Returns the interior node capacitance.
    #[must_use]
    pub fn interior(&self) -> HeatCapacity {
        self.interior
    }

    /// Returns the structural node capacitance.
    #[must_use]
    pub fn structure(&self) -> HeatCapacity {
        self.structure
    }
}

/// Thermal resistances of the zone network.
///
/// Each resistance is guaranteed to be strictly positive unless built with
/// [`Resistances::new_unchecked`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resistances {
    interior: ThermalResistance,
    exterior: ThermalResistance,
    window: ThermalResistance,
}

impl Resistances {
    /// Constructs validated resistances.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] naming the first resistance that is not
    /// strictly positive.
    pub fn new(
        interior: ThermalResistance,
        exterior: ThermalResistance,
        window: ThermalResistance,
    ) -> Result<Self, ParameterError> {
        Ok(Self {
            interior: ParameterError::check("interior resistance", interior)?,
            exterior: ParameterError::check("exterior resistance", exterior)?,
            window: ParameterError::check("window resistance", window)?,
        })
    }

    /// Constructs resistances without validation.
    ///
    /// # Warning
    ///
    /// A zero resistance produces infinite derivatives, which surface later
    /// as an integration failure.
    #[must_use]
    pub fn new_unchecked(
        interior: ThermalResistance,
        exterior: ThermalResistance,
        window: ThermalResistance,
    ) -> Self {
        Self {
            interior,
            exterior,
            window,
        }
    }

    /// Returns the resistance between the interior and structural nodes.
    #[must_use]
    pub fn interior(&self) -> ThermalResistance {
        self.interior
    }

    /// Returns the resistance between the structure and the exterior.
    #[must_use]
    pub fn exterior(&self) -> ThermalResistance {
        self.exterior
    }

    /// Returns the window and infiltration resistance.
    #[must_use]
    pub fn window(&self) -> ThermalResistance {
        self.window
    }
}

/// Heat injected into each node.
///
/// Gains may be negative (heat extraction).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatGains {
    /// Heat injected into the interior node (e.g., heating, occupants).
    pub interior: Power,

    /// Solar heat absorbed by the structural node.
    pub solar: Power,
}
