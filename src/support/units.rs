//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical units (e.g., temperature, power,
//! heat capacity). This module provides the quantities and helpers that
//! lumped RC thermal networks need but [`uom`] does not ship.
//!
//! ## Thermal resistance
//!
//! [`ThermalResistance`] is the reciprocal of [`uom`]'s thermal conductance,
//! in K/W. It falls out of dividing a temperature interval by a power:
//!
//! ```
//! use uom::si::{
//!     f64::{Power, TemperatureInterval},
//!     power::watt,
//!     temperature_interval::kelvin,
//! };
//! use twine_zone::support::units::{ThermalResistance, thermal_resistance};
//!
//! let r: ThermalResistance =
//!     TemperatureInterval::new::<kelvin>(10.0) / Power::new::<watt>(2.0);
//! assert_eq!(r, thermal_resistance(5.0));
//! ```
//!
//! ## Temperature differences
//!
//! The [`TemperatureDifference`] trait subtracts one absolute temperature from
//! another to get a [`TemperatureInterval`](uom::si::f64::TemperatureInterval).

mod quantities;
mod temperature_difference;

pub use quantities::{
    TemperatureRate, ThermalResistance, kelvin_per_second, temperature_rate, thermal_resistance,
};
pub use temperature_difference::TemperatureDifference;
