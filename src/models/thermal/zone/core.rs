//! Two-node zone balances and their solution over time.
//!
//! The interior node (air and furnishings) and the structural node (walls)
//! each carry one lumped thermal capacitance. With `Tint` and `Ts` in °C,
//! the node balances are
//!
//! ```text
//! dTint/dt = (1/Cres) · [ (1/Ri + 1/Ro)·Tint + (1/Rf)·Text + Qres ]
//! dTs/dt   = (1/Cs)   · [ (1/Ri)·Tint      + (1/Ro)·Text + Qs   ]
//! ```
//!
//! Temperatures enter the balances as Celsius readings, not as differences,
//! so the interior node has no term pulling it toward the exterior
//! temperature. With positive resistances and gains the interior
//! temperature grows without bound.

mod analytical;
mod coefficients;
mod crossing;
mod derivative;
mod grid;
mod model;
mod parameters;
mod simulate;
mod state;
mod trajectory;

#[cfg(test)]
mod test_support;

pub use analytical::analytical;
pub use crossing::{CrossingConfig, CrossingError, time_to_interior_temperature};
pub use derivative::derivative;
pub use grid::{TimeGrid, TimeGridError};
pub use model::{ZoneInput, ZoneModel, ZoneProblem};
pub use parameters::{Capacitances, HeatGains, ParameterError, Resistances, ZoneParameters};
pub use simulate::{SimulateError, simulate};
pub use state::{ZoneDerivative, ZoneState};
pub use trajectory::{Sample, Trajectory};

use coefficients::Coefficients;
