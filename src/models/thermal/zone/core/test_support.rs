use uom::si::{f64::Time, time::second};

use super::ZoneState;

/// Initial state of the reference scenario: 20 °C interior, 18 °C structure.
pub(super) fn reference_initial() -> ZoneState {
    ZoneState::from_celsius(20.0, 18.0)
}

pub(super) fn seconds(value: f64) -> Time {
    Time::new::<second>(value)
}
