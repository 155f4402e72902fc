use uom::si::f64::Time;

use super::{Coefficients, ZoneDerivative, ZoneParameters, ZoneState};

/// Evaluates the node balances at `state`.
///
/// The balances are autonomous; `time` is accepted so the signature matches
/// an integrator's right-hand side and is otherwise unused. No validation is
/// performed: degenerate parameters yield non-finite rates.
#[must_use]
pub fn derivative(state: &ZoneState, _time: Time, params: &ZoneParameters) -> ZoneDerivative {
    Coefficients::new(params).rates(&state.to_celsius()).into()
}
