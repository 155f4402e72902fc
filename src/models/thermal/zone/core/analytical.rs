use uom::si::{f64::Time, time::second};

use super::{Coefficients, ZoneParameters, ZoneState};

/// Closed-form zone state after `elapsed` time from `initial`.
///
/// The interior balance depends only on the interior temperature, so it
/// solves as a scalar exponential; the structural temperature follows by
/// integrating the interior solution.
///
/// With `a`, `b` the interior gain and offset and `c`, `d` the structural
/// ones:
///
/// ```text
/// Tint(t) = T0 + (T0 + b/a) · expm1(a·t)
/// Ts(t)   = Ts0 + c · [ (T0 + b/a) · expm1(a·t) / a − (b/a) · t ] + d · t
/// ```
///
/// When `a` is zero the interior temperature is linear in time instead.
#[must_use]
pub fn analytical(params: &ZoneParameters, initial: ZoneState, elapsed: Time) -> ZoneState {
    let Coefficients {
        interior_gain: a,
        interior_offset: b,
        structure_gain: c,
        structure_offset: d,
    } = Coefficients::new(params);

    let [t_int_0, t_s_0] = initial.to_celsius();
    let t = elapsed.get::<second>();

    let (t_int, t_int_integral) = if a == 0.0 {
        (t_int_0 + b * t, t_int_0 * t + 0.5 * b * t * t)
    } else {
        let shifted = t_int_0 + b / a;
        let growth = (a * t).exp_m1();
        (
            t_int_0 + shifted * growth,
            shifted * growth / a - (b / a) * t,
        )
    };

    ZoneState::from_celsius(t_int, t_s_0 + c * t_int_integral + d * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::degree_celsius;

    use crate::models::thermal::zone::core::{
        derivative,
        test_support::{reference_initial, seconds},
    };
    use crate::support::units::{kelvin_per_second, thermal_resistance};

    #[test]
    fn zero_elapsed_is_initial_state() {
        let params = ZoneParameters::reference();
        let state = analytical(&params, reference_initial(), seconds(0.0));

        assert_relative_eq!(state.interior.get::<degree_celsius>(), 20.0, epsilon = 1e-12);
        assert_relative_eq!(state.structure.get::<degree_celsius>(), 18.0, epsilon = 1e-12);
    }

    #[test]
    fn slope_matches_derivative() {
        let params = ZoneParameters::reference();
        let initial = reference_initial();

        let t = 500.0;
        let dt = 1e-2;
        let before = analytical(&params, initial, seconds(t - dt)).to_celsius();
        let after = analytical(&params, initial, seconds(t + dt)).to_celsius();
        let at = analytical(&params, initial, seconds(t));

        let rates = derivative(&at, seconds(t), &params);

        assert_relative_eq!(
            (after[0] - before[0]) / (2.0 * dt),
            kelvin_per_second(rates.interior),
            max_relative = 1e-6
        );
        assert_relative_eq!(
            (after[1] - before[1]) / (2.0 * dt),
            kelvin_per_second(rates.structure),
            max_relative = 1e-6
        );
    }

    #[test]
    fn infinite_resistances_give_linear_heating() {
        let mut params = ZoneParameters::reference();
        params.resistances = crate::models::thermal::zone::core::Resistances::new_unchecked(
            thermal_resistance(f64::INFINITY),
            thermal_resistance(f64::INFINITY),
            thermal_resistance(3.0),
        );

        let state = analytical(&params, reference_initial(), seconds(100.0));

        // Only the window path and the gains remain.
        let rate = (10.0 / 3.0 + 5000.0) / 1.0e6;
        assert_relative_eq!(
            state.interior.get::<degree_celsius>(),
            20.0 + rate * 100.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            state.structure.get::<degree_celsius>(),
            18.0 + 2000.0 / 5.0e5 * 100.0,
            max_relative = 1e-12
        );
    }
}
