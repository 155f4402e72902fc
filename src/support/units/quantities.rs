use uom::{
    si::{
        ISQ, Quantity, SI,
        f64::{Power, TemperatureInterval, Time},
        power::watt,
        temperature_interval::kelvin as delta_kelvin,
        time::second,
    },
    typenum::{N1, N2, P1, P3, Z0},
};

/// Thermal resistance, K/W in SI.
pub type ThermalResistance = Quantity<ISQ<N2, N1, P3, Z0, P1, Z0, Z0>, SI<f64>, f64>;

/// Rate of temperature change, K/s in SI.
pub type TemperatureRate = Quantity<ISQ<Z0, Z0, N1, Z0, P1, Z0, Z0>, SI<f64>, f64>;

/// Creates a [`ThermalResistance`] from a value in K/W.
#[must_use]
pub fn thermal_resistance(kelvin_per_watt: f64) -> ThermalResistance {
    TemperatureInterval::new::<delta_kelvin>(kelvin_per_watt) / Power::new::<watt>(1.0)
}

/// Creates a [`TemperatureRate`] from a value in K/s.
#[must_use]
pub fn temperature_rate(kelvin_per_second: f64) -> TemperatureRate {
    TemperatureInterval::new::<delta_kelvin>(kelvin_per_second) / Time::new::<second>(1.0)
}

/// Returns the value of a [`TemperatureRate`] in K/s.
///
/// A Celsius degree per second is the same rate.
#[must_use]
pub fn kelvin_per_second(rate: TemperatureRate) -> f64 {
    rate.value
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::ThermalConductance, thermal_conductance::watt_per_kelvin};

    #[test]
    fn resistance_is_reciprocal_conductance() {
        let r = thermal_resistance(4.0);
        let ua = ThermalConductance::new::<watt_per_kelvin>(0.25);

        let product = r * ua;
        assert_relative_eq!(product.value, 1.0);
    }

    #[test]
    fn rate_times_time_is_interval() {
        let rate = temperature_rate(0.005);
        let dt = Time::new::<second>(200.0);

        // The product carries kelvin, but not the temperature kind marker.
        let delta = rate * dt;
        assert_relative_eq!(delta.value, 1.0, epsilon = 1e-12);
        assert_relative_eq!(kelvin_per_second(rate), 0.005);
    }
}
