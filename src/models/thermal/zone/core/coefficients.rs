use uom::si::{
    heat_capacity::joule_per_kelvin, power::watt, thermodynamic_temperature::degree_celsius,
};

use super::ZoneParameters;

/// The node balances reduced to affine form in °C and seconds:
///
/// ```text
/// dTint/dt = interior_gain   · Tint + interior_offset
/// dTs/dt   = structure_gain  · Tint + structure_offset
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Coefficients {
    pub(super) interior_gain: f64,
    pub(super) interior_offset: f64,
    pub(super) structure_gain: f64,
    pub(super) structure_offset: f64,
}

impl Coefficients {
    pub(super) fn new(params: &ZoneParameters) -> Self {
        let c_res = params.capacitances.interior().get::<joule_per_kelvin>();
        let c_s = params.capacitances.structure().get::<joule_per_kelvin>();

        // SI values, K/W.
        let r_i = params.resistances.interior().value;
        let r_o = params.resistances.exterior().value;
        let r_f = params.resistances.window().value;

        let t_ext = params.exterior_temperature.get::<degree_celsius>();
        let q_res = params.gains.interior.get::<watt>();
        let q_s = params.gains.solar.get::<watt>();

        Self {
            interior_gain: (1.0 / c_res) * (1.0 / r_i + 1.0 / r_o),
            interior_offset: (1.0 / c_res) * ((1.0 / r_f) * t_ext + q_res),
            structure_gain: (1.0 / c_s) * (1.0 / r_i),
            structure_offset: (1.0 / c_s) * ((1.0 / r_o) * t_ext + q_s),
        }
    }

    /// Node temperature rates in °C/s for `[Tint, Ts]` in °C.
    pub(super) fn rates(&self, [interior, _structure]: &[f64; 2]) -> [f64; 2] {
        [
            self.interior_gain * interior + self.interior_offset,
            self.structure_gain * interior + self.structure_offset,
        ]
    }
}
