use uom::si::{f64::Time, time::second};

/// A fixed-size view of a state, derivative, or step as plain `f64`s.
///
/// [`solve`](super::solve) hands these arrays to the BDF solver and rebuilds
/// typed values from them at every evaluation. Implementations fix the units
/// of each component, and `from_array(x.to_array())` must reproduce `x`.
pub trait OdeVector<const N: usize>: Sized {
    fn to_array(&self) -> [f64; N];

    fn from_array(values: [f64; N]) -> Self;
}

impl OdeVector<1> for f64 {
    fn to_array(&self) -> [f64; 1] {
        [*self]
    }

    fn from_array([value]: [f64; 1]) -> Self {
        value
    }
}

/// Time in seconds.
impl OdeVector<1> for Time {
    fn to_array(&self) -> [f64; 1] {
        [self.get::<second>()]
    }

    fn from_array([seconds]: [f64; 1]) -> Self {
        Time::new::<second>(seconds)
    }
}
