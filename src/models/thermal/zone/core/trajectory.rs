use uom::si::{f64::Time, thermodynamic_temperature::degree_celsius, time::second};

use super::ZoneState;

/// The zone state at one sample time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: Time,
    pub state: ZoneState,
}

/// Zone states at each sample of a [`TimeGrid`](super::TimeGrid), in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Vec<Sample>,
}

impl Trajectory {
    pub(super) fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the sample at the initial time.
    #[must_use]
    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    /// Returns the sample at the final time.
    #[must_use]
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Iterates over samples in time order.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Returns the samples.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Returns `(seconds, °C)` pairs for the interior node.
    #[must_use]
    pub fn interior_series(&self) -> Vec<(f64, f64)> {
        self.series(|state| state.interior.get::<degree_celsius>())
    }

    /// Returns `(seconds, °C)` pairs for the structural node.
    #[must_use]
    pub fn structure_series(&self) -> Vec<(f64, f64)> {
        self.series(|state| state.structure.get::<degree_celsius>())
    }

    fn series(&self, value: impl Fn(&ZoneState) -> f64) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| (s.time.get::<second>(), value(&s.state)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
