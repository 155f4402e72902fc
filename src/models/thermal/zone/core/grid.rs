use thiserror::Error;
use uom::si::{f64::Time, time::second};

/// Errors from constructing a [`TimeGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimeGridError {
    #[error("time grid has no samples")]
    Empty,

    #[error("time grid sample {index} is not finite")]
    NonFinite { index: usize },

    #[error("time grid sample {index} precedes the one before it")]
    Decreasing { index: usize },
}

/// Ordered sample times at which a zone trajectory is reported.
///
/// The first sample is the initial time. Samples are finite and
/// non-decreasing.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<Time>,
}

impl TimeGrid {
    /// Creates a grid from explicit sample times.
    ///
    /// # Errors
    ///
    /// Returns a [`TimeGridError`] if `times` is empty, contains a non-finite
    /// value, or is not in non-decreasing order.
    pub fn new(times: Vec<Time>) -> Result<Self, TimeGridError> {
        if times.is_empty() {
            return Err(TimeGridError::Empty);
        }

        for (index, t) in times.iter().enumerate() {
            if !t.value.is_finite() {
                return Err(TimeGridError::NonFinite { index });
            }
            if index > 0 && *t < times[index - 1] {
                return Err(TimeGridError::Decreasing { index });
            }
        }

        Ok(Self { times })
    }

    /// Creates `count` evenly spaced samples from `start` to `end`, inclusive.
    ///
    /// A single sample sits at `start`.
    ///
    /// # Errors
    ///
    /// Returns a [`TimeGridError`] if `count` is zero, an endpoint is not
    /// finite, or `end` precedes `start`.
    pub fn linspace(start: Time, end: Time, count: usize) -> Result<Self, TimeGridError> {
        if count == 0 {
            return Err(TimeGridError::Empty);
        }
        if !start.value.is_finite() {
            return Err(TimeGridError::NonFinite { index: 0 });
        }
        if !end.value.is_finite() {
            return Err(TimeGridError::NonFinite { index: count - 1 });
        }
        if count > 1 && end < start {
            return Err(TimeGridError::Decreasing { index: 1 });
        }

        Ok(Self {
            times: linspace_seconds(start.get::<second>(), end.get::<second>(), count)
                .into_iter()
                .map(|t| Time::new::<second>(t))
                .collect(),
        })
    }

    /// The reference horizon: 100 evenly spaced samples from 0 to 1000 s.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            times: linspace_seconds(0.0, 1000.0, 100)
                .into_iter()
                .map(|t| Time::new::<second>(t))
                .collect(),
        }
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`; a grid holds at least one sample.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the first sample time.
    #[must_use]
    pub fn start(&self) -> Time {
        self.times[0]
    }

    /// Returns the last sample time.
    #[must_use]
    pub fn end(&self) -> Time {
        self.times[self.times.len() - 1]
    }

    /// Returns the sample times.
    #[must_use]
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Returns the sample times in seconds.
    #[must_use]
    pub fn seconds(&self) -> Vec<f64> {
        self.times.iter().map(|t| t.get::<second>()).collect()
    }
}

#[allow(clippy::cast_precision_loss)]
fn linspace_seconds(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count == 1 {
        return vec![start];
    }

    let step = (end - start) / (count - 1) as f64;
    let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
    values[count - 1] = end;
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::thermal::zone::core::test_support::seconds;

    #[test]
    fn reference_grid() {
        let grid = TimeGrid::reference();

        assert_eq!(grid.len(), 100);
        assert_eq!(grid.start(), seconds(0.0));
        assert_eq!(grid.end(), seconds(1000.0));
        assert_relative_eq!(grid.seconds()[1], 1000.0 / 99.0);
        assert_eq!(
            grid,
            TimeGrid::linspace(seconds(0.0), seconds(1000.0), 100).unwrap()
        );
    }

    #[test]
    fn linspace_single_sample() {
        let grid = TimeGrid::linspace(seconds(5.0), seconds(10.0), 1).unwrap();
        assert_eq!(grid.seconds(), vec![5.0]);
    }

    #[test]
    fn linspace_rejects_bad_inputs() {
        assert_eq!(
            TimeGrid::linspace(seconds(0.0), seconds(1.0), 0),
            Err(TimeGridError::Empty)
        );
        assert_eq!(
            TimeGrid::linspace(seconds(10.0), seconds(0.0), 5),
            Err(TimeGridError::Decreasing { index: 1 })
        );
        assert_eq!(
            TimeGrid::linspace(seconds(0.0), seconds(f64::INFINITY), 5),
            Err(TimeGridError::NonFinite { index: 4 })
        );
    }

    #[test]
    fn explicit_grid_validation() {
        assert_eq!(TimeGrid::new(vec![]), Err(TimeGridError::Empty));
        assert_eq!(
            TimeGrid::new(vec![seconds(0.0), seconds(f64::NAN)]),
            Err(TimeGridError::NonFinite { index: 1 })
        );
        assert_eq!(
            TimeGrid::new(vec![seconds(0.0), seconds(2.0), seconds(1.0)]),
            Err(TimeGridError::Decreasing { index: 2 })
        );

        let repeated = TimeGrid::new(vec![seconds(0.0), seconds(1.0), seconds(1.0)]).unwrap();
        assert_eq!(repeated.len(), 3);
    }
}
