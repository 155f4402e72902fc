use crate::support::constraint::{Constrained, NonNegative, StrictlyPositive};

use super::OdeError;

/// Error control settings for [`solve`](super::solve).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OdeConfig {
    /// Relative tolerance on each state component.
    ///
    /// Must be non-negative.
    pub rel_tol: f64,

    /// Absolute tolerance on each state component.
    ///
    /// Must be strictly positive so the error scale never vanishes at a
    /// zero state.
    pub abs_tol: f64,

    /// Maximum number of solver steps. Must be at least one.
    pub max_steps: usize,
}

impl Default for OdeConfig {
    fn default() -> Self {
        Self {
            rel_tol: 1e-9,
            abs_tol: 1e-9,
            max_steps: 100_000,
        }
    }
}

impl OdeConfig {
    /// Returns a default configuration with the given tolerances.
    #[must_use]
    pub fn with_tolerances(
        rel_tol: Constrained<f64, NonNegative>,
        abs_tol: Constrained<f64, StrictlyPositive>,
    ) -> Self {
        Self {
            rel_tol: rel_tol.into_inner(),
            abs_tol: abs_tol.into_inner(),
            ..Self::default()
        }
    }

    /// Checks every setting before any work is done.
    ///
    /// # Errors
    ///
    /// Returns [`OdeError::InvalidConfig`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), OdeError> {
        NonNegative::new(self.rel_tol).map_err(|source| OdeError::InvalidConfig {
            setting: "relative tolerance",
            source,
        })?;
        StrictlyPositive::new(self.abs_tol).map_err(|source| OdeError::InvalidConfig {
            setting: "absolute tolerance",
            source,
        })?;
        StrictlyPositive::new(self.max_steps).map_err(|source| OdeError::InvalidConfig {
            setting: "step limit",
            source,
        })?;
        Ok(())
    }
}
