use std::error::Error as StdError;

use diffsol::error::{DiffsolError, OdeSolverError};
use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Errors that can occur while integrating an initial value problem.
///
/// Times are in the units of the independent variable passed to
/// [`solve`](super::solve).
#[derive(Debug, Error)]
pub enum OdeError {
    /// No output times were requested.
    #[error("no output times requested")]
    EmptyTimes,

    /// An output time is NaN or infinite.
    #[error("output time at index {index} is not finite")]
    NonFiniteTime { index: usize },

    /// Output times are not in non-decreasing order.
    #[error("output time at index {index} precedes the one before it")]
    DecreasingTimes { index: usize },

    /// A field of [`OdeConfig`](super::OdeConfig) is out of range.
    #[error("invalid integrator setting: {setting}")]
    InvalidConfig {
        setting: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// The derivative or the integrated state became NaN or infinite.
    #[error("non-finite value encountered at t={time}")]
    NonFinite { time: f64 },

    /// The solver shrank the step below what it can resolve.
    #[error("step size underflow at t={time}")]
    StepSizeUnderflow { time: f64 },

    /// The step budget ran out before reaching the last output time.
    #[error("step limit reached at t={time} after {steps} steps")]
    MaxSteps { time: f64, steps: usize },

    /// Any other failure reported by the BDF solver.
    #[error("solver failed at t={time}")]
    Solver {
        time: f64,
        #[source]
        source: DiffsolError,
    },

    /// The model failed to evaluate.
    #[error("model error: {0}")]
    Model(#[source] Box<dyn StdError + Send + Sync>),

    /// The problem failed to map between model and state.
    #[error("problem error: {0}")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),
}

impl OdeError {
    /// Returns the time at which integration stopped, if it had started.
    #[must_use]
    pub fn time(&self) -> Option<f64> {
        match self {
            Self::NonFinite { time }
            | Self::StepSizeUnderflow { time }
            | Self::MaxSteps { time, .. }
            | Self::Solver { time, .. } => Some(*time),
            Self::EmptyTimes
            | Self::NonFiniteTime { .. }
            | Self::DecreasingTimes { .. }
            | Self::InvalidConfig { .. }
            | Self::Model(_)
            | Self::Problem(_) => None,
        }
    }

    pub(super) fn model<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Model(Box::new(err))
    }

    pub(super) fn problem<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Problem(Box::new(err))
    }

    /// Wraps a solver failure, lifting step size underflow into its own variant.
    pub(super) fn solver(time: f64, source: DiffsolError) -> Self {
        match source {
            DiffsolError::OdeSolverError(OdeSolverError::StepSizeTooSmall { time }) => {
                Self::StepSizeUnderflow { time }
            }
            source => Self::Solver { time, source },
        }
    }
}
