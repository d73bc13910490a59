use ninterp::error::{InterpolateError, ValidateError};
use thiserror::Error;

/// Errors that can occur when building or querying a [`PiecewiseLinearTable`].
///
/// [`PiecewiseLinearTable`]: super::PiecewiseLinearTable
#[derive(Debug, Error)]
pub enum TableError {
    #[error("table has {times} times but {values} values")]
    LengthMismatch { times: usize, values: usize },

    #[error("table needs at least two entries, got {len}")]
    TooFewEntries { len: usize },

    #[error("table entry {index} is not finite: ({time}, {value})")]
    NonFinite { index: usize, time: f64, value: f64 },

    #[error("table times must be strictly increasing: t[{index}] = {time} follows {previous}")]
    NotIncreasing {
        index: usize,
        previous: f64,
        time: f64,
    },

    #[error("table value at t = {time} must be positive to be used as a step, got {value}")]
    NonPositiveStep { time: f64, value: f64 },

    #[error(transparent)]
    Validation(#[from] ValidateError),

    #[error(transparent)]
    Interpolation(#[from] InterpolateError),
}
