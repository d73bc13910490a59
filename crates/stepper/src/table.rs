//! Piecewise-linear time tables.
//!
//! A [`PiecewiseLinearTable`] maps time to a value by linear interpolation
//! between `(time, value)` entries. In table mode the controller reads its next
//! step size from one; a table of `(time, value)` pairs also works as a
//! [`LimitingFunction`] whose knots are the table times.

mod error;
mod out_of_range;

use std::fmt;

use cadence_core::LimitingFunction;
use ndarray::Array1;
use ninterp::prelude::{Interp1DOwned, Interpolator};

pub use error::TableError;
pub use out_of_range::OutOfRange;

/// Linear interpolation over strictly increasing times.
///
/// # Examples
///
/// ```
/// use cadence_stepper::table::{OutOfRange, PiecewiseLinearTable};
///
/// let table = PiecewiseLinearTable::new(
///     vec![0.0, 10.0, 20.0],
///     vec![1.0, 2.0, 2.0],
///     OutOfRange::Clamp,
/// ).unwrap();
///
/// assert_eq!(table.value_at(5.0).unwrap(), 1.5);
/// assert_eq!(table.value_at(30.0).unwrap(), 2.0);
/// ```
pub struct PiecewiseLinearTable {
    interp: Interp1DOwned<f64, ninterp::strategy::Linear>,
    times: Vec<f64>,
    values: Vec<f64>,
    out_of_range: OutOfRange,
}

impl PiecewiseLinearTable {
    /// Creates a table from parallel `times` and `values`.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if the lengths differ, there are fewer than two
    /// entries, any entry is non-finite, or the times are not strictly
    /// increasing.
    pub fn new(
        times: Vec<f64>,
        values: Vec<f64>,
        out_of_range: OutOfRange,
    ) -> Result<Self, TableError> {
        validate(&times, &values)?;

        let interp = Interp1DOwned::new(
            Array1::from(times.clone()),
            Array1::from(values.clone()),
            ninterp::strategy::Linear,
            out_of_range.into(),
        )?;

        Ok(Self {
            interp,
            times,
            values,
            out_of_range,
        })
    }

    /// Creates a table from `(time, value)` pairs.
    ///
    /// # Errors
    ///
    /// Same as [`PiecewiseLinearTable::new`].
    pub fn from_pairs<I>(pairs: I, out_of_range: OutOfRange) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (times, values) = pairs.into_iter().unzip();
        Self::new(times, values, out_of_range)
    }

    /// Returns the interpolated value at `time`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Interpolation`] if `time` lies outside the table
    /// and the policy is [`OutOfRange::Error`].
    pub fn value_at(&self, time: f64) -> Result<f64, TableError> {
        self.interp.interpolate(&[time]).map_err(Into::into)
    }

    /// Returns the table times in increasing order.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the table values, parallel to [`times`](Self::times).
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the out-of-range policy fixed at construction.
    #[must_use]
    pub fn out_of_range(&self) -> OutOfRange {
        self.out_of_range
    }

    /// Checks that every value can be used as a step size.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::NonPositiveStep`] for the first value `<= 0`.
    pub fn validate_steps(&self) -> Result<(), TableError> {
        match self
            .times
            .iter()
            .zip(&self.values)
            .find(|&(_, &value)| value <= 0.0)
        {
            Some((&time, &value)) => Err(TableError::NonPositiveStep { time, value }),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for PiecewiseLinearTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PiecewiseLinearTable")
            .field("times", &self.times)
            .field("values", &self.values)
            .field("out_of_range", &self.out_of_range)
            .finish_non_exhaustive()
    }
}

/// A table used as a limiting function.
///
/// Out-of-range queries on an [`OutOfRange::Error`] table evaluate to `NaN`,
/// which the limiter treats as an unacceptable change.
impl LimitingFunction for PiecewiseLinearTable {
    fn value(&self, time: f64) -> f64 {
        self.value_at(time).unwrap_or(f64::NAN)
    }

    fn knots(&self) -> &[f64] {
        &self.times
    }
}

fn validate(times: &[f64], values: &[f64]) -> Result<(), TableError> {
    if times.len() != values.len() {
        return Err(TableError::LengthMismatch {
            times: times.len(),
            values: values.len(),
        });
    }

    if times.len() < 2 {
        return Err(TableError::TooFewEntries { len: times.len() });
    }

    if let Some(index) = times
        .iter()
        .zip(values)
        .position(|(t, v)| !t.is_finite() || !v.is_finite())
    {
        return Err(TableError::NonFinite {
            index,
            time: times[index],
            value: values[index],
        });
    }

    if let Some(index) = times.windows(2).position(|pair| pair[1] <= pair[0]) {
        return Err(TableError::NotIncreasing {
            index: index + 1,
            previous: times[index],
            time: times[index + 1],
        });
    }

    Ok(())
}
