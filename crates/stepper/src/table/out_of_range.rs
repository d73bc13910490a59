/// What a [`PiecewiseLinearTable`] returns for times outside its range.
///
/// The policy is fixed when the table is built.
///
/// [`PiecewiseLinearTable`]: super::PiecewiseLinearTable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutOfRange {
    /// Return the value of the nearest endpoint.
    #[default]
    Clamp,

    /// Return [`TableError::Interpolation`](super::TableError::Interpolation).
    Error,
}

impl From<OutOfRange> for ninterp::interpolator::Extrapolate<f64> {
    fn from(value: OutOfRange) -> Self {
        match value {
            OutOfRange::Clamp => ninterp::interpolator::Extrapolate::Clamp,
            OutOfRange::Error => ninterp::interpolator::Extrapolate::Error,
        }
    }
}
