use thiserror::Error;

/// Configuration for a [`Limiter`](super::Limiter).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LimiterConfig {
    /// Largest allowed change in the function's value over one step.
    pub max_change: f64,

    /// Maximum number of function evaluations spent searching for a shorter
    /// step, not counting the first probe at the full step.
    pub max_probes: usize,

    /// Relative tolerance that ends the search early.
    ///
    /// The search stops once a satisfying step uses at least
    /// `1 - search_tolerance` of `max_change`, or the search interval has
    /// shrunk to within `search_tolerance` of its upper end.
    pub search_tolerance: f64,

    /// Smallest step the limiter ever returns.
    ///
    /// The controller raises this to its `dt_min` when one is configured; at
    /// least one of the two must be set.
    pub floor: Option<f64>,

    /// Whether the function's knots become mandatory stopping times.
    pub force_knots: bool,
}

/// Errors that can occur when validating a [`LimiterConfig`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum LimiterConfigError {
    #[error("max_change must be finite and positive, got {0}")]
    MaxChange(f64),

    #[error("search_tolerance must be in (0, 1), got {0}")]
    SearchTolerance(f64),

    #[error("floor must be finite and positive, got {0}")]
    Floor(f64),

    #[error("limiter needs a floor step: set `floor` or the controller's `dt_min`")]
    MissingFloor,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            max_change: 1.0,
            max_probes: 50,
            search_tolerance: 1e-6,
            floor: None,
            force_knots: false,
        }
    }
}

impl LimiterConfig {
    /// Creates a config with the given maximum change and default search settings.
    #[must_use]
    pub fn new(max_change: f64) -> Self {
        Self {
            max_change,
            ..Self::default()
        }
    }

    /// Validates the allowed change, search tolerance, and floor.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is out of range.
    pub fn validate(&self) -> Result<(), LimiterConfigError> {
        if !self.max_change.is_finite() || self.max_change <= 0.0 {
            return Err(LimiterConfigError::MaxChange(self.max_change));
        }
        if !(self.search_tolerance > 0.0 && self.search_tolerance < 1.0) {
            return Err(LimiterConfigError::SearchTolerance(self.search_tolerance));
        }
        if let Some(floor) = self.floor {
            if !floor.is_finite() || floor <= 0.0 {
                return Err(LimiterConfigError::Floor(floor));
            }
        }
        Ok(())
    }
}
