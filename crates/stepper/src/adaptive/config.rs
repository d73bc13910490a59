use thiserror::Error;

use super::IterationTarget;

/// Configuration for the adaptive step [`Controller`](super::Controller).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Simulation time at which stepping starts.
    pub start_time: f64,

    /// First step size in heuristic mode.
    pub initial_dt: f64,

    /// Multiplier applied after an efficient accepted solve (`>= 1`).
    pub growth_factor: f64,

    /// Multiplier applied after a rejected or expensive solve, in `(0, 1)`.
    pub cutback_factor: f64,

    /// Iteration counts that count as efficient.
    ///
    /// Without a target every accepted step grows by `growth_factor`.
    pub target: Option<IterationTarget>,

    /// Smallest allowed step size.
    pub dt_min: Option<f64>,

    /// Largest allowed step size.
    pub dt_max: Option<f64>,

    /// Number of consecutive rejections tolerated before giving up.
    pub max_rejections: usize,

    /// Mandatory times the controller must land on exactly.
    pub breakpoints: Vec<f64>,

    /// Whether the keys of a step table become mandatory times in table mode.
    pub force_table_points: bool,

    /// Absolute tolerance used when comparing times to breakpoints.
    pub time_tolerance: f64,
}

/// Errors that can occur when validating a [`Config`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("start_time must be finite, got {0}")]
    StartTime(f64),

    #[error("initial_dt must be finite and positive, got {0}")]
    InitialDt(f64),

    #[error("growth_factor must be finite and at least 1, got {0}")]
    GrowthFactor(f64),

    #[error("cutback_factor must be in (0, 1), got {0}")]
    CutbackFactor(f64),

    #[error("dt_min must be finite and positive, got {0}")]
    DtMin(f64),

    #[error("dt_max must be finite and positive, got {0}")]
    DtMax(f64),

    #[error("dt_min ({dt_min}) exceeds dt_max ({dt_max})")]
    Bounds { dt_min: f64, dt_max: f64 },

    #[error("initial_dt ({initial_dt}) lies outside [dt_min, dt_max]")]
    InitialOutOfBounds { initial_dt: f64 },

    #[error("linear_ratio must be finite and positive, got {0}")]
    LinearRatio(f64),

    #[error("time_tolerance must be finite and non-negative, got {0}")]
    TimeTolerance(f64),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            initial_dt: 1.0,
            growth_factor: 2.0,
            cutback_factor: 0.5,
            target: None,
            dt_min: None,
            dt_max: None,
            max_rejections: 10,
            breakpoints: Vec::new(),
            force_table_points: true,
            time_tolerance: 2e-14,
        }
    }
}

impl Config {
    /// Validates factors, bounds, and tolerances.
    ///
    /// Breakpoint values are checked when the controller builds its schedule.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.start_time.is_finite() {
            return Err(ConfigError::StartTime(self.start_time));
        }
        if !self.initial_dt.is_finite() || self.initial_dt <= 0.0 {
            return Err(ConfigError::InitialDt(self.initial_dt));
        }
        if !self.growth_factor.is_finite() || self.growth_factor < 1.0 {
            return Err(ConfigError::GrowthFactor(self.growth_factor));
        }
        if !(self.cutback_factor > 0.0 && self.cutback_factor < 1.0) {
            return Err(ConfigError::CutbackFactor(self.cutback_factor));
        }
        if let Some(dt_min) = self.dt_min {
            if !dt_min.is_finite() || dt_min <= 0.0 {
                return Err(ConfigError::DtMin(dt_min));
            }
        }
        if let Some(dt_max) = self.dt_max {
            if !dt_max.is_finite() || dt_max <= 0.0 {
                return Err(ConfigError::DtMax(dt_max));
            }
        }
        if let (Some(dt_min), Some(dt_max)) = (self.dt_min, self.dt_max) {
            if dt_min > dt_max {
                return Err(ConfigError::Bounds { dt_min, dt_max });
            }
        }
        let below_min = self.dt_min.is_some_and(|min| self.initial_dt < min);
        let above_max = self.dt_max.is_some_and(|max| self.initial_dt > max);
        if below_min || above_max {
            return Err(ConfigError::InitialOutOfBounds {
                initial_dt: self.initial_dt,
            });
        }
        if let Some(target) = &self.target {
            if !target.linear_ratio.is_finite() || target.linear_ratio <= 0.0 {
                return Err(ConfigError::LinearRatio(target.linear_ratio));
            }
        }
        if !self.time_tolerance.is_finite() || self.time_tolerance < 0.0 {
            return Err(ConfigError::TimeTolerance(self.time_tolerance));
        }
        Ok(())
    }

    /// Clamps `dt` into `[dt_min, dt_max]`, ignoring unset bounds.
    #[must_use]
    pub fn clamp(&self, dt: f64) -> f64 {
        let dt = self.dt_max.map_or(dt, |max| dt.min(max));
        self.dt_min.map_or(dt, |min| dt.max(min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_factors() {
        let config = Config {
            cutback_factor: 1.0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::CutbackFactor(1.0)));

        let config = Config {
            cutback_factor: 0.0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::CutbackFactor(0.0)));

        let config = Config {
            growth_factor: 0.9,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::GrowthFactor(0.9)));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let config = Config {
            initial_dt: 0.5,
            dt_min: Some(1.0),
            dt_max: Some(0.1),
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Bounds {
                dt_min: 1.0,
                dt_max: 0.1
            })
        );
    }

    #[test]
    fn rejects_initial_dt_outside_bounds() {
        let config = Config {
            initial_dt: 5.0,
            dt_max: Some(2.0),
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InitialOutOfBounds { initial_dt: 5.0 })
        );
    }

    #[test]
    fn rejects_non_positive_linear_ratio() {
        let config = Config {
            target: Some(IterationTarget::new(5, 1).with_linear_ratio(0.0)),
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::LinearRatio(0.0)));
    }

    #[test]
    fn clamp_respects_configured_bounds() {
        let config = Config {
            dt_min: Some(0.1),
            dt_max: Some(2.0),
            ..Config::default()
        };
        assert!((config.clamp(0.01) - 0.1).abs() < f64::EPSILON);
        assert!((config.clamp(1.0) - 1.0).abs() < f64::EPSILON);
        assert!((config.clamp(9.0) - 2.0).abs() < f64::EPSILON);

        let unbounded = Config::default();
        assert!((unbounded.clamp(1e9) - 1e9).abs() < f64::EPSILON);
    }
}
