//! Step limiting by the change of a function of time.
//!
//! A [`Limiter`] wraps a [`LimitingFunction`] and shortens a candidate step
//! until the function's value changes by at most
//! [`LimiterConfig::max_change`] between the last accepted time and the end of
//! the step.
//!
//! # Algorithm
//!
//! The full step is probed first. If it violates the bound, the limiter keeps
//! a bracket `[lo, hi]` where `lo` satisfies the bound (initially a zero-length
//! step) and `hi` violates it, and shrinks it with regula falsi. When the
//! same endpoint moves twice in a row the next probe bisects instead, so
//! one-sided stagnation cannot stall the search. The search ends when a
//! satisfying step uses nearly all of the allowed change, when the bracket is
//! narrow, or when the probe budget runs out.
//!
//! If no satisfying step is found within the budget, the limiter gives up and
//! returns the floor step with a warning rather than failing the run.

mod config;

use std::fmt;

use cadence_core::LimitingFunction;

pub use config::{LimiterConfig, LimiterConfigError};

/// Outcome of limiting a candidate step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Limit {
    /// The candidate already satisfies the bound.
    Within(f64),

    /// The candidate was shortened to a step that satisfies the bound.
    Reduced {
        /// The shortened step.
        dt: f64,
        /// Function evaluations spent searching, after the first probe.
        probes: usize,
    },

    /// No satisfying step was found; the floor step is returned instead.
    Unresolved {
        /// The floor step.
        dt: f64,
    },
}

impl Limit {
    /// Returns the step size carried by this outcome.
    #[must_use]
    pub fn dt(&self) -> f64 {
        match *self {
            Self::Within(dt) | Self::Reduced { dt, .. } | Self::Unresolved { dt } => dt,
        }
    }
}

/// Bounds steps by the change of a limiting function.
pub struct Limiter {
    function: Box<dyn LimitingFunction>,
    config: LimiterConfig,
}

/// A probed step and the absolute change in function value it produced.
#[derive(Debug, Clone, Copy)]
struct Probe {
    step: f64,
    change: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Lo,
    Hi,
}

impl Limiter {
    /// Creates a limiter from a function and a config.
    ///
    /// # Errors
    ///
    /// Returns a [`LimiterConfigError`] if the config is invalid.
    pub fn new<F>(function: F, config: LimiterConfig) -> Result<Self, LimiterConfigError>
    where
        F: LimitingFunction + 'static,
    {
        config.validate()?;
        Ok(Self {
            function: Box::new(function),
            config,
        })
    }

    /// Returns the limiter's config.
    #[must_use]
    pub fn config(&self) -> &LimiterConfig {
        &self.config
    }

    /// Evaluates the limiting function at `time`.
    #[must_use]
    pub fn value(&self, time: f64) -> f64 {
        self.function.value(time)
    }

    /// Returns the limiting function's knots.
    #[must_use]
    pub fn knots(&self) -> &[f64] {
        self.function.knots()
    }

    /// Returns the floor step given the controller's minimum step.
    ///
    /// This is the larger of [`LimiterConfig::floor`] and `dt_min`.
    ///
    /// # Errors
    ///
    /// Returns [`LimiterConfigError::MissingFloor`] if neither is set.
    pub fn floor(&self, dt_min: Option<f64>) -> Result<f64, LimiterConfigError> {
        match (self.config.floor, dt_min) {
            (Some(floor), Some(dt_min)) => Ok(floor.max(dt_min)),
            (Some(floor), None) => Ok(floor),
            (None, Some(dt_min)) => Ok(dt_min),
            (None, None) => Err(LimiterConfigError::MissingFloor),
        }
    }

    /// Limits a step of size `dt` starting at `previous_time`, where the
    /// function had the value `previous_value`.
    ///
    /// The returned step never exceeds `dt`, and never drops below `floor`
    /// unless `dt` itself is smaller.
    #[must_use]
    pub fn limit(&self, previous_time: f64, previous_value: f64, dt: f64, floor: f64) -> Limit {
        let max_change = self.config.max_change;
        let tol = self.config.search_tolerance;

        let probe = |step: f64| Probe {
            step,
            change: (self.function.value(previous_time + step) - previous_value).abs(),
        };
        // NaN changes compare false and count as violations.
        let satisfies = |p: &Probe| p.change <= max_change;

        let full = probe(dt);
        if satisfies(&full) {
            return Limit::Within(dt);
        }

        let mut lo = Probe {
            step: 0.0,
            change: 0.0,
        };
        let mut hi = full;
        let mut last_moved = None;
        let mut stalled = false;

        for probes in 1..=self.config.max_probes {
            let p = probe(next_step(lo, hi, max_change, stalled));

            let moved = if satisfies(&p) {
                lo = p;
                if lo.change >= (1.0 - tol) * max_change {
                    return self.reduced(lo.step, dt, floor, probes);
                }
                Side::Lo
            } else {
                hi = p;
                Side::Hi
            };

            if lo.step > 0.0 && hi.step - lo.step <= tol * hi.step {
                return self.reduced(lo.step, dt, floor, probes);
            }

            stalled = last_moved == Some(moved);
            last_moved = Some(moved);
        }

        if lo.step > 0.0 {
            return self.reduced(lo.step, dt, floor, self.config.max_probes);
        }

        log::warn!(
            "limiting function unresolvable: no step in (0, {dt}] from t = {previous_time} keeps \
             the change within {max_change} after {} probes; using floor step {floor}",
            self.config.max_probes,
        );
        Limit::Unresolved {
            dt: floor.min(dt),
        }
    }

    fn reduced(&self, step: f64, dt: f64, floor: f64, probes: usize) -> Limit {
        let limited = step.max(floor).min(dt);
        log::debug!(
            "limiting function reduced step from {dt} to {limited} in {probes} probes (max change {})",
            self.config.max_change,
        );
        Limit::Reduced { dt: limited, probes }
    }
}

impl fmt::Debug for Limiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Limiter")
            .field("config", &self.config)
            .field("knots", &self.knots())
            .finish_non_exhaustive()
    }
}

/// Chooses the next step to probe inside `(lo, hi)`.
fn next_step(lo: Probe, hi: Probe, target: f64, bisect: bool) -> f64 {
    let mid = 0.5 * (lo.step + hi.step);
    if bisect || !hi.change.is_finite() {
        return mid;
    }

    let step = lo.step + (hi.step - lo.step) * (target - lo.change) / (hi.change - lo.change);
    if step.is_finite() && step > lo.step && step < hi.step {
        step
    } else {
        mid
    }
}
