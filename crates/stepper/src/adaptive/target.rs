use cadence_core::IterationFeedback;

/// Default allowed average of linear iterations per nonlinear iteration.
pub const DEFAULT_LINEAR_RATIO: f64 = 25.0;

/// Nonlinear iteration counts that count as an efficient solve.
///
/// Counts in `[optimal - window, optimal + window]` are on target. The lower
/// edge saturates at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationTarget {
    /// Nonlinear iteration count the controller aims for.
    pub optimal_iterations: usize,

    /// Half-width of the on-target band around `optimal_iterations`.
    pub iteration_window: usize,

    /// Largest acceptable average of linear iterations per nonlinear iteration.
    pub linear_ratio: f64,
}

/// How an accepted solve should change the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The solve was cheap: grow the step.
    Grow,

    /// The solve was on target: keep the step.
    Hold,

    /// The solve was expensive: cut the step back.
    Shrink,
}

impl IterationTarget {
    /// Creates a target with the default linear iteration ratio.
    #[must_use]
    pub fn new(optimal_iterations: usize, iteration_window: usize) -> Self {
        Self {
            optimal_iterations,
            iteration_window,
            linear_ratio: DEFAULT_LINEAR_RATIO,
        }
    }

    /// Returns this target with a different linear iteration ratio.
    #[must_use]
    pub fn with_linear_ratio(mut self, linear_ratio: f64) -> Self {
        self.linear_ratio = linear_ratio;
        self
    }

    /// Returns the smallest on-target nonlinear iteration count.
    #[must_use]
    pub fn lower(&self) -> usize {
        self.optimal_iterations.saturating_sub(self.iteration_window)
    }

    /// Returns the largest on-target nonlinear iteration count.
    #[must_use]
    pub fn upper(&self) -> usize {
        self.optimal_iterations.saturating_add(self.iteration_window)
    }

    /// Classifies a solve's iteration counts.
    ///
    /// Too many nonlinear iterations, or too many linear iterations per
    /// nonlinear iteration, shrink the step even if the other count looks fine.
    #[must_use]
    pub fn classify(&self, feedback: &IterationFeedback) -> Decision {
        let nonlinear = feedback.nonlinear_iterations;

        if nonlinear > self.upper() || feedback.linear_ratio() > self.linear_ratio {
            Decision::Shrink
        } else if nonlinear < self.lower() {
            Decision::Grow
        } else {
            Decision::Hold
        }
    }
}
