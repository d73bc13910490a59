/// Outcome of one nonlinear solve attempt, as reported by the host solver.
///
/// A feedback value is produced once per attempt and handed to the step
/// controller by value, so the controller never reads solver state directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationFeedback {
    /// Whether the nonlinear solve converged.
    pub converged: bool,

    /// Number of nonlinear iterations used by the attempt.
    pub nonlinear_iterations: usize,

    /// Number of linear iterations used by the attempt, summed over all
    /// nonlinear iterations.
    pub linear_iterations: usize,
}

impl IterationFeedback {
    /// Feedback for a converged solve.
    #[must_use]
    pub fn converged(nonlinear_iterations: usize, linear_iterations: usize) -> Self {
        Self {
            converged: true,
            nonlinear_iterations,
            linear_iterations,
        }
    }

    /// Feedback for a solve that failed to converge.
    #[must_use]
    pub fn failed(nonlinear_iterations: usize, linear_iterations: usize) -> Self {
        Self {
            converged: false,
            nonlinear_iterations,
            linear_iterations,
        }
    }

    /// Returns the average number of linear iterations per nonlinear iteration.
    ///
    /// A solve with zero nonlinear iterations is treated as having one, so the
    /// ratio is always defined.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn linear_ratio(&self) -> f64 {
        self.linear_iterations as f64 / self.nonlinear_iterations.max(1) as f64
    }
}
