use cadence_core::IterationFeedback;

use super::Decision;

/// Event emitted by the controller once per reported solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The solve converged and time advanced.
    Accepted {
        /// Simulation time after the step.
        time: f64,

        /// The step that was taken.
        dt: f64,

        /// The solver's report.
        feedback: IterationFeedback,

        /// How the iteration counts were classified.
        decision: Decision,

        /// The step the controller will propose next.
        next_dt: f64,
    },

    /// The solve failed and the step was cut back.
    Rejected {
        /// Simulation time, unchanged by the rejection.
        time: f64,

        /// The step that failed.
        dt: f64,

        /// The solver's report.
        feedback: IterationFeedback,

        /// Consecutive rejections so far, including this one.
        failures: usize,

        /// The step the controller will propose next.
        next_dt: f64,
    },
}

impl Event {
    /// Returns the simulation time after the reported attempt.
    #[must_use]
    pub fn time(&self) -> f64 {
        match self {
            Self::Accepted { time, .. } | Self::Rejected { time, .. } => *time,
        }
    }

    /// Returns the step size that was attempted.
    #[must_use]
    pub fn dt(&self) -> f64 {
        match self {
            Self::Accepted { dt, .. } | Self::Rejected { dt, .. } => *dt,
        }
    }

    /// Returns the step the controller will propose next.
    #[must_use]
    pub fn next_dt(&self) -> f64 {
        match self {
            Self::Accepted { next_dt, .. } | Self::Rejected { next_dt, .. } => *next_dt,
        }
    }

    /// Returns the solver's report for this attempt.
    #[must_use]
    pub fn feedback(&self) -> &IterationFeedback {
        match self {
            Self::Accepted { feedback, .. } | Self::Rejected { feedback, .. } => feedback,
        }
    }

    /// Returns `true` if the attempt was accepted.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}
