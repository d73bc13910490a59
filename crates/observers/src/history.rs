use cadence_core::Observer;

use crate::traits::HasStep;

/// One attempted step, as seen by a [`StepHistory`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord {
    pub time: f64,
    pub dt: f64,
    pub next_dt: f64,
    pub accepted: bool,
    pub nonlinear_iterations: usize,
}

/// An observer that records every attempted step.
///
/// Never returns an action, so it works with any action type.
///
/// # Example
///
/// ```
/// use cadence_core::IterationFeedback;
/// use cadence_observers::StepHistory;
/// use cadence_stepper::adaptive::{Config, Controller, Policy};
///
/// let mut controller = Controller::new(Config::default(), Policy::Heuristic, None).unwrap();
/// let mut history = StepHistory::new();
///
/// controller
///     .report_result_observed(IterationFeedback::failed(10, 0), &mut history)
///     .unwrap();
/// controller
///     .report_result_observed(IterationFeedback::converged(3, 9), &mut history)
///     .unwrap();
///
/// assert_eq!(history.rejected(), 1);
/// assert_eq!(history.accepted_times(), vec![0.5]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StepHistory {
    records: Vec<StepRecord>,
}

impl StepHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded attempt in order.
    #[must_use]
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Returns the times reached by accepted steps.
    #[must_use]
    pub fn accepted_times(&self) -> Vec<f64> {
        self.records
            .iter()
            .filter(|record| record.accepted)
            .map(|record| record.time)
            .collect()
    }

    /// Returns the number of rejected attempts.
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.records.iter().filter(|record| !record.accepted).count()
    }

    /// Returns the smallest and largest accepted step sizes.
    #[must_use]
    pub fn accepted_range(&self) -> Option<(f64, f64)> {
        self.records
            .iter()
            .filter(|record| record.accepted)
            .map(|record| record.dt)
            .fold(None, |range, dt| match range {
                None => Some((dt, dt)),
                Some((lo, hi)) => Some((f64::min(lo, dt), f64::max(hi, dt))),
            })
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<E: HasStep, A> Observer<E, A> for StepHistory {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.records.push(StepRecord {
            time: event.time(),
            dt: event.dt(),
            next_dt: event.next_dt(),
            accepted: event.accepted(),
            nonlinear_iterations: event.nonlinear_iterations(),
        });
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use cadence_core::IterationFeedback;
    use cadence_stepper::adaptive::{Config, Controller, Policy};

    #[test]
    fn records_accepted_and_rejected_steps() {
        let mut controller = Controller::new(
            Config {
                initial_dt: 0.5,
                breakpoints: vec![1.25],
                ..Config::default()
            },
            Policy::Heuristic,
            None,
        )
        .expect("valid controller");
        let mut history = StepHistory::new();

        for feedback in [
            IterationFeedback::converged(2, 4),
            IterationFeedback::failed(30, 0),
            IterationFeedback::converged(2, 4),
            IterationFeedback::converged(2, 4),
        ] {
            controller
                .report_result_observed(feedback, &mut history)
                .expect("report accepted");
        }

        assert_eq!(history.records().len(), 4);
        assert_eq!(history.rejected(), 1);
        // The growth step lands on the breakpoint, fails, and recovers at half size.
        assert_eq!(history.accepted_times(), vec![0.5, 0.875, 1.25]);

        let (lo, hi) = history.accepted_range().expect("accepted steps");
        assert_relative_eq!(lo, 0.375);
        assert_relative_eq!(hi, 0.5);

        history.clear();
        assert!(history.records().is_empty());
        assert_eq!(history.accepted_range(), None);
    }
}
