use cadence_core::Observer;

use crate::traits::{CanLimitStep, HasStep};

/// An observer that caps the step size once time reaches a threshold.
///
/// Useful for resolving a known transient, such as a load change, with
/// smaller steps than the controller would otherwise choose.
///
/// # Example
///
/// ```
/// use cadence_core::IterationFeedback;
/// use cadence_observers::StepCeiling;
/// use cadence_stepper::adaptive::{Config, Controller, Policy};
///
/// let mut controller = Controller::new(Config::default(), Policy::Heuristic, None).unwrap();
/// let mut ceiling = StepCeiling::new(1.0, 0.1);
///
/// controller
///     .report_result_observed(IterationFeedback::converged(2, 2), &mut ceiling)
///     .unwrap();
///
/// assert_eq!(controller.propose_step(), 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepCeiling {
    from_time: f64,
    max_dt: f64,
}

impl StepCeiling {
    /// Caps every step proposed at or after `from_time` to `max_dt`.
    #[must_use]
    pub fn new(from_time: f64, max_dt: f64) -> Self {
        Self { from_time, max_dt }
    }
}

impl<E: HasStep, A: CanLimitStep> Observer<E, A> for StepCeiling {
    fn observe(&mut self, event: &E) -> Option<A> {
        (event.time() >= self.from_time && event.next_dt() > self.max_dt)
            .then(|| A::limit_step(self.max_dt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use cadence_core::IterationFeedback;
    use cadence_stepper::adaptive::{Config, Controller, Policy};

    #[test]
    fn caps_only_after_threshold() {
        let mut controller = Controller::new(
            Config {
                initial_dt: 0.25,
                ..Config::default()
            },
            Policy::Heuristic,
            None,
        )
        .expect("valid controller");
        let mut ceiling = StepCeiling::new(0.7, 0.3);

        let mut proposals = Vec::new();
        for _ in 0..4 {
            controller
                .report_result_observed(IterationFeedback::converged(2, 2), &mut ceiling)
                .expect("accepted");
            proposals.push(controller.propose_step());
        }

        // t = 0.25 and 0.75 are before and after the threshold.
        assert_relative_eq!(proposals[0], 0.5);
        assert_relative_eq!(proposals[1], 0.3);
        assert_relative_eq!(proposals[2], 0.3);
        assert_relative_eq!(proposals[3], 0.3);
        assert_relative_eq!(controller.time(), 1.35, epsilon = 1e-12);
    }
}
