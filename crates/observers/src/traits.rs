//! Capability traits for step observers.
//!
//! These traits abstract over controller-specific event and action types, so
//! observers can be written once and reused.
//!
//! # Event traits
//!
//! - [`HasStep`]: events that describe one attempted step
//!
//! # Action traits
//!
//! - [`CanLimitStep`]: actions that can cap the next step size
//!
//! # Example
//!
//! ```rust
//! use cadence_core::Observer;
//! use cadence_observers::traits::{CanLimitStep, HasStep};
//!
//! /// Keeps the step small after any rejection.
//! struct Cautious {
//!     max_dt: f64,
//! }
//!
//! impl<E: HasStep, A: CanLimitStep> Observer<E, A> for Cautious {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (!event.accepted()).then(|| A::limit_step(self.max_dt))
//!     }
//! }
//! ```

use cadence_stepper::adaptive;

/// An event that describes one attempted step.
pub trait HasStep {
    /// Returns the simulation time after the attempt.
    fn time(&self) -> f64;

    /// Returns the attempted step size.
    fn dt(&self) -> f64;

    /// Returns the step size the controller will propose next.
    fn next_dt(&self) -> f64;

    /// Returns `true` if the attempt was accepted.
    fn accepted(&self) -> bool;

    /// Returns the nonlinear iteration count reported for the attempt.
    fn nonlinear_iterations(&self) -> usize;
}

/// An action type that can cap the next step size.
pub trait CanLimitStep {
    /// Returns the action that caps the next step at `dt`.
    fn limit_step(dt: f64) -> Self;
}

impl HasStep for adaptive::Event {
    fn time(&self) -> f64 {
        adaptive::Event::time(self)
    }

    fn dt(&self) -> f64 {
        adaptive::Event::dt(self)
    }

    fn next_dt(&self) -> f64 {
        adaptive::Event::next_dt(self)
    }

    fn accepted(&self) -> bool {
        self.is_accepted()
    }

    fn nonlinear_iterations(&self) -> usize {
        self.feedback().nonlinear_iterations
    }
}

impl CanLimitStep for adaptive::Action {
    fn limit_step(dt: f64) -> Self {
        Self::LimitStep(dt)
    }
}
