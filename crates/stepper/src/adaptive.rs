//! Adaptive step-size control driven by nonlinear solve feedback.
//!
//! # Algorithm
//!
//! The [`Controller`] is a small state machine:
//!
//! ```text
//! Init → Proposing → (Accepted | Rejected) → Proposing → … → Terminal
//! ```
//!
//! - **Init** ([`Controller::new`]) validates the setup, builds the
//!   breakpoint schedule, and computes the first step.
//! - **Proposing** ([`Controller::propose_step`]) returns the current step.
//! - **Accepted** advances time, consumes reached breakpoints, and picks the
//!   next step from the [`Policy`].
//! - **Rejected** cuts the step back by `cutback_factor` and counts the
//!   failure. Too many consecutive failures, or a failure at `dt_min`, is
//!   fatal.
//!
//! Every proposal, including the retry after a rejection, goes through the
//! same constraints, in order: the observer cap, the `[dt_min, dt_max]`
//! bounds, the limiting function, and finally truncation to the next
//! breakpoint. Limiter and breakpoint constraints are
//! applied independently, so the smaller step wins. Landing exactly on a
//! breakpoint takes precedence over `dt_min`.
//!
//! After a step is truncated to land on a breakpoint, the next step grows
//! from the untruncated size, so forced stops do not shrink the step for the
//! rest of the run.
//!
//! # Observer Events
//!
//! [`Controller::report_result_observed`] emits one [`Event`] per report.
//! Observers can return [`Action::LimitStep`] to cap the next proposal.

mod action;
mod config;
mod error;
mod event;
mod policy;
mod target;


pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use policy::Policy;
pub use target::{DEFAULT_LINEAR_RATIO, Decision, IterationTarget};

use cadence_core::{IterationFeedback, Observer};

use crate::{breakpoints::BreakpointSchedule, limiter::Limiter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Proposing,
    Terminal,
}

/// A fully constrained step, ready to be proposed.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Proposal {
    /// The step to propose.
    dt: f64,
    /// The step before breakpoint truncation.
    nominal: f64,
    /// The breakpoint the step lands on, if it was truncated.
    landing: Option<f64>,
}

/// Adaptive step-size controller.
///
/// See the [module docs](self) for the state machine and constraint order.
#[derive(Debug)]
pub struct Controller {
    config: Config,
    policy: Policy,
    limiter: Option<Limiter>,
    limiter_floor: f64,
    breakpoints: BreakpointSchedule,
    phase: Phase,
    time: f64,
    dt: f64,
    nominal_dt: f64,
    landing: Option<f64>,
    /// Limiting function value at the last accepted time.
    reference_value: Option<f64>,
    failures: usize,
    cutback_occurred: bool,
}

impl Controller {
    /// Creates a controller and computes its first step.
    ///
    /// Breakpoints at or before `config.start_time` are consumed immediately.
    /// In table mode the first step is the table value at the start time;
    /// otherwise it is `config.initial_dt`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config, limiter, breakpoints, or step table are
    /// invalid, or if the first step cannot be made positive.
    pub fn new(config: Config, policy: Policy, limiter: Option<Limiter>) -> Result<Self, Error> {
        config.validate()?;

        if let Some(table) = policy.table() {
            table.validate_steps()?;
        }

        let limiter_floor = match &limiter {
            Some(limiter) => limiter.floor(config.dt_min)?,
            None => 0.0,
        };

        let mut breakpoints =
            BreakpointSchedule::new(config.breakpoints.iter().copied(), config.time_tolerance)?;
        if let Some(table) = policy.table() {
            if config.force_table_points {
                breakpoints = breakpoints.merge(table.times().iter().copied())?;
            }
        }
        if let Some(limiter) = &limiter {
            if limiter.config().force_knots {
                breakpoints = breakpoints.merge(limiter.knots().iter().copied())?;
            }
        }
        breakpoints.advance_past(config.start_time);

        let time = config.start_time;
        let initial = match policy.table() {
            Some(table) => table.value_at(time)?,
            None => config.initial_dt,
        };
        let reference_value = limiter.as_ref().map(|limiter| limiter.value(time));

        let mut controller = Self {
            config,
            policy,
            limiter,
            limiter_floor,
            breakpoints,
            phase: Phase::Proposing,
            time,
            dt: initial,
            nominal_dt: initial,
            landing: None,
            reference_value,
            failures: 0,
            cutback_occurred: false,
        };

        let proposal = controller.constrain(initial, None)?;
        controller.apply(proposal);

        log::debug!(
            "step control initialized at t = {time} with dt = {} ({} breakpoints ahead)",
            controller.dt,
            controller.breakpoints.remaining().len(),
        );

        Ok(controller)
    }

    /// Returns the step to attempt next.
    ///
    /// Calling this repeatedly without reporting a result returns the same value.
    #[must_use]
    pub fn propose_step(&self) -> f64 {
        self.dt
    }

    /// Reports the outcome of the last attempted step.
    ///
    /// A converged solve advances time and picks the next step; a failed solve
    /// cuts the step back.
    ///
    /// # Errors
    ///
    /// Returns an error, and stops the controller, if the rejection limit is
    /// exceeded, a rejected step was already at `dt_min`, or the next step is
    /// invalid. Every later call returns [`Error::Terminated`].
    pub fn report_result(&mut self, feedback: IterationFeedback) -> Result<(), Error> {
        self.report_result_observed(feedback, &mut ())
    }

    /// Reports the outcome of the last attempted step to the controller and
    /// to an observer.
    ///
    /// The observer receives one [`Event`] and may return
    /// [`Action::LimitStep`] to cap the next proposal.
    ///
    /// # Errors
    ///
    /// Same as [`report_result`](Self::report_result), plus
    /// [`Error::InvalidStepSize`] for a non-positive or non-finite cap.
    pub fn report_result_observed<Obs>(
        &mut self,
        feedback: IterationFeedback,
        observer: &mut Obs,
    ) -> Result<(), Error>
    where
        Obs: Observer<Event, Action>,
    {
        if self.phase == Phase::Terminal {
            return Err(Error::Terminated { time: self.time });
        }

        let result = if feedback.converged {
            self.accept(feedback, observer)
        } else {
            self.reject(feedback, observer)
        };

        if let Err(error) = &result {
            self.phase = Phase::Terminal;
            log::error!("step control stopped at t = {}: {error}", self.time);
        }

        result
    }

    /// Returns the current simulation time.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Returns the number of consecutive rejections.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Returns the breakpoints not yet reached, in increasing order.
    #[must_use]
    pub fn remaining_breakpoints(&self) -> &[f64] {
        self.breakpoints.remaining()
    }

    /// Returns `true` once a fatal error has stopped the controller.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Terminal
    }

    /// Returns the controller's config.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the step policy chosen at construction.
    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    fn accept<Obs>(&mut self, feedback: IterationFeedback, observer: &mut Obs) -> Result<(), Error>
    where
        Obs: Observer<Event, Action>,
    {
        let dt = self.dt;
        let base = if self.landing.is_some() {
            self.nominal_dt
        } else {
            dt
        };

        self.time = self.landing.take().unwrap_or(self.time + dt);
        self.breakpoints.advance_past(self.time);
        if let Some(limiter) = &self.limiter {
            self.reference_value = Some(limiter.value(self.time));
        }
        self.failures = 0;
        let recovering = std::mem::take(&mut self.cutback_occurred);

        let decision = match &self.config.target {
            Some(target) => target.classify(&feedback),
            None => Decision::Grow,
        };
        let decision = if recovering && decision == Decision::Grow {
            Decision::Hold
        } else {
            decision
        };

        let candidate = self.next_candidate(base, decision, recovering)?;
        let mut proposal = self.constrain(candidate, None)?;

        let event = Event::Accepted {
            time: self.time,
            dt,
            feedback,
            decision,
            next_dt: proposal.dt,
        };
        if let Some(Action::LimitStep(cap)) = observer.observe(&event) {
            let cap = self.validate_cap(cap)?;
            proposal = self.constrain(candidate, Some(cap))?;
        }

        log::debug!(
            "accepted dt = {dt}, t = {}: {decision:?} ({} nonlinear, {} linear) → dt = {}",
            self.time,
            feedback.nonlinear_iterations,
            feedback.linear_iterations,
            proposal.dt,
        );

        self.apply(proposal);
        Ok(())
    }

    fn reject<Obs>(&mut self, feedback: IterationFeedback, observer: &mut Obs) -> Result<(), Error>
    where
        Obs: Observer<Event, Action>,
    {
        let dt = self.dt;
        self.failures += 1;
        self.cutback_occurred = true;

        if self.failures > self.config.max_rejections {
            return Err(Error::ExhaustedRetries {
                time: self.time,
                dt,
                failures: self.failures,
                nonlinear_iterations: feedback.nonlinear_iterations,
                linear_iterations: feedback.linear_iterations,
            });
        }

        if self.config.dt_min.is_some_and(|dt_min| dt <= dt_min) {
            return Err(Error::StepAtMinimum {
                time: self.time,
                dt,
                failures: self.failures,
            });
        }

        let candidate = dt * self.config.cutback_factor;
        let mut proposal = self.constrain(candidate, None)?;

        let event = Event::Rejected {
            time: self.time,
            dt,
            feedback,
            failures: self.failures,
            next_dt: proposal.dt,
        };
        if let Some(Action::LimitStep(cap)) = observer.observe(&event) {
            let cap = self.validate_cap(cap)?;
            proposal = self.constrain(candidate, Some(cap))?;
        }

        log::debug!(
            "rejected dt = {dt} at t = {} (failure {} of {}) → dt = {}",
            self.time,
            self.failures,
            self.config.max_rejections,
            proposal.dt,
        );

        self.apply(proposal);
        Ok(())
    }

    /// Picks the next step from the policy, before any constraints.
    fn next_candidate(&self, base: f64, decision: Decision, recovering: bool) -> Result<f64, Error> {
        let config = &self.config;

        let candidate = match (&self.policy, decision) {
            (_, Decision::Shrink) => base * config.cutback_factor,
            (Policy::Heuristic, Decision::Grow) => base * config.growth_factor,
            (Policy::Heuristic, Decision::Hold) => base,
            (Policy::TableDriven(table), _) => {
                let cap = if recovering {
                    base
                } else {
                    base * config.growth_factor
                };
                table.value_at(self.time)?.min(cap)
            }
        };

        Ok(candidate)
    }

    /// Runs a candidate step through the cap, bounds, limiter, and breakpoints.
    fn constrain(&self, candidate: f64, cap: Option<f64>) -> Result<Proposal, Error> {
        if !candidate.is_finite() || candidate <= 0.0 {
            return Err(self.invalid_step(candidate, "step policy produced a non-positive step"));
        }

        let mut dt = cap.map_or(candidate, |cap| candidate.min(cap));
        dt = self.config.clamp(dt);

        if let (Some(limiter), Some(reference)) = (&self.limiter, self.reference_value) {
            let limit = limiter.limit(self.time, reference, dt, self.limiter_floor);
            dt = dt.min(limit.dt());
        }

        let nominal = dt;
        let mut landing = None;
        if let Some(breakpoint) = self.breakpoints.next_after(self.time) {
            if self.time + dt >= breakpoint - self.config.time_tolerance {
                dt = breakpoint - self.time;
                landing = Some(breakpoint);
                log::debug!("step truncated from {nominal} to {dt} to land on breakpoint {breakpoint}");
            }
        }

        if !dt.is_finite() || dt <= 0.0 {
            return Err(self.invalid_step(dt, "constrained step is not positive"));
        }

        Ok(Proposal {
            dt,
            nominal,
            landing,
        })
    }

    fn validate_cap(&self, cap: f64) -> Result<f64, Error> {
        if cap.is_finite() && cap > 0.0 {
            Ok(cap)
        } else {
            Err(self.invalid_step(cap, "observer step cap must be finite and positive"))
        }
    }

    fn invalid_step(&self, dt: f64, reason: &'static str) -> Error {
        Error::InvalidStepSize {
            time: self.time,
            dt,
            reason,
        }
    }

    fn apply(&mut self, proposal: Proposal) {
        self.dt = proposal.dt;
        self.nominal_dt = proposal.nominal;
        self.landing = proposal.landing;
    }
}
