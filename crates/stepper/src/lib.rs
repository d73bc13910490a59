//! Adaptive step-size control for time-marching nonlinear solvers.
//!
//! The [`adaptive::Controller`] decides how far a transient simulation advances
//! between nonlinear solves. The host loop asks it for a step with
//! [`propose_step`], attempts a solve, and reports the outcome with
//! [`report_result`]. The controller grows or cuts the step from iteration
//! feedback and composes three optional constraints:
//!
//! - [`breakpoints`]: mandatory times that must be hit exactly
//! - [`limiter`]: a function of time whose change bounds each step
//! - [`table`]: a piecewise-linear time→step schedule that replaces heuristic growth
//!
//! # Example
//!
//! ```
//! use cadence_core::IterationFeedback;
//! use cadence_stepper::adaptive::{Config, Controller, IterationTarget, Policy};
//!
//! let config = Config {
//!     initial_dt: 1.0,
//!     target: Some(IterationTarget::new(6, 2)),
//!     breakpoints: vec![2.5],
//!     ..Config::default()
//! };
//! let mut controller = Controller::new(config, Policy::Heuristic, None).unwrap();
//!
//! assert_eq!(controller.propose_step(), 1.0);
//! controller.report_result(IterationFeedback::converged(2, 10)).unwrap();
//!
//! // Few iterations: the step doubles, then lands exactly on the breakpoint.
//! assert_eq!(controller.time(), 1.0);
//! assert_eq!(controller.propose_step(), 1.5);
//! ```
//!
//! [`propose_step`]: adaptive::Controller::propose_step
//! [`report_result`]: adaptive::Controller::report_result

pub mod adaptive;
pub mod breakpoints;
pub mod limiter;
pub mod table;
