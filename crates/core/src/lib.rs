//! Core traits and types for adaptive time-step control.
//!
//! This crate defines the shared abstractions that the step controller,
//! observers, and host solvers build on:
//!
//! - [`IterationFeedback`]: the outcome of one nonlinear solve attempt
//! - [`LimitingFunction`]: a function of time whose change bounds the step
//! - [`Observer`]: receives controller events and optionally returns control actions

mod feedback;
mod limiting;
mod observer;

pub use feedback::IterationFeedback;
pub use limiting::LimitingFunction;
pub use observer::Observer;
