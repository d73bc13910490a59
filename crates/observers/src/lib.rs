//! Reusable observers for adaptive time-step control.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work with the step controller in `cadence-stepper`, or with any controller
//! whose events and actions implement the traits.
//!
//! # Modules
//!
//! - [`traits`]: Capability traits for step observers
//!   ([`HasStep`], [`CanLimitStep`])
//!
//! # Observers
//!
//! - [`StepHistory`] records every attempted step.
//! - [`StepLogger`] writes one log record per attempted step.
//! - [`StepCeiling`] caps the step size from a given time onward.
//!
//! [`Observer`]: cadence_core::Observer
//! [`HasStep`]: traits::HasStep
//! [`CanLimitStep`]: traits::CanLimitStep

mod ceiling;
mod history;
mod logger;

pub mod traits;

pub use ceiling::StepCeiling;
pub use history::{StepHistory, StepRecord};
pub use logger::StepLogger;
