use thiserror::Error;

use crate::{breakpoints::BreakpointError, limiter::LimiterConfigError, table::TableError};

use super::ConfigError;

/// Errors that stop adaptive stepping.
///
/// Rejected solves are not errors; they are absorbed by cutting the step back.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("invalid limiter: {0}")]
    InvalidLimiter(#[from] LimiterConfigError),

    #[error("invalid breakpoints: {0}")]
    Breakpoints(#[from] BreakpointError),

    #[error("invalid step table: {0}")]
    InvalidTable(#[from] TableError),

    #[error(
        "{failures} consecutive rejections at t = {time}; last dt = {dt} \
         ({nonlinear_iterations} nonlinear, {linear_iterations} linear iterations)"
    )]
    ExhaustedRetries {
        time: f64,
        dt: f64,
        failures: usize,
        nonlinear_iterations: usize,
        linear_iterations: usize,
    },

    #[error("solve failed at t = {time} with dt = {dt} already at dt_min ({failures} consecutive rejections)")]
    StepAtMinimum { time: f64, dt: f64, failures: usize },

    #[error("invalid step size {dt} at t = {time}: {reason}")]
    InvalidStepSize {
        time: f64,
        dt: f64,
        reason: &'static str,
    },

    #[error("controller stopped after a fatal error at t = {time}")]
    Terminated { time: f64 },
}
