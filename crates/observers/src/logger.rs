use cadence_core::Observer;
use log::Level;

use crate::traits::HasStep;

/// An observer that writes one log record per attempted step.
///
/// Accepted steps are logged at the configured level; rejections are logged
/// one level more severe, capped at `Warn`.
#[derive(Debug, Clone, Copy)]
pub struct StepLogger {
    level: Level,
    target: &'static str,
}

impl StepLogger {
    /// Creates a logger that writes accepted steps at `level`.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self {
            level,
            target: module_path!(),
        }
    }

    /// Sets the log target.
    #[must_use]
    pub fn with_target(mut self, target: &'static str) -> Self {
        self.target = target;
        self
    }

    /// Returns the level used for rejected steps.
    #[must_use]
    pub fn rejection_level(&self) -> Level {
        match self.level {
            Level::Trace => Level::Debug,
            Level::Debug => Level::Info,
            Level::Info | Level::Warn => Level::Warn,
            Level::Error => Level::Error,
        }
    }
}

impl Default for StepLogger {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl<E: HasStep, A> Observer<E, A> for StepLogger {
    fn observe(&mut self, event: &E) -> Option<A> {
        if event.accepted() {
            log::log!(
                target: self.target,
                self.level,
                "t = {:.6e}: accepted dt = {:.6e} ({} nonlinear iterations), next dt = {:.6e}",
                event.time(),
                event.dt(),
                event.nonlinear_iterations(),
                event.next_dt(),
            );
        } else {
            log::log!(
                target: self.target,
                self.rejection_level(),
                "t = {:.6e}: rejected dt = {:.6e}, retrying with dt = {:.6e}",
                event.time(),
                event.dt(),
                event.next_dt(),
            );
        }
        None
    }
}
