//! Mandatory stopping times.
//!
//! A [`BreakpointSchedule`] is an immutable, strictly increasing sequence of
//! times plus a cursor marking the first breakpoint not yet reached. The
//! controller truncates steps so each breakpoint is landed on exactly, then
//! advances the cursor past it. Consumed breakpoints are never revisited.

use thiserror::Error;

/// Errors that can occur when building a [`BreakpointSchedule`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BreakpointError {
    #[error("breakpoint at index {index} is not finite: {time}")]
    NonFinite { index: usize, time: f64 },

    #[error("time tolerance must be finite and non-negative, got {tolerance}")]
    Tolerance { tolerance: f64 },
}

/// Sorted, deduplicated mandatory times with an explicit cursor.
///
/// Two times closer than the schedule's tolerance are treated as one
/// breakpoint (the earlier is kept).
///
/// # Examples
///
/// ```
/// use cadence_stepper::breakpoints::BreakpointSchedule;
///
/// let mut schedule = BreakpointSchedule::new([5.0, 2.0, 2.0], 1e-12).unwrap();
/// assert_eq!(schedule.remaining(), &[2.0, 5.0]);
/// assert_eq!(schedule.next_after(1.0), Some(2.0));
///
/// schedule.advance_past(2.0);
/// assert_eq!(schedule.next_after(2.0), Some(5.0));
///
/// schedule.advance_past(5.0);
/// assert!(schedule.is_exhausted());
/// assert_eq!(schedule.next_after(5.0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BreakpointSchedule {
    times: Vec<f64>,
    cursor: usize,
    tolerance: f64,
}

impl BreakpointSchedule {
    /// Creates a schedule from any collection of times.
    ///
    /// Times are sorted and deduplicated within `tolerance`; the cursor starts
    /// at the first breakpoint.
    ///
    /// # Errors
    ///
    /// Returns a [`BreakpointError`] if any time is non-finite or the tolerance
    /// is negative or non-finite.
    pub fn new<I>(times: I, tolerance: f64) -> Result<Self, BreakpointError>
    where
        I: IntoIterator<Item = f64>,
    {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(BreakpointError::Tolerance { tolerance });
        }

        let mut times: Vec<f64> = times.into_iter().collect();
        if let Some(index) = times.iter().position(|t| !t.is_finite()) {
            return Err(BreakpointError::NonFinite {
                index,
                time: times[index],
            });
        }

        times.sort_by(f64::total_cmp);
        times.dedup_by(|later, earlier| *later - *earlier <= tolerance);

        Ok(Self {
            times,
            cursor: 0,
            tolerance,
        })
    }

    /// Returns a new schedule containing this schedule's remaining
    /// breakpoints and `extra`.
    ///
    /// The cursor of the returned schedule starts at its first breakpoint.
    ///
    /// # Errors
    ///
    /// Returns a [`BreakpointError`] if any extra time is non-finite.
    pub fn merge<I>(&self, extra: I) -> Result<Self, BreakpointError>
    where
        I: IntoIterator<Item = f64>,
    {
        let times = self.remaining().iter().copied().chain(extra);
        Self::new(times, self.tolerance)
    }

    /// Returns the first unconsumed breakpoint strictly after `time`.
    ///
    /// Breakpoints within the tolerance of `time` count as reached and are
    /// skipped. Returns `None` once every breakpoint has been passed.
    #[must_use]
    pub fn next_after(&self, time: f64) -> Option<f64> {
        self.remaining()
            .iter()
            .copied()
            .find(|&breakpoint| breakpoint > time + self.tolerance)
    }

    /// Consumes every breakpoint at or before `time` (within tolerance).
    pub fn advance_past(&mut self, time: f64) {
        let passed = self
            .remaining()
            .partition_point(|&breakpoint| breakpoint <= time + self.tolerance);
        self.cursor += passed;
    }

    /// Returns the breakpoints not yet consumed, in increasing order.
    #[must_use]
    pub fn remaining(&self) -> &[f64] {
        &self.times[self.cursor..]
    }

    /// Returns every breakpoint, consumed or not.
    #[must_use]
    pub fn all(&self) -> &[f64] {
        &self.times
    }

    /// Returns `true` when no breakpoints remain.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.times.len()
    }

    /// Returns the total number of breakpoints, consumed or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns `true` if the schedule has no breakpoints at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the tolerance used to compare times.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}
