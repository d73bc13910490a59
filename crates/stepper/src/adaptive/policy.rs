use crate::table::PiecewiseLinearTable;

/// How accepted steps choose their next size, fixed at construction.
#[derive(Debug, Default)]
pub enum Policy {
    /// Grow, hold, or shrink from iteration feedback.
    #[default]
    Heuristic,

    /// Read the next step from a time table.
    ///
    /// The table value is capped at the previous step times the growth factor
    /// (or at the previous step right after a rejection). Expensive solves
    /// still cut back when an iteration target is configured, and rejections
    /// always cut back regardless of the table.
    TableDriven(PiecewiseLinearTable),
}

impl Policy {
    /// Returns the step table in table mode.
    #[must_use]
    pub fn table(&self) -> Option<&PiecewiseLinearTable> {
        match self {
            Self::Heuristic => None,
            Self::TableDriven(table) => Some(table),
        }
    }
}
