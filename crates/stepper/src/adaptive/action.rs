/// Actions an observer can take after a reported solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Cap the next proposed step at this size.
    ///
    /// The cap goes through the same constraints as any other proposal, so it
    /// never pushes the step below `dt_min` or past a breakpoint. The cap must
    /// be finite and positive.
    LimitStep(f64),
}
