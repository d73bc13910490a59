/// Hook called once per reported solve attempt.
///
/// The step controller hands each `E` (an accepted or rejected attempt) to the
/// observer before it commits the next step. Returning `Some(action)` lets the
/// caller adjust that step, for example by capping it; `None` leaves the
/// controller's choice alone.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer, and `()` is the
/// observer that never acts.
pub trait Observer<E, A> {
    /// Inspects one attempt and optionally returns an action for the next step.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
