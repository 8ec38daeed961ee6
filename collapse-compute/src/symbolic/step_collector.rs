/// A sink for the rewrites applied during simplification.
///
/// Passing `()` discards every step, which is what [`simplify`](super::simplify()) does. Passing
/// a [`Vec`] records them in the order they were applied.
pub trait StepCollector<S> {
    /// Records a step.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
