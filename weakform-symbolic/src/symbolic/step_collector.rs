/// A type that collects the rewrite steps taken while canonicalizing a sum.
///
/// [`StepCollector`] is implemented for the unit type `()`, which discards every step; this is
/// what the plain sum factory uses. Collect into a [`Vec`] to get the full list of steps, or into a
/// [`usize`] to only count them.
pub trait StepCollector<S> {
    /// Adds a step to the collector.
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

impl<S> StepCollector<S> for usize {
    #[inline]
    fn push(&mut self, _: S) {
        *self += 1;
    }
}
