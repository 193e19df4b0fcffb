/// A strategy for choosing one canned reply out of several candidates.
///
/// Implementors are shared between the session task and its host, so
/// they must be thread safe. Any interior state should be cheap to
/// update, since a pick happens on every user turn.
pub trait ReplyPicker: Send + Sync {
    /// Returns the index of the chosen candidate.
    ///
    /// `candidates` is never empty. Callers treat an out of range index
    /// as a pick of the first candidate.
    fn pick(&self, candidates: &[String]) -> usize;
}

impl<P: ReplyPicker + ?Sized> ReplyPicker for Box<P> {
    #[inline]
    fn pick(&self, candidates: &[String]) -> usize {
        (**self).pick(candidates)
    }
}
