//! Deterministic reply pickers for testing purpose.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use recovery_bot_model::ReplyPicker;

/// Always picks the first candidate.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstPicker;

impl ReplyPicker for FirstPicker {
    #[inline]
    fn pick(&self, _candidates: &[String]) -> usize {
        0
    }
}

/// Picks candidates following a preset sequence of indices.
///
/// Once the sequence is exhausted it starts over from the beginning. An
/// empty sequence always picks the first candidate.
#[derive(Debug, Default)]
pub struct SequencePicker {
    indices: Vec<usize>,
    cursor: AtomicUsize,
}

impl SequencePicker {
    /// Creates a picker that returns `indices` in order.
    #[inline]
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self {
            indices: indices.into(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Returns how many picks have been made so far.
    #[inline]
    pub fn picks(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }
}

impl ReplyPicker for SequencePicker {
    fn pick(&self, _candidates: &[String]) -> usize {
        let cursor = self.cursor.fetch_add(1, Ordering::Relaxed);
        if self.indices.is_empty() {
            return 0;
        }
        self.indices[cursor % self.indices.len()]
    }
}

/// Picks the first candidate and remembers every candidate list it saw.
///
/// # Note
///
/// The recorded lists are cloned on every pick. You should only use it
/// for testing.
#[derive(Debug, Default)]
pub struct RecordingPicker {
    seen: Mutex<Vec<Vec<String>>>,
}

impl RecordingPicker {
    /// Returns the candidate lists seen so far, in pick order.
    pub fn seen(&self) -> Vec<Vec<String>> {
        self.seen.lock().unwrap().clone()
    }
}

impl ReplyPicker for RecordingPicker {
    fn pick(&self, candidates: &[String]) -> usize {
        self.seen.lock().unwrap().push(candidates.to_vec());
        0
    }
}
