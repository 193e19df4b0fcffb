use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// A type of error which can be returned whenever messages are sent to
/// an actor whose task has already ended.
///
/// The task ends when the actor is killed or when every handle to it
/// has been dropped.
#[derive(Clone)]
pub struct ActorDeadError {
    label: Option<Arc<str>>,
}

impl ActorDeadError {
    #[inline]
    pub(crate) fn new(label: Option<Arc<str>>) -> Self {
        Self { label }
    }

    /// Returns the label the dead actor was spawned with.
    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl fmt::Debug for ActorDeadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorDeadError")
            .field("label", &self.label)
            .finish()
    }
}

impl fmt::Display for ActorDeadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "actor `{label}` is no longer running"),
            None => "the actor is no longer running".fmt(f),
        }
    }
}

impl Error for ActorDeadError {}
