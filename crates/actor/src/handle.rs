use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::Instrument;

use crate::mailbox::{Mailbox, MailboxParts};
use crate::scheduler::run_actor;
use crate::{ActorDeadError, Message};

/// Roughly 30 years, the due time used when a delay cannot be represented.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Handle to an actor.
pub struct Actor<S> {
    mailbox: Arc<Mailbox<S>>,
}

impl<S: Send + Sync + 'static> Actor<S> {
    /// Spawn a new actor with the specified state and an optional label.
    ///
    /// The label shows up in the tracing span of the actor task and in
    /// [`ActorDeadError`]s returned by this handle.
    pub fn spawn(state: S, label: Option<&str>) -> Self {
        let label: Option<Arc<str>> = label.map(Arc::from);
        let MailboxParts {
            mailbox,
            envelope_rx,
            kill_rx,
        } = Mailbox::new(label.clone());
        let mailbox = Arc::new(mailbox);
        tokio::spawn(
            run_actor(Arc::downgrade(&mailbox), state, envelope_rx, kill_rx)
                .instrument(trace_span!("actor", label = label.as_deref())),
        );
        Self { mailbox }
    }

    #[inline]
    pub(crate) fn from_mailbox(mailbox: Arc<Mailbox<S>>) -> Self {
        Self { mailbox }
    }

    /// Returns the label this actor was spawned with.
    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.mailbox.label()
    }

    /// Sends a message to the actor.
    #[inline]
    pub fn send<M: Message<S> + 'static>(
        &self,
        msg: M,
    ) -> Result<(), ActorDeadError> {
        self.mailbox.post(Box::new(msg), None)
    }

    /// Sends a message that the actor handles no earlier than `due`.
    ///
    /// Deferred messages are handled in the order they were sent. If an
    /// earlier deferred message is due later than `due`, this message
    /// waits for it. Messages sent with [`Actor::send`] are not held back
    /// by pending deferred messages.
    ///
    /// Deferred messages that are still pending when the actor stops are
    /// dropped without being handled.
    #[inline]
    pub fn send_at<M: Message<S> + 'static>(
        &self,
        due: Instant,
        msg: M,
    ) -> Result<(), ActorDeadError> {
        self.mailbox.post(Box::new(msg), Some(due))
    }

    /// Sends a message that the actor handles after `delay` has elapsed.
    ///
    /// See [`Actor::send_at`] for the ordering guarantees. A delay too
    /// large to be added to the current instant is capped to a due time
    /// far in the future.
    #[inline]
    pub fn send_after<M: Message<S> + 'static>(
        &self,
        delay: Duration,
        msg: M,
    ) -> Result<(), ActorDeadError> {
        let now = Instant::now();
        let due = now.checked_add(delay).unwrap_or_else(|| now + FAR_FUTURE);
        self.send_at(due, msg)
    }

    /// Attempts to kill the actor.
    ///
    /// The actor is not guaranteed to be killed immediately, but it
    /// will stop handling further messages and quit soon.
    #[inline]
    pub fn try_kill(&self) {
        self.mailbox.try_kill();
    }
}

impl<S> Clone for Actor<S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            mailbox: Arc::clone(&self.mailbox),
        }
    }
}
