use std::fmt::Debug;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

use crate::{Actor, ActorDeadError};

/// Helper trait for handling boxed messages.
pub trait BoxMessage<S>: Send + Debug + 'static {
    fn handle_box(self: Box<Self>, state: &mut S, handle: &Actor<S>);
}

/// The message that an actor can handle.
pub trait Message<S>: BoxMessage<S> {
    /// Handles the message with mutable access to the actor's state.
    fn handle(self, state: &mut S, handle: &Actor<S>);
}

impl<S, M: Message<S>> BoxMessage<S> for M {
    #[inline]
    fn handle_box(self: Box<Self>, state: &mut S, handle: &Actor<S>) {
        (*self).handle(state, handle)
    }
}

impl<S, M: Message<S> + ?Sized> Message<S> for Box<M> {
    #[inline]
    fn handle(self, state: &mut S, handle: &Actor<S>) {
        self.handle_box(state, handle)
    }
}

/// A posted message together with the instant it becomes due.
///
/// `None` means the message should be handled as soon as possible.
pub struct Envelope<S> {
    pub msg: Box<dyn Message<S>>,
    pub due: Option<Instant>,
}

pub struct MailboxParts<S> {
    pub mailbox: Mailbox<S>,
    pub envelope_rx: mpsc::UnboundedReceiver<Envelope<S>>,
    pub kill_rx: watch::Receiver<bool>,
}

pub struct Mailbox<S> {
    envelope_tx: mpsc::UnboundedSender<Envelope<S>>,
    kill_tx: watch::Sender<bool>,
    label: Option<Arc<str>>,
}

impl<S: Send + Sync + 'static> Mailbox<S> {
    #[inline]
    pub fn new(label: Option<Arc<str>>) -> MailboxParts<S> {
        let (envelope_tx, envelope_rx) = mpsc::unbounded_channel();
        let (kill_tx, kill_rx) = watch::channel(false);
        MailboxParts {
            mailbox: Mailbox {
                envelope_tx,
                kill_tx,
                label,
            },
            envelope_rx,
            kill_rx,
        }
    }

    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[inline]
    pub fn post(
        &self,
        msg: Box<dyn Message<S>>,
        due: Option<Instant>,
    ) -> Result<(), ActorDeadError> {
        self.envelope_tx
            .send(Envelope { msg, due })
            .map_err(|_| ActorDeadError::new(self.label.clone()))
    }

    #[inline]
    pub fn try_kill(&self) {
        self.kill_tx.send(true).ok();
    }
}
