use std::collections::VecDeque;
use std::sync::Weak;

use tokio::select;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, sleep_until};

use crate::mailbox::{Envelope, Mailbox};
use crate::{Actor, Message};

/// Messages waiting for their due time, kept in submission order.
///
/// An entry never becomes due before the entry in front of it, so the
/// queue always drains from the front.
struct DeferredQueue<S> {
    items: VecDeque<(Instant, Box<dyn Message<S>>)>,
}

impl<S> DeferredQueue<S> {
    #[inline]
    fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    fn push(&mut self, due: Instant, msg: Box<dyn Message<S>>) {
        let due = match self.items.back() {
            Some((last_due, _)) if *last_due > due => *last_due,
            _ => due,
        };
        self.items.push_back((due, msg));
    }

    #[inline]
    fn next_due(&self) -> Option<Instant> {
        self.items.front().map(|(due, _)| *due)
    }

    #[inline]
    fn pop(&mut self) -> Option<Box<dyn Message<S>>> {
        self.items.pop_front().map(|(_, msg)| msg)
    }

    #[inline]
    fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub async fn run_actor<S: Send + Sync + 'static>(
    mailbox: Weak<Mailbox<S>>,
    mut state: S,
    mut envelope_rx: mpsc::UnboundedReceiver<Envelope<S>>,
    mut kill_rx: watch::Receiver<bool>,
) {
    debug!("started");
    let mut deferred = DeferredQueue::new();
    loop {
        let next_due = deferred.next_due();
        let msg = select! {
            biased;

            _ = kill_rx.changed() => {
                break;
            }
            _ = sleep_until(next_due.unwrap_or_else(Instant::now)),
                if next_due.is_some() =>
            {
                let Some(msg) = deferred.pop() else {
                    continue;
                };
                msg
            }
            envelope = envelope_rx.recv() => {
                let Some(Envelope { msg, due }) = envelope else {
                    break;
                };
                if let Some(due) = due {
                    trace!("deferred message: {msg:?}");
                    deferred.push(due, msg);
                    continue;
                }
                msg
            }
        };
        trace!("received message: {msg:?}");

        {
            let Some(mailbox) = mailbox.upgrade() else {
                warn!("last mailbox has been dropped, discard the message");
                break;
            };

            let proc_span = trace_span!("proc msg");
            proc_span.in_scope(|| {
                msg.handle(&mut state, &Actor::from_mailbox(mailbox));
                trace!("finished");
            });
        }
    }

    if !deferred.is_empty() {
        debug!("dropping {} deferred messages", deferred.len());
    }
    debug!("will terminate");
}
