mod builder;
mod state;
#[cfg(test)]
mod tests;

use std::time::Duration;

use recovery_bot_actor::Actor;
use recovery_bot_model::Message as ChatMessage;
use tokio::sync::oneshot;

use crate::Error;
use crate::classifier::Classifier;
use crate::reply::Responder;
use crate::transcript::Transcript;
pub use builder::{DEFAULT_GREETING, DEFAULT_TYPING_DELAY, RecoveryBotBuilder};
use state::{TakeSnapshot, UserTurn};

type OnMessage = Box<dyn Fn(&ChatMessage) + Send + Sync>;
type OnIdle = Box<dyn Fn() + Send + Sync>;

/// The state owned by a recovery bot task.
///
/// User turns are applied as soon as they arrive. Replies are posted
/// back to the same task as deferred messages, which the actor handles
/// in the order they were posted, so a customer typing ahead still sees
/// the replies in the order of their messages.
pub(crate) struct BotState {
    transcript: Transcript,
    classifier: Classifier,
    responder: Responder,
    typing_delay: Duration,
    pending_replies: usize,

    on_message: Option<OnMessage>,
    on_idle: Option<OnIdle>,
}

/// A running recovery bot session.
///
/// Cloning the handle is cheap, and every clone talks to the same
/// session. The session ends when [`RecoveryBot::close`] is called or
/// the last handle is dropped. Replies that are still pending at that
/// point are dropped.
#[derive(Clone)]
pub struct RecoveryBot {
    handle: Actor<BotState>,
}

impl RecoveryBot {
    /// Sends a customer message to the bot.
    ///
    /// Blank input is rejected with [`crate::ErrorKind::EmptyInput`] and
    /// never reaches the transcript.
    pub fn send_message(&self, text: &str) -> Result<(), Error> {
        if text.trim().is_empty() {
            return Err(Error::empty_input());
        }
        self.handle.send(UserTurn(text.to_owned()))?;
        Ok(())
    }

    /// Returns a copy of the transcript as of now.
    ///
    /// Messages sent before this call are already applied, but replies
    /// that are still being typed are not included.
    pub async fn snapshot(&self) -> Result<Transcript, Error> {
        let (tx, rx) = oneshot::channel();
        self.handle.send(TakeSnapshot(tx))?;
        rx.await.map_err(|_| Error::session_closed())
    }

    /// Ends the session.
    #[inline]
    pub fn close(&self) {
        self.handle.try_kill();
    }
}

impl RecoveryBot {
    fn spawn_from_builder(builder: RecoveryBotBuilder) -> Self {
        let RecoveryBotBuilder {
            classifier,
            response_table,
            picker,
            typing_delay,
            greeting,
            initial_sentiment,
            on_message,
            on_idle,
        } = builder;

        let mut transcript = Transcript::new(initial_sentiment);
        if let Some((greeting, sent_at)) = greeting {
            transcript.push_greeting(greeting, sent_at);
        }

        let state = BotState {
            transcript,
            classifier,
            responder: Responder::from_boxed(response_table, picker),
            typing_delay,
            pending_replies: 0,
            on_message,
            on_idle,
        };
        let handle = Actor::spawn(state, Some("recovery-bot"));
        Self { handle }
    }
}
