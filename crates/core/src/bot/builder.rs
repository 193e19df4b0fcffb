use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use recovery_bot_model::{Message, ReplyPicker, Sentiment};

use super::{OnIdle, OnMessage, RecoveryBot};
use crate::classifier::Classifier;
use crate::reply::{RandomPicker, ResponseTable};

/// How long the bot "types" before a reply shows up.
pub const DEFAULT_TYPING_DELAY: Duration = Duration::from_millis(1000);

/// The first message of a session, following up on the customer's
/// review.
pub const DEFAULT_GREETING: &str = "Hello! I noticed you left a review \
    mentioning that the product is 'rubbish'. I'm here to help resolve any \
    issues you're experiencing. Could you tell me what specifically went \
    wrong?";

/// [`RecoveryBot`] builder.
pub struct RecoveryBotBuilder {
    pub(crate) classifier: Classifier,
    pub(crate) response_table: ResponseTable,
    pub(crate) picker: Box<dyn ReplyPicker>,
    pub(crate) typing_delay: Duration,
    pub(crate) greeting: Option<(String, DateTime<Utc>)>,
    pub(crate) initial_sentiment: Sentiment,
    pub(crate) on_message: Option<OnMessage>,
    pub(crate) on_idle: Option<OnIdle>,
}

impl RecoveryBotBuilder {
    /// Creates a builder with the default settings.
    ///
    /// The session greets the customer with [`DEFAULT_GREETING`], dated
    /// five minutes back, and assumes a negative starting sentiment.
    pub fn new() -> Self {
        Self {
            classifier: Classifier::default(),
            response_table: ResponseTable::default(),
            picker: Box::new(RandomPicker),
            typing_delay: DEFAULT_TYPING_DELAY,
            greeting: Some((
                DEFAULT_GREETING.to_owned(),
                Utc::now() - TimeDelta::minutes(5),
            )),
            initial_sentiment: Sentiment::Negative,
            on_message: None,
            on_idle: None,
        }
    }

    /// Sets the classifier for user messages.
    #[inline]
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Sets the canned replies.
    #[inline]
    pub fn with_response_table(mut self, table: ResponseTable) -> Self {
        self.response_table = table;
        self
    }

    /// Sets how a reply is chosen among the candidates.
    #[inline]
    pub fn with_reply_picker<P: ReplyPicker + 'static>(
        mut self,
        picker: P,
    ) -> Self {
        self.picker = Box::new(picker);
        self
    }

    /// Sets the delay between a user message and the bot's reply.
    #[inline]
    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = delay;
        self
    }

    /// Replaces the greeting. It is stamped with the current time.
    #[inline]
    pub fn with_greeting<S: Into<String>>(mut self, greeting: S) -> Self {
        self.greeting = Some((greeting.into(), Utc::now()));
        self
    }

    /// Starts the session with an empty transcript.
    #[inline]
    pub fn without_greeting(mut self) -> Self {
        self.greeting = None;
        self
    }

    /// Sets the customer's sentiment before the first turn.
    #[inline]
    pub fn with_initial_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.initial_sentiment = sentiment;
        self
    }

    /// Attaches a callback to be invoked for every message appended to the
    /// transcript, the user's and the bot's alike.
    #[inline]
    pub fn on_message(
        mut self,
        on_message: impl Fn(&Message) + Send + Sync + 'static,
    ) -> Self {
        self.on_message = Some(Box::new(on_message));
        self
    }

    /// Attaches a callback to be invoked when the bot has delivered every
    /// pending reply.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Builds the bot and starts its session.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    #[inline]
    pub fn build(self) -> RecoveryBot {
        RecoveryBot::spawn_from_builder(self)
    }
}

impl Default for RecoveryBotBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
