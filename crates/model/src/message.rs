use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Sentiment;

/// Who wrote a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The recovery bot.
    Bot,
    /// The customer.
    User,
}

/// A single entry in a conversation transcript.
///
/// User messages always carry the sentiment they were classified with,
/// bot messages never do. The constructors are the only way to build a
/// message, so the rule holds for every value of this type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Message {
    id: u64,
    sender: Sender,
    content: String,
    timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sentiment: Option<Sentiment>,
}

impl Message {
    /// Creates a bot message stamped with the current time.
    #[inline]
    pub fn bot<S: Into<String>>(id: u64, content: S) -> Self {
        Self {
            id,
            sender: Sender::Bot,
            content: content.into(),
            timestamp: Utc::now(),
            sentiment: None,
        }
    }

    /// Creates a user message stamped with the current time.
    #[inline]
    pub fn user<S: Into<String>>(
        id: u64,
        content: S,
        sentiment: Sentiment,
    ) -> Self {
        Self {
            id,
            sender: Sender::User,
            content: content.into(),
            timestamp: Utc::now(),
            sentiment: Some(sentiment),
        }
    }

    /// Replaces the creation timestamp.
    #[inline]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Returns the sequence id of this message.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns who wrote this message.
    #[inline]
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Returns the text of this message.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when this message was created.
    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the sentiment tag, which is only present on user messages.
    #[inline]
    pub fn sentiment(&self) -> Option<Sentiment> {
        self.sentiment
    }

    /// Returns `true` if the bot wrote this message.
    #[inline]
    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}
