//! The state of one conversation.

use chrono::{DateTime, Utc};
use recovery_bot_model::{Message, Phase, Sentiment};
use serde::Serialize;

use crate::classifier::Classifier;
use crate::phase::advance;

/// Ordered message history of a conversation, together with its current
/// phase and the customer's aggregate sentiment.
///
/// Messages are append-only and get strictly increasing ids, starting
/// at 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transcript {
    messages: Vec<Message>,
    phase: Phase,
    sentiment: Sentiment,
    initial_sentiment: Sentiment,
    #[serde(skip)]
    next_id: u64,
}

/// What a user turn did to a [`Transcript`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Turn {
    /// Id of the appended user message.
    pub message_id: u64,
    /// Sentiment the message was classified with.
    pub sentiment: Sentiment,
    /// Phase after the turn.
    pub phase: Phase,
    /// Aggregate sentiment after the turn.
    pub aggregate: Sentiment,
}

impl Transcript {
    /// Creates an empty transcript in the initial phase.
    #[inline]
    pub fn new(initial_sentiment: Sentiment) -> Self {
        Self {
            messages: vec![],
            phase: Phase::Initial,
            sentiment: initial_sentiment,
            initial_sentiment,
            next_id: 1,
        }
    }

    /// Returns all messages, oldest first.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the most recent message.
    #[inline]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if there are no messages.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the customer's current aggregate sentiment.
    #[inline]
    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
    }

    /// Returns the aggregate sentiment the conversation started with.
    #[inline]
    pub fn initial_sentiment(&self) -> Sentiment {
        self.initial_sentiment
    }

    /// Appends a bot message that was sent at `sent_at`.
    pub fn push_greeting<S: Into<String>>(
        &mut self,
        content: S,
        sent_at: DateTime<Utc>,
    ) -> &Message {
        self.push(|id| Message::bot(id, content).with_timestamp(sent_at))
    }

    /// Appends a bot message.
    pub fn push_bot_message<S: Into<String>>(
        &mut self,
        content: S,
    ) -> &Message {
        self.push(|id| Message::bot(id, content))
    }

    /// Classifies `text`, appends it as a user message and advances the
    /// conversation.
    pub fn apply_user_turn(
        &mut self,
        classifier: &Classifier,
        text: &str,
    ) -> Turn {
        let sentiment = classifier.classify(text);
        let message_id =
            self.push(|id| Message::user(id, text, sentiment)).id();

        let (phase, aggregate) = advance(self.phase, self.sentiment, sentiment);
        if phase != self.phase {
            debug!("phase changed: {} -> {phase}", self.phase);
        }
        self.phase = phase;
        self.sentiment = aggregate;

        Turn {
            message_id,
            sentiment,
            phase,
            aggregate,
        }
    }

    fn push(&mut self, make: impl FnOnce(u64) -> Message) -> &Message {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(make(id));
        &self.messages[self.messages.len() - 1]
    }
}

impl Default for Transcript {
    /// The customer opens the conversation with a negative review.
    #[inline]
    fn default() -> Self {
        Self::new(Sentiment::Negative)
    }
}

#[cfg(test)]
mod tests {
    use recovery_bot_model::Sender;

    use super::*;
    use crate::reply::ResponseTable;

    #[test]
    fn test_recovery_scenario() {
        let classifier = Classifier::default();
        let table = ResponseTable::default();
        let mut transcript = Transcript::default();
        transcript.push_greeting("Hello!", Utc::now());

        let turn = transcript
            .apply_user_turn(&classifier, "the product is rubbish and broken");
        assert_eq!(turn.sentiment, Sentiment::Negative);
        assert_eq!(turn.phase, Phase::Understanding);
        let reply = &table.candidates(turn.phase, turn.sentiment)[0];
        transcript.push_bot_message(reply.as_str());

        let text = "thanks, it's fixed now, works great";
        let turn = transcript.apply_user_turn(&classifier, text);
        assert_eq!(turn.sentiment, Sentiment::Positive);
        assert_eq!(turn.phase, Phase::Resolved);
        assert_eq!(turn.aggregate, Sentiment::Positive);
        let reply = &table.candidates(turn.phase, turn.sentiment)[0];
        transcript.push_bot_message(reply.as_str());

        assert_eq!(transcript.len(), 5);
        assert_eq!(transcript.phase(), Phase::Resolved);
        assert_eq!(transcript.sentiment(), Sentiment::Positive);
        assert_eq!(transcript.initial_sentiment(), Sentiment::Negative);

        let senders: Vec<_> =
            transcript.messages().iter().map(Message::sender).collect();
        assert_eq!(
            senders,
            [Sender::Bot, Sender::User, Sender::Bot, Sender::User, Sender::Bot]
        );
        let ids: Vec<_> =
            transcript.messages().iter().map(Message::id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sentiment_tags() {
        let classifier = Classifier::default();
        let mut transcript = Transcript::default();
        transcript.push_bot_message("How can I help?");
        transcript.apply_user_turn(&classifier, "it is okay");
        transcript.push_bot_message("I see.");

        for message in transcript.messages() {
            assert_eq!(message.is_bot(), message.sentiment().is_none());
        }
    }

    #[test]
    fn test_resolved_stays_resolved() {
        let classifier = Classifier::default();
        let mut transcript = Transcript::default();
        transcript.apply_user_turn(&classifier, "great, solved");
        assert_eq!(transcript.phase(), Phase::Resolved);

        let turn = transcript.apply_user_turn(&classifier, "actually, broken");
        assert_eq!(turn.sentiment, Sentiment::Negative);
        assert_eq!(turn.phase, Phase::Resolved);
        assert_eq!(transcript.sentiment(), Sentiment::Positive);
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_neutral_turn_softens() {
        let classifier = Classifier::default();
        let mut transcript = Transcript::default();
        let turn = transcript.apply_user_turn(&classifier, "it stopped");
        assert_eq!(turn.sentiment, Sentiment::Neutral);
        assert_eq!(turn.phase, Phase::Understanding);
        assert_eq!(transcript.sentiment(), Sentiment::Neutral);
    }
}
