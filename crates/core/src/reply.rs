//! Canned replies and how they are selected.

use std::sync::LazyLock;

use rand::Rng;
use recovery_bot_model::{Phase, ReplyPicker, Sentiment};
use serde::{Deserialize, Serialize};

use crate::Error;

static DEFAULT_TABLE: LazyLock<ResponseTable> =
    LazyLock::new(ResponseTable::default);

/// Selects a reply from the default table with a [`RandomPicker`].
#[inline]
pub fn select_reply(phase: Phase, sentiment: Sentiment) -> &'static str {
    pick_from(DEFAULT_TABLE.candidates(phase, sentiment), &RandomPicker)
}

/// Candidate replies for one phase, keyed by the sentiment of the turn.
///
/// Every list holds at least one reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPhaseReplies")]
pub struct PhaseReplies {
    negative: Vec<String>,
    neutral: Vec<String>,
    positive: Vec<String>,
}

#[derive(Deserialize)]
struct RawPhaseReplies {
    negative: Vec<String>,
    neutral: Vec<String>,
    positive: Vec<String>,
}

impl TryFrom<RawPhaseReplies> for PhaseReplies {
    type Error = Error;

    fn try_from(raw: RawPhaseReplies) -> Result<Self, Self::Error> {
        PhaseReplies::new(raw.negative, raw.neutral, raw.positive)
    }
}

impl PhaseReplies {
    /// Creates the replies of one phase.
    ///
    /// Fails with [`crate::ErrorKind::InvalidResponseTable`] if any of
    /// the lists is empty.
    pub fn new<N, U, P>(
        negative: N,
        neutral: U,
        positive: P,
    ) -> Result<Self, Error>
    where
        N: IntoIterator<Item: Into<String>>,
        U: IntoIterator<Item: Into<String>>,
        P: IntoIterator<Item: Into<String>>,
    {
        let replies = Self {
            negative: negative.into_iter().map(Into::into).collect(),
            neutral: neutral.into_iter().map(Into::into).collect(),
            positive: positive.into_iter().map(Into::into).collect(),
        };
        if let Some(sentiment) = Sentiment::ALL
            .into_iter()
            .find(|sentiment| replies.candidates(*sentiment).is_empty())
        {
            return Err(Error::invalid_response_table()
                .with_reason(format!("no {sentiment} replies")));
        }
        Ok(replies)
    }

    fn from_static(
        negative: [&str; 2],
        neutral: [&str; 2],
        positive: [&str; 2],
    ) -> Self {
        let to_vec = |replies: [&str; 2]| Vec::from(replies.map(str::to_owned));
        Self {
            negative: to_vec(negative),
            neutral: to_vec(neutral),
            positive: to_vec(positive),
        }
    }

    /// Returns the candidate replies to a turn with the given sentiment.
    #[inline]
    pub fn candidates(&self, sentiment: Sentiment) -> &[String] {
        match sentiment {
            Sentiment::Negative => &self.negative,
            Sentiment::Neutral => &self.neutral,
            Sentiment::Positive => &self.positive,
        }
    }
}

/// Canned replies keyed by conversation phase and turn sentiment.
///
/// The resolved phase has no replies of its own unless they are set with
/// [`ResponseTable::with_resolved`]. Until then it reuses the replies of
/// the initial phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseTable {
    initial: PhaseReplies,
    understanding: PhaseReplies,
    resolving: PhaseReplies,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolved: Option<PhaseReplies>,
}

impl ResponseTable {
    /// Creates a table without dedicated replies for the resolved phase.
    #[inline]
    pub fn new(
        initial: PhaseReplies,
        understanding: PhaseReplies,
        resolving: PhaseReplies,
    ) -> Self {
        Self {
            initial,
            understanding,
            resolving,
            resolved: None,
        }
    }

    /// Sets dedicated replies for the resolved phase.
    #[inline]
    pub fn with_resolved(mut self, resolved: PhaseReplies) -> Self {
        self.resolved = Some(resolved);
        self
    }

    /// Parses a table from JSON.
    ///
    /// The document is an object with `initial`, `understanding` and
    /// `resolving` keys, plus an optional `resolved` key. Each maps to an
    /// object with non-empty `negative`, `neutral` and `positive` string
    /// arrays.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|err| {
            Error::invalid_response_table().with_reason(err.to_string())
        })
    }

    /// Returns the replies used in the given phase.
    pub fn replies(&self, phase: Phase) -> &PhaseReplies {
        match phase {
            Phase::Initial => &self.initial,
            Phase::Understanding => &self.understanding,
            Phase::Resolving => &self.resolving,
            Phase::Resolved => self.resolved.as_ref().unwrap_or(&self.initial),
        }
    }

    /// Returns the candidate replies for a phase and turn sentiment.
    #[inline]
    pub fn candidates(
        &self,
        phase: Phase,
        sentiment: Sentiment,
    ) -> &[String] {
        self.replies(phase).candidates(sentiment)
    }
}

impl Default for ResponseTable {
    fn default() -> Self {
        let initial = PhaseReplies::from_static(
            [
                "I understand your frustration. Let me help you resolve this \
                 issue. Can you describe exactly what problems you're \
                 experiencing?",
                "I'm sorry to hear about your disappointing experience. Could \
                 you provide more details about what went wrong so I can \
                 assist you better?",
            ],
            [
                "Thank you for sharing your feedback. Could you help me \
                 understand what specific aspects of the product aren't \
                 meeting your expectations?",
                "I'd like to help improve your experience. What particular \
                 issues are you facing with the product?",
            ],
            [
                "I'm glad to hear from you! Even though your initial review \
                 was concerning, it sounds like there might be some positive \
                 aspects. Could you tell me more?",
                "Thank you for taking the time to engage with us. What can I \
                 help you with regarding your product experience?",
            ],
        );
        let understanding = PhaseReplies::from_static(
            [
                "That does sound frustrating. Let me see what I can do to \
                 help. Have you tried resetting the headphones and pairing \
                 them again?",
                "I completely understand why that would be disappointing. \
                 Let's work together to fix this issue. Can you try this \
                 solution...",
            ],
            [
                "I see what you mean. Let me suggest a few things that might \
                 help improve your experience with the product.",
                "Thank you for the clarification. Based on what you've \
                 described, here are some solutions we can try...",
            ],
            [
                "That's encouraging to hear! It sounds like we're making \
                 progress. Is there anything else I can help you with?",
                "I'm happy that we're moving in the right direction. Let me \
                 know if you need any additional assistance.",
            ],
        );
        let resolving = PhaseReplies::from_static(
            [
                "I understand this is still not working as expected. Let me \
                 escalate this to our technical team and arrange a \
                 replacement for you.",
                "I apologize that the previous solution didn't work. I'm \
                 going to personally ensure this gets resolved for you today.",
            ],
            [
                "I see. Let me try a different approach that might be more \
                 effective for your specific situation.",
                "Thank you for trying that. Let's explore another solution \
                 that might work better for you.",
            ],
            [
                "Excellent! I'm so glad we were able to resolve this for you. \
                 Is there anything else I can help you with today?",
                "That's wonderful to hear! Your experience is very important \
                 to us. Thank you for giving us the chance to make this right.",
            ],
        );
        Self::new(initial, understanding, resolving)
    }
}

/// Picks a reply uniformly at random.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPicker;

impl ReplyPicker for RandomPicker {
    fn pick(&self, candidates: &[String]) -> usize {
        if candidates.len() <= 1 {
            return 0;
        }
        rand::thread_rng().gen_range(0..candidates.len())
    }
}

/// A response table bound to the picker that chooses among candidates.
pub struct Responder {
    table: ResponseTable,
    picker: Box<dyn ReplyPicker>,
}

impl Responder {
    /// Creates a responder.
    #[inline]
    pub fn new<P: ReplyPicker + 'static>(
        table: ResponseTable,
        picker: P,
    ) -> Self {
        Self {
            table,
            picker: Box::new(picker),
        }
    }

    #[inline]
    pub(crate) fn from_boxed(
        table: ResponseTable,
        picker: Box<dyn ReplyPicker>,
    ) -> Self {
        Self { table, picker }
    }

    /// Returns the response table.
    #[inline]
    pub fn table(&self) -> &ResponseTable {
        &self.table
    }

    /// Selects a reply to a turn with `sentiment` in `phase`.
    #[inline]
    pub fn select_reply(&self, phase: Phase, sentiment: Sentiment) -> &str {
        pick_from(self.table.candidates(phase, sentiment), self.picker.as_ref())
    }

    /// Like [`Responder::select_reply`], but takes a raw phase tag.
    ///
    /// Tags that don't name a phase select from the initial replies.
    pub fn select_reply_for_tag(
        &self,
        tag: &str,
        sentiment: Sentiment,
    ) -> &str {
        let phase = tag.parse().unwrap_or_else(|err| {
            debug!("{err}, using the initial replies");
            Phase::Initial
        });
        self.select_reply(phase, sentiment)
    }
}

impl Default for Responder {
    #[inline]
    fn default() -> Self {
        Self::new(ResponseTable::default(), RandomPicker)
    }
}

fn pick_from<'a, P: ReplyPicker + ?Sized>(
    candidates: &'a [String],
    picker: &P,
) -> &'a str {
    let index = picker.pick(candidates);
    candidates
        .get(index)
        .or_else(|| candidates.first())
        .map(String::as_str)
        .unwrap_or_default()
}
