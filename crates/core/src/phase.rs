//! Conversation phase transitions.

use recovery_bot_model::{Phase, Sentiment};

/// Computes the phase and aggregate sentiment after a user turn.
///
/// `aggregate` is the customer's overall sentiment so far and `turn` is
/// the sentiment of the new message. The rules, first match wins:
///
/// 1. A positive turn resolves the conversation, unless it is already
///    resolved, and makes the aggregate positive.
/// 2. A neutral turn softens a negative aggregate to neutral, and moves
///    an initial conversation on to understanding.
/// 3. A negative turn moves initial to understanding and understanding
///    to resolving. The aggregate is kept.
/// 4. Anything else changes nothing.
///
/// Phases never move backwards, and nothing leaves [`Phase::Resolved`].
pub fn advance(
    phase: Phase,
    aggregate: Sentiment,
    turn: Sentiment,
) -> (Phase, Sentiment) {
    match turn {
        Sentiment::Positive if phase != Phase::Resolved => {
            (Phase::Resolved, Sentiment::Positive)
        }
        Sentiment::Neutral if aggregate == Sentiment::Negative => {
            let phase = match phase {
                Phase::Initial => Phase::Understanding,
                phase => phase,
            };
            (phase, Sentiment::Neutral)
        }
        Sentiment::Negative => {
            let phase = match phase {
                Phase::Initial => Phase::Understanding,
                Phase::Understanding => Phase::Resolving,
                phase => phase,
            };
            (phase, aggregate)
        }
        _ => (phase, aggregate),
    }
}
