use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseTagError;

/// Stage of a scripted support conversation.
///
/// Phases are ordered: a conversation starts at [`Phase::Initial`] and
/// only ever moves towards [`Phase::Resolved`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// First contact after the negative review.
    #[default]
    Initial,
    /// The bot is finding out what went wrong.
    Understanding,
    /// The bot is working on a fix.
    Resolving,
    /// The customer is satisfied. No further phase changes happen.
    Resolved,
}

impl Phase {
    /// Every phase, in progression order.
    pub const ALL: [Phase; 4] = [
        Phase::Initial,
        Phase::Understanding,
        Phase::Resolving,
        Phase::Resolved,
    ];

    /// Returns the lowercase tag of this phase.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Initial => "initial",
            Phase::Understanding => "understanding",
            Phase::Resolving => "resolving",
            Phase::Resolved => "resolved",
        }
    }

    /// Returns a human readable label, suitable for a status badge.
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Phase::Initial => "Initial Contact",
            Phase::Understanding => "Understanding Issue",
            Phase::Resolving => "Resolving Problem",
            Phase::Resolved => "Issue Resolved",
        }
    }

    /// Returns `true` if this is the terminal phase.
    #[inline]
    pub fn is_resolved(self) -> bool {
        self == Phase::Resolved
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .into_iter()
            .find(|phase| phase.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseTagError::new("phase", s))
    }
}
