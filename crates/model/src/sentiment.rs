use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseTagError;

/// Coarse emotional polarity of a piece of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// The customer sounds pleased.
    Positive,
    /// The customer sounds upset.
    Negative,
    /// Neither, or both at once.
    Neutral,
}

impl Sentiment {
    /// Every sentiment, in declaration order.
    pub const ALL: [Sentiment; 3] =
        [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    /// Returns the lowercase tag of this sentiment.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sentiment::ALL
            .into_iter()
            .find(|sentiment| sentiment.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseTagError::new("sentiment", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("negative".parse(), Ok(Sentiment::Negative));
        assert_eq!("Positive".parse(), Ok(Sentiment::Positive));
        let err = "angry".parse::<Sentiment>().unwrap_err();
        assert_eq!(err.tag(), "angry");
        assert_eq!(err.to_string(), "unknown sentiment tag `angry`");
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&Sentiment::Neutral).unwrap();
        assert_eq!(json, "\"neutral\"");
    }
}
