//! Keyword based sentiment classification.
//!
//! This is a heuristic, not a model. A keyword matches anywhere inside
//! the lower-cased text, including inside longer words, so "unhappy"
//! counts as positive. That is accepted.

use recovery_bot_model::Sentiment;

/// Keywords that make a text sound positive.
pub const POSITIVE_KEYWORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "thanks",
    "helpful",
    "solved",
    "better",
    "fixed",
    "working",
    "satisfied",
    "happy",
];

/// Keywords that make a text sound negative.
pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "hate",
    "worst",
    "horrible",
    "rubbish",
    "poor",
    "broken",
    "useless",
    "disappointed",
];

/// Classifies `text` with the default keyword sets.
///
/// Returns [`Sentiment::Neutral`] when neither or both keyword sets
/// match. Never fails, empty input included.
#[inline]
pub fn classify(text: &str) -> Sentiment {
    classify_with(
        text,
        POSITIVE_KEYWORDS.iter().copied(),
        NEGATIVE_KEYWORDS.iter().copied(),
    )
}

/// A sentiment classifier with its own keyword sets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classifier {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl Classifier {
    /// Creates a classifier with custom keyword sets.
    ///
    /// Keywords are trimmed and lower-cased. Blank keywords are dropped,
    /// since they would match any text.
    pub fn with_keywords<P, N>(positive: P, negative: N) -> Self
    where
        P: IntoIterator<Item: AsRef<str>>,
        N: IntoIterator<Item: AsRef<str>>,
    {
        Self {
            positive: normalize_keywords(positive),
            negative: normalize_keywords(negative),
        }
    }

    /// Classifies `text`. See [`classify`].
    #[inline]
    pub fn classify(&self, text: &str) -> Sentiment {
        classify_with(
            text,
            self.positive.iter().map(String::as_str),
            self.negative.iter().map(String::as_str),
        )
    }
}

impl Default for Classifier {
    #[inline]
    fn default() -> Self {
        Self::with_keywords(POSITIVE_KEYWORDS, NEGATIVE_KEYWORDS)
    }
}

fn normalize_keywords<I>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item: AsRef<str>>,
{
    keywords
        .into_iter()
        .map(|keyword| keyword.as_ref().trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect()
}

fn classify_with<'a>(
    text: &str,
    positive: impl IntoIterator<Item = &'a str>,
    negative: impl IntoIterator<Item = &'a str>,
) -> Sentiment {
    let text = text.to_lowercase();
    let has_positive = positive.into_iter().any(|kw| text.contains(kw));
    let has_negative = negative.into_iter().any(|kw| text.contains(kw));
    match (has_positive, has_negative) {
        (true, false) => Sentiment::Positive,
        (false, true) => Sentiment::Negative,
        _ => Sentiment::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_matches() {
        assert_eq!(classify("this is rubbish"), Sentiment::Negative);
        assert_eq!(classify("works great now"), Sentiment::Positive);
        assert_eq!(classify("it is okay"), Sentiment::Neutral);
        assert_eq!(classify("good but also bad"), Sentiment::Neutral);
    }

    #[test]
    fn test_case_and_substring() {
        assert_eq!(classify("TERRIBLE headphones"), Sentiment::Negative);
        assert_eq!(classify("Thanks!"), Sentiment::Positive);
        // Matches inside a longer word.
        assert_eq!(classify("unhappy"), Sentiment::Positive);
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(classify(""), Sentiment::Neutral);
        assert_eq!(classify("   \n"), Sentiment::Neutral);
    }

    #[test]
    fn test_custom_keywords() {
        let classifier =
            Classifier::with_keywords(["  Superb ", ""], ["meh"]);
        assert_eq!(
            classifier.classify("SUPERB service"),
            Sentiment::Positive
        );
        assert_eq!(classifier.classify("meh"), Sentiment::Negative);
        assert_eq!(classifier.classify("it is rubbish"), Sentiment::Neutral);
    }

    #[test]
    fn test_default_classifier_agrees() {
        let classifier = Classifier::default();
        for text in [
            "the product is rubbish and broken",
            "thanks, it's fixed now, works great",
            "what do you mean?",
            "better, but still poor",
        ] {
            assert_eq!(classifier.classify(text), classify(text), "{text}");
        }
    }
}
