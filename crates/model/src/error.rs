use std::error::Error;
use std::fmt::{self, Display};

/// The error returned when a phase or sentiment tag cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParseTagError {
    what: &'static str,
    tag: String,
}

impl ParseTagError {
    #[inline]
    pub(crate) fn new<S: Into<String>>(what: &'static str, tag: S) -> Self {
        Self {
            what,
            tag: tag.into(),
        }
    }

    /// Returns the tag that failed to parse.
    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} tag `{}`", self.what, self.tag)
    }
}

impl Error for ParseTagError {}
