use std::borrow::Cow;
use std::fmt::{self, Display};

use recovery_bot_actor::ActorDeadError;

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The user input was empty or only contained whitespace.
    EmptyInput,
    /// A response table could not be parsed, or has no candidates for
    /// some phase and sentiment.
    InvalidResponseTable,
    /// The session has been closed.
    SessionClosed,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::EmptyInput => write!(f, "Empty input"),
            ErrorKind::InvalidResponseTable => {
                write!(f, "Invalid response table")
            }
            ErrorKind::SessionClosed => write!(f, "Session closed"),
        }
    }
}

/// The error type of the conversation engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Error {
    kind: ErrorKind,
    reason: Option<String>,
}

impl Error {
    /// Creates a new error with the `EmptyInput` kind.
    #[inline]
    pub fn empty_input() -> Self {
        Self {
            kind: ErrorKind::EmptyInput,
            reason: None,
        }
    }

    /// Creates a new error with the `InvalidResponseTable` kind.
    #[inline]
    pub fn invalid_response_table() -> Self {
        Self {
            kind: ErrorKind::InvalidResponseTable,
            reason: None,
        }
    }

    /// Creates a new error with the `SessionClosed` kind.
    #[inline]
    pub fn session_closed() -> Self {
        Self {
            kind: ErrorKind::SessionClosed,
            reason: None,
        }
    }

    /// Attaches a reason to the error.
    #[inline]
    pub fn with_reason<S: Into<String>>(self, reason: S) -> Self {
        Self {
            kind: self.kind,
            reason: Some(reason.into()),
        }
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the reason for the error.
    #[inline]
    pub fn reason(&self) -> Cow<'_, str> {
        match self.reason.as_deref() {
            Some(reason) => Cow::Borrowed(reason),
            None => Cow::Owned(format!("{}", self.kind)),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{}: {reason}", self.kind),
            None => self.kind.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<ActorDeadError> for Error {
    #[inline]
    fn from(err: ActorDeadError) -> Self {
        Error::session_closed().with_reason(err.to_string())
    }
}
