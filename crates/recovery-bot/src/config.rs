use std::error::Error;
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

use recovery_bot_core::{DEFAULT_TYPING_DELAY, ResponseTable};
use recovery_bot_model::CaseDetails;

/// Environment variable holding the typing delay in milliseconds.
pub const TYPING_DELAY_VAR: &str = "RECOVERY_BOT_REPLY_DELAY_MS";

/// Environment variable holding the path of a JSON response table.
pub const RESPONSES_VAR: &str = "RECOVERY_BOT_RESPONSES";

/// Builder for [`Config`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigBuilder {
    typing_delay: Option<Duration>,
    responses_path: Option<PathBuf>,
    case: Option<CaseDetails>,
}

impl ConfigBuilder {
    /// Creates a builder with nothing set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the delay between a customer message and the bot's reply.
    #[inline]
    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = Some(delay);
        self
    }

    /// Sets the path of a JSON response table.
    #[inline]
    pub fn with_responses_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.responses_path = Some(path.into());
        self
    }

    /// Sets the case shown next to the conversation.
    #[inline]
    pub fn with_case(mut self, case: CaseDetails) -> Self {
        self.case = Some(case);
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> Config {
        Config {
            typing_delay: self.typing_delay.unwrap_or(DEFAULT_TYPING_DELAY),
            responses_path: self.responses_path,
            case: self.case.unwrap_or_default(),
        }
    }
}

/// Settings of a recovery bot session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub(crate) typing_delay: Duration,
    pub(crate) responses_path: Option<PathBuf>,
    pub(crate) case: CaseDetails,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// See [`TYPING_DELAY_VAR`] and [`RESPONSES_VAR`].
    #[inline]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the configuration through a variable lookup function.
    ///
    /// Unset and blank variables keep their defaults.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let mut builder = ConfigBuilder::new();
        if let Some(value) = var(TYPING_DELAY_VAR) {
            let millis = value.parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue {
                    name: TYPING_DELAY_VAR,
                    value: value.clone(),
                }
            })?;
            builder = builder.with_typing_delay(Duration::from_millis(millis));
        }
        if let Some(path) = var(RESPONSES_VAR) {
            builder = builder.with_responses_path(path);
        }
        Ok(builder.build())
    }

    /// Returns the typing delay.
    #[inline]
    pub fn typing_delay(&self) -> Duration {
        self.typing_delay
    }

    /// Returns the path of the response table, if one is configured.
    #[inline]
    pub fn responses_path(&self) -> Option<&Path> {
        self.responses_path.as_deref()
    }

    /// Returns the case details.
    #[inline]
    pub fn case(&self) -> &CaseDetails {
        &self.case
    }

    /// Loads the configured response table.
    ///
    /// Returns `None` when no table is configured, in which case the
    /// built-in replies are used.
    pub fn load_response_table(
        &self,
    ) -> Result<Option<ResponseTable>, ConfigError> {
        let Some(path) = &self.responses_path else {
            return Ok(None);
        };
        let json = fs::read_to_string(path).map_err(|source| {
            ConfigError::Io {
                path: path.clone(),
                source,
            }
        })?;
        let table = ResponseTable::from_json(&json)
            .map_err(ConfigError::ResponseTable)?;
        debug!("loaded response table from {}", path.display());
        Ok(Some(table))
    }
}

impl Default for Config {
    #[inline]
    fn default() -> Self {
        ConfigBuilder::new().build()
    }
}

/// The error returned when a configuration cannot be loaded.
#[derive(Debug)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be parsed.
    InvalidValue {
        /// Name of the variable.
        name: &'static str,
        /// The offending value.
        value: String,
    },
    /// The response table file cannot be read.
    Io {
        /// Path of the file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// The response table file is not a valid table.
    ResponseTable(recovery_bot_core::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { name, value } => {
                write!(f, "invalid value for {name}: `{value}`")
            }
            ConfigError::Io { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            ConfigError::ResponseTable(err) => err.fmt(f),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::InvalidValue { .. } => None,
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::ResponseTable(err) => Some(err),
        }
    }
}
