use std::time::Duration;

use recovery_bot_core::{
    Error, RecoveryBot, RecoveryBotBuilder, ResponseTable, Transcript,
};
use recovery_bot_model::{CaseDetails, Message, ReplyPicker};

use crate::config::{Config, ConfigError};

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    bot_builder: RecoveryBotBuilder,
    case: CaseDetails,
}

impl SessionBuilder {
    /// Creates a session builder with the built-in replies and case.
    #[inline]
    pub fn new() -> Self {
        Self {
            bot_builder: RecoveryBotBuilder::new(),
            case: CaseDetails::default(),
        }
    }

    /// Creates a session builder from a loaded configuration.
    ///
    /// Fails if the configured response table cannot be loaded.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let mut builder = Self::new()
            .with_case(config.case().clone())
            .with_typing_delay(config.typing_delay());
        if let Some(table) = config.load_response_table()? {
            builder = builder.with_response_table(table);
        }
        Ok(builder)
    }

    /// Sets the case shown next to the conversation.
    #[inline]
    pub fn with_case(mut self, case: CaseDetails) -> Self {
        self.case = case;
        self
    }

    /// Sets the delay between a customer message and the bot's reply.
    #[inline]
    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.bot_builder = self.bot_builder.with_typing_delay(delay);
        self
    }

    /// Sets the canned replies.
    #[inline]
    pub fn with_response_table(mut self, table: ResponseTable) -> Self {
        self.bot_builder = self.bot_builder.with_response_table(table);
        self
    }

    /// Sets how a reply is chosen among the candidates.
    #[inline]
    pub fn with_reply_picker<P: ReplyPicker + 'static>(
        mut self,
        picker: P,
    ) -> Self {
        self.bot_builder = self.bot_builder.with_reply_picker(picker);
        self
    }

    /// Attaches a callback to be invoked for every new message.
    #[inline]
    pub fn on_message(
        mut self,
        on_message: impl Fn(&Message) + Send + Sync + 'static,
    ) -> Self {
        self.bot_builder = self.bot_builder.on_message(on_message);
        self
    }

    /// Attaches a callback to be invoked when every reply is delivered.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.bot_builder = self.bot_builder.on_idle(on_idle);
        self
    }

    /// Builds a new session.
    pub fn build(self) -> Session {
        let bot = self.bot_builder.build();
        Session {
            bot,
            case: self.case,
        }
    }
}

impl Default for SessionBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// A support chat, like a window that shows the case, the messages, and
/// has an input box.
///
/// The session holds a fully configured [`RecoveryBot`] and is basically
/// a wrapper around it.
pub struct Session {
    bot: RecoveryBot,
    case: CaseDetails,
}

impl Session {
    /// Returns the case this session follows up on.
    #[inline]
    pub fn case(&self) -> &CaseDetails {
        &self.case
    }

    /// Sends a customer message to the session.
    #[inline]
    pub fn send_message(&self, message: &str) -> Result<(), Error> {
        self.bot.send_message(message)
    }

    /// Returns a copy of the transcript as of now.
    #[inline]
    pub async fn snapshot(&self) -> Result<Transcript, Error> {
        self.bot.snapshot().await
    }

    /// Ends the session. Replies that are still pending are dropped.
    #[inline]
    pub fn close(&self) {
        self.bot.close();
    }
}

#[cfg(test)]
mod tests {
    use recovery_bot_model::{Phase, Sentiment};
    use recovery_bot_test_picker::FirstPicker;
    use tokio::sync::watch;

    use super::*;
    use crate::config::ConfigBuilder;

    #[tokio::test(start_paused = true)]
    async fn test_session_from_config() {
        let case = CaseDetails {
            customer: "Alex P.".to_owned(),
            product: "Smart Watch".to_owned(),
            issue: "Battery drains overnight".to_owned(),
        };
        let config = ConfigBuilder::new()
            .with_typing_delay(Duration::from_millis(200))
            .with_case(case.clone())
            .build();

        let (idle_tx, mut idle_rx) = watch::channel(false);
        let session = SessionBuilder::from_config(&config)
            .unwrap()
            .with_reply_picker(FirstPicker)
            .on_idle(move || {
                idle_tx.send(true).unwrap();
            })
            .build();
        assert_eq!(session.case(), &case);

        session.send_message("battery is useless").unwrap();
        idle_rx.wait_for(|idle| *idle).await.unwrap();

        let transcript = session.snapshot().await.unwrap();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.phase(), Phase::Understanding);
        assert_eq!(
            transcript.messages()[1].sentiment(),
            Some(Sentiment::Negative)
        );

        session.close();
    }
}
