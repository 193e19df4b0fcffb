//! An out-of-the-box sentiment recovery bot.
//!
//! The crate includes a CLI tool for chatting with the bot in the
//! terminal. You can also use it as a library to drive the conversation
//! from your own front-end.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

mod config;
mod session;

pub use config::{
    Config, ConfigBuilder, ConfigError, RESPONSES_VAR, TYPING_DELAY_VAR,
};
pub use session::{Session, SessionBuilder};

/// Re-exports of [`recovery_bot_core`] crate.
pub mod core {
    pub use recovery_bot_core::*;
}

/// Re-exports of [`recovery_bot_model`] crate.
pub mod model {
    pub use recovery_bot_model::*;
}
