//! The conversation engine of the sentiment recovery bot.
//!
//! Three pure pieces do the work: [`classify`] tags a message with a
//! sentiment, [`advance`] moves the conversation phase, and a
//! [`ResponseTable`] supplies the canned replies. [`RecoveryBot`] runs
//! them for one session inside an actor task.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod bot;
pub mod classifier;
mod error;
mod phase;
mod reply;
pub mod transcript;

pub use bot::{
    DEFAULT_GREETING, DEFAULT_TYPING_DELAY, RecoveryBot, RecoveryBotBuilder,
};
pub use classifier::{Classifier, classify};
pub use error::{Error, ErrorKind};
pub use phase::advance;
pub use reply::{
    PhaseReplies, RandomPicker, Responder, ResponseTable, select_reply,
};
pub use transcript::{Transcript, Turn};
