//! Data types shared by the recovery bot crates.
//!
//! The types here describe a support conversation: who said what, how the
//! customer felt about it, and how far the conversation has progressed.
//! They carry no behavior beyond construction invariants, parsing and
//! display helpers. [`ReplyPicker`] is the one extension point: it lets
//! hosts and tests decide how a canned reply is chosen. The conversation
//! engine lives in its own crate.

#![deny(missing_docs)]

mod case;
mod error;
mod message;
mod phase;
mod picker;
mod sentiment;

pub use case::*;
pub use error::*;
pub use message::*;
pub use phase::*;
pub use picker::*;
pub use sentiment::*;
