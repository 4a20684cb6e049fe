#![forbid(unsafe_code)]

//! Context-sensitive spoken help.
//!
//! Each screen or interaction mode registers a [`HelpContext`] with a
//! priority. When the user asks for help, [`HelpSystem`] speaks the text of
//! the highest-priority context that reports itself active, or a generic
//! fallback covering the universal keys.

pub mod context;
pub mod system;

pub use context::{HelpContext, StaticHelpContext};
pub use system::HelpSystem;
