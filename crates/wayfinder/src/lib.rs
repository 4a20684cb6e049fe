#![forbid(unsafe_code)]

//! Wayfinder: spoken keyboard navigation and context help.
//!
//! # Role
//! This facade re-exports the workspace crates and adds [`Session`], the
//! explicitly constructed application context that owns the narrator, the
//! focus manager, and the help registry. Hosts create one `Session` per run
//! and route key presses into it as [`NavCommand`]s.
//!
//! # Crates
//! - `wayfinder-core`: speech sink, narrator, config, logging.
//! - `wayfinder-focus`: items, contexts, the focus manager.
//! - `wayfinder-help`: help contexts and the registry.
//!
//! # Example
//!
//! ```
//! use wayfinder::{FocusContext, FocusItem, NavCommand, Session, StaticHelpContext};
//!
//! let mut session = Session::silent();
//! session.help_mut().register_context(
//!     StaticHelpContext::new("menu", "Main menu", 0)
//!         .with_text("Up and down choose. Enter confirms.")
//!         .active_when(|| true)
//!         .boxed(),
//! );
//! session.focus_mut().set_context(
//!     FocusContext::list("Main menu").with_items(vec![
//!         FocusItem::new("play", "Play").boxed(),
//!         FocusItem::new("quit", "Quit").boxed(),
//!     ]),
//!     true,
//! );
//!
//! session.handle(NavCommand::Down);
//! assert_eq!(session.focus().current_focus(), Some("quit"));
//! ```

pub mod command;
pub mod session;

pub use command::{CommandOutcome, NavCommand, UnknownCommand};
pub use session::Session;
pub use wayfinder_core::logging;
pub use wayfinder_core::{ConfigError, GridPos, NarrationConfig, Narrator, NavDirection, SpeechSink};
pub use wayfinder_focus::{
    ActivationError, ActivationOutcome, BackOutcome, FocusContext, FocusItem, FocusableItem,
    NavEvent, VirtualFocusManager,
};
pub use wayfinder_help::{HelpContext, HelpSystem, StaticHelpContext};
