#![forbid(unsafe_code)]

//! Keyboard focus navigation over grids and lists of spoken items.
//!
//! - [`FocusableItem`] / [`FocusItem`]: one navigable unit.
//! - [`FocusContext`]: the items of one screen, laid out as a list or grid.
//! - [`VirtualFocusManager`]: the current context, its focus, and the stack of
//!   suspended parents.
//!
//! # Example
//!
//! ```
//! use wayfinder_core::Narrator;
//! use wayfinder_focus::{FocusContext, FocusItem, VirtualFocusManager};
//!
//! let mut fm = VirtualFocusManager::new(Narrator::silent());
//! fm.set_context(
//!     FocusContext::list("Main menu").with_items(vec![
//!         FocusItem::new("new", "New game").boxed(),
//!         FocusItem::new("quit", "Quit").boxed(),
//!     ]),
//!     true,
//! );
//!
//! assert!(fm.navigate_down());
//! assert_eq!(fm.current_focus(), Some("quit"));
//! ```

pub mod context;
pub mod item;
pub mod manager;

pub use context::{FocusContext, ItemSource, Layout};
pub use item::{ActivationError, FocusItem, FocusableItem, ItemId};
pub use manager::{ActivationOutcome, BackOutcome, NavEvent, VirtualFocusManager};
