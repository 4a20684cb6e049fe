#![forbid(unsafe_code)]

//! Focusable items.
//!
//! An item is one navigable unit: a card, a button, a menu row. Items are
//! usually rebuilt from host state on every refresh, so the only thing that
//! survives a refresh is the item's [`id`](FocusableItem::id).
//! Grid placement belongs to the owning [`FocusContext`](crate::FocusContext),
//! not to the item.

use std::fmt;

/// Stable identifier of an item across refreshes.
pub type ItemId = String;

/// Why an item's action did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationError {
    /// The action exists but cannot run right now (e.g. not enough mana).
    Unavailable(String),
    /// The action ran and failed.
    Failed(String),
    /// The action panicked; carries the panic message.
    Panicked(String),
}

impl fmt::Display for ActivationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "action unavailable: {msg}"),
            Self::Failed(msg) => write!(f, "action failed: {msg}"),
            Self::Panicked(msg) => write!(f, "action panicked: {msg}"),
        }
    }
}

impl std::error::Error for ActivationError {}

/// One navigable unit inside a [`FocusContext`](crate::FocusContext).
pub trait FocusableItem {
    /// Identifier that stays the same when the item is rebuilt.
    fn id(&self) -> &str;

    /// Whether the item can take focus right now.
    fn can_focus(&self) -> bool {
        true
    }

    /// Full spoken description, read when the item gains focus.
    fn description(&self) -> String;

    /// Short label used in summaries.
    fn label(&self) -> String {
        self.description()
    }

    /// Primary action (Enter).
    fn activate(&mut self) -> Result<(), ActivationError>;

    /// Secondary action, if the item has one. `None` means no secondary action.
    fn secondary_action(&mut self) -> Option<Result<(), ActivationError>> {
        None
    }
}

type Action = Box<dyn FnMut() -> Result<(), ActivationError>>;
type Predicate = Box<dyn Fn() -> bool>;

/// Closure-backed [`FocusableItem`].
///
/// # Example
///
/// ```
/// use wayfinder_focus::{FocusItem, FocusableItem};
///
/// let mut item = FocusItem::new("end-turn", "End turn button")
///     .with_label("End turn")
///     .on_activate(|| Ok(()));
///
/// assert_eq!(item.label(), "End turn");
/// assert!(item.activate().is_ok());
/// ```
pub struct FocusItem {
    id: ItemId,
    description: String,
    label: Option<String>,
    focusable: bool,
    enabled_when: Option<Predicate>,
    on_activate: Option<Action>,
    on_secondary: Option<Action>,
}

impl fmt::Debug for FocusItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusItem")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("label", &self.label)
            .field("focusable", &self.focusable)
            .field("dynamic", &self.enabled_when.is_some())
            .field("secondary", &self.on_secondary.is_some())
            .finish()
    }
}

impl FocusItem {
    /// Create a focusable item with no actions.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            label: None,
            focusable: true,
            enabled_when: None,
            on_activate: None,
            on_secondary: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Builder: set the static focusable flag.
    #[must_use]
    pub fn with_focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    /// Builder: decide focusability on every query.
    ///
    /// Combined with the static flag; both must allow focus.
    #[must_use]
    pub fn with_enabled_when(mut self, predicate: impl Fn() -> bool + 'static) -> Self {
        self.enabled_when = Some(Box::new(predicate));
        self
    }

    #[must_use]
    pub fn on_activate(
        mut self,
        action: impl FnMut() -> Result<(), ActivationError> + 'static,
    ) -> Self {
        self.on_activate = Some(Box::new(action));
        self
    }

    #[must_use]
    pub fn on_secondary(
        mut self,
        action: impl FnMut() -> Result<(), ActivationError> + 'static,
    ) -> Self {
        self.on_secondary = Some(Box::new(action));
        self
    }

    /// Box the item for [`FocusContext::set_items`](crate::FocusContext::set_items).
    #[must_use]
    pub fn boxed(self) -> Box<dyn FocusableItem> {
        Box::new(self)
    }
}

impl FocusableItem for FocusItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn can_focus(&self) -> bool {
        self.focusable && self.enabled_when.as_ref().is_none_or(|enabled| enabled())
    }

    fn description(&self) -> String {
        self.description.clone()
    }

    fn label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.description.clone())
    }

    fn activate(&mut self) -> Result<(), ActivationError> {
        match &mut self.on_activate {
            Some(action) => action(),
            None => Ok(()),
        }
    }

    fn secondary_action(&mut self) -> Option<Result<(), ActivationError>> {
        self.on_secondary.as_mut().map(|action| action())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn label_defaults_to_description() {
        let item = FocusItem::new("a", "Fireball, 3 mana");
        assert_eq!(item.label(), "Fireball, 3 mana");
        let item = item.with_label("Fireball");
        assert_eq!(item.label(), "Fireball");
        assert_eq!(item.description(), "Fireball, 3 mana");
    }

    #[test]
    fn static_and_dynamic_focusability_combine() {
        let enabled = Rc::new(Cell::new(true));
        let flag = Rc::clone(&enabled);
        let item = FocusItem::new("b", "Buy").with_enabled_when(move || flag.get());
        assert!(item.can_focus());
        enabled.set(false);
        assert!(!item.can_focus());

        let item = FocusItem::new("c", "Sell")
            .with_focusable(false)
            .with_enabled_when(|| true);
        assert!(!item.can_focus());
    }

    #[test]
    fn activate_runs_callback() {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let mut item = FocusItem::new("d", "Deal").on_activate(move || {
            seen.set(seen.get() + 1);
            Ok(())
        });
        item.activate().unwrap();
        item.activate().unwrap();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn activate_without_callback_is_ok() {
        let mut item = FocusItem::new("e", "Label only");
        assert_eq!(item.activate(), Ok(()));
    }

    #[test]
    fn secondary_action_optional() {
        let mut plain = FocusItem::new("f", "Plain");
        assert!(plain.secondary_action().is_none());

        let mut rich = FocusItem::new("g", "Rich")
            .on_secondary(|| Err(ActivationError::Unavailable("locked".into())));
        assert_eq!(
            rich.secondary_action(),
            Some(Err(ActivationError::Unavailable("locked".into())))
        );
    }

    #[test]
    fn activation_error_display() {
        assert_eq!(
            ActivationError::Failed("boom".into()).to_string(),
            "action failed: boom"
        );
        assert_eq!(
            ActivationError::Panicked("oops".into()).to_string(),
            "action panicked: oops"
        );
    }
}
