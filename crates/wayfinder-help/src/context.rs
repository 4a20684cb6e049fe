#![forbid(unsafe_code)]

//! Help contexts: one per screen or interaction mode.

use std::fmt;

/// A screen or mode that can explain its own keys.
///
/// Several contexts may report themselves active at once (a targeting mode
/// inside a battle). The [`HelpSystem`](crate::HelpSystem) picks the one with
/// the highest [`priority`](HelpContext::priority), so narrower modes should
/// be registered with larger numbers.
pub trait HelpContext {
    /// Stable identifier, used for unregistration.
    fn context_id(&self) -> &str;

    /// Spoken name, e.g. "Battle".
    fn context_name(&self) -> &str;

    /// Higher wins when several contexts are active.
    fn priority(&self) -> i32;

    /// Whether this context applies right now.
    fn is_active(&self) -> bool;

    /// Keys and actions available in this context.
    fn help_text(&self) -> String;
}

type Predicate = Box<dyn Fn() -> bool>;

/// [`HelpContext`] with fixed text and a closure deciding activity.
///
/// # Example
///
/// ```
/// use wayfinder_help::{HelpContext, StaticHelpContext};
///
/// let battle = StaticHelpContext::new("battle", "Battle", 50)
///     .with_text("Arrows select a card. Enter plays it.")
///     .active_when(|| true);
///
/// assert!(battle.is_active());
/// assert_eq!(battle.priority(), 50);
/// ```
pub struct StaticHelpContext {
    id: String,
    name: String,
    priority: i32,
    text: String,
    active_when: Option<Predicate>,
}

impl fmt::Debug for StaticHelpContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticHelpContext")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

impl StaticHelpContext {
    /// Create a context that is never active until [`active_when`](Self::active_when) is set.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, priority: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            priority,
            text: String::new(),
            active_when: None,
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn active_when(mut self, predicate: impl Fn() -> bool + 'static) -> Self {
        self.active_when = Some(Box::new(predicate));
        self
    }

    /// Box the context for [`HelpSystem::register_contexts`](crate::HelpSystem::register_contexts).
    #[must_use]
    pub fn boxed(self) -> Box<dyn HelpContext> {
        Box::new(self)
    }
}

impl HelpContext for StaticHelpContext {
    fn context_id(&self) -> &str {
        &self.id
    }

    fn context_name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn is_active(&self) -> bool {
        self.active_when.as_ref().is_some_and(|active| active())
    }

    fn help_text(&self) -> String {
        self.text.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn inactive_without_predicate() {
        let ctx = StaticHelpContext::new("menu", "Main menu", 0).with_text("Enter starts.");
        assert!(!ctx.is_active());
        assert_eq!(ctx.context_id(), "menu");
        assert_eq!(ctx.context_name(), "Main menu");
        assert_eq!(ctx.help_text(), "Enter starts.");
    }

    #[test]
    fn predicate_is_polled() {
        let flag = Rc::new(Cell::new(false));
        let seen = Rc::clone(&flag);
        let ctx = StaticHelpContext::new("shop", "Shop", 40).active_when(move || seen.get());
        assert!(!ctx.is_active());
        flag.set(true);
        assert!(ctx.is_active());
    }
}
