#![forbid(unsafe_code)]

//! Help registry.
//!
//! # Invariants
//!
//! 1. Registered contexts are always ordered by descending priority.
//! 2. Equal priorities keep registration order (stable sort).
//! 3. The active context is the first one, in that order, whose
//!    `is_active()` is true. Nesting is expressed only through priority.

use wayfinder_core::Narrator;

use crate::context::HelpContext;

/// Priority-ordered set of [`HelpContext`]s.
#[derive(Default)]
pub struct HelpSystem {
    contexts: Vec<Box<dyn HelpContext>>,
    narrator: Narrator,
}

impl std::fmt::Debug for HelpSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<&str> = self.contexts.iter().map(|c| c.context_id()).collect();
        f.debug_struct("HelpSystem")
            .field("contexts", &ids)
            .field("narrator", &self.narrator)
            .finish()
    }
}

impl HelpSystem {
    #[must_use]
    pub fn new(narrator: Narrator) -> Self {
        Self {
            contexts: Vec::new(),
            narrator,
        }
    }

    pub fn set_narrator(&mut self, narrator: Narrator) {
        self.narrator = narrator;
    }

    pub fn register_context(&mut self, context: Box<dyn HelpContext>) {
        tracing::debug!(
            id = context.context_id(),
            priority = context.priority(),
            "help context registered"
        );
        self.contexts.push(context);
        self.sort();
    }

    pub fn register_contexts(&mut self, contexts: impl IntoIterator<Item = Box<dyn HelpContext>>) {
        for context in contexts {
            tracing::debug!(
                id = context.context_id(),
                priority = context.priority(),
                "help context registered"
            );
            self.contexts.push(context);
        }
        self.sort();
    }

    /// Remove every context with `id`. Returns how many were removed.
    pub fn unregister_context(&mut self, id: &str) -> usize {
        let before = self.contexts.len();
        self.contexts.retain(|c| c.context_id() != id);
        before - self.contexts.len()
    }

    fn sort(&mut self) {
        self.contexts.sort_by_key(|c| std::cmp::Reverse(c.priority()));
    }

    /// Registered contexts, highest priority first.
    pub fn contexts(&self) -> impl Iterator<Item = &(dyn HelpContext + 'static)> + '_ {
        self.contexts.iter().map(|c| c.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Highest-priority context that reports itself active.
    #[must_use]
    pub fn active_context(&self) -> Option<&dyn HelpContext> {
        self.contexts
            .iter()
            .find(|c| c.is_active())
            .map(|c| c.as_ref())
    }

    /// Text [`show_help`](Self::show_help) would speak right now.
    #[must_use]
    pub fn help_message(&self) -> String {
        match self.active_context() {
            Some(ctx) => format!("{} help. {}", ctx.context_name(), ctx.help_text()),
            None => self.narrator.config().fallback_help.clone(),
        }
    }

    /// Speak help for the active context, interrupting.
    ///
    /// Returns the id of the context used, or `None` for the fallback text.
    pub fn show_help(&self) -> Option<String> {
        let active = self.active_context().map(|c| c.context_id().to_string());
        let message = self.help_message();
        tracing::debug!(context = ?active, "help shown");
        self.narrator.speak(&message, true);
        active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::StaticHelpContext;
    use std::cell::Cell;
    use std::rc::Rc;
    use tracing_test::traced_test;
    use wayfinder_core::NarrationConfig;
    use wayfinder_core::testing::{RecordingSink, Utterance};

    fn ctx(id: &str, priority: i32, active: bool) -> Box<dyn HelpContext> {
        StaticHelpContext::new(id, id.to_uppercase(), priority)
            .with_text(format!("{id} keys"))
            .active_when(move || active)
            .boxed()
    }

    fn ids(system: &HelpSystem) -> Vec<String> {
        system.contexts().map(|c| c.context_id().to_string()).collect()
    }

    #[test]
    fn registration_sorts_descending() {
        let mut system = HelpSystem::default();
        system.register_context(ctx("low", 0, false));
        system.register_context(ctx("high", 100, false));
        system.register_context(ctx("mid", 50, false));
        assert_eq!(ids(&system), vec!["high", "mid", "low"]);
    }

    #[test]
    fn equal_priorities_keep_registration_order() {
        let mut system = HelpSystem::default();
        system.register_contexts(vec![ctx("a", 10, false), ctx("b", 10, false)]);
        system.register_context(ctx("c", 10, false));
        assert_eq!(ids(&system), vec!["a", "b", "c"]);
    }

    #[traced_test]
    #[test]
    fn batch_registration_logs_each_context() {
        let mut system = HelpSystem::default();
        system.register_contexts(vec![ctx("shop", 40, false), ctx("map", 30, false)]);
        assert!(logs_contain("help context registered"));
        assert!(logs_contain("shop"));
        assert!(logs_contain("map"));
    }

    #[test]
    fn higher_priority_wins_when_both_active() {
        let mut system = HelpSystem::default();
        system.register_context(ctx("battle", 50, true));
        system.register_context(ctx("targeting", 100, true));
        assert_eq!(
            system.active_context().map(|c| c.context_id()),
            Some("targeting")
        );
    }

    #[test]
    fn no_active_context() {
        let mut system = HelpSystem::default();
        assert!(system.active_context().is_none());
        system.register_context(ctx("idle", 5, false));
        assert!(system.active_context().is_none());
    }

    #[test]
    fn activity_is_reevaluated() {
        let targeting = Rc::new(Cell::new(false));
        let flag = Rc::clone(&targeting);
        let mut system = HelpSystem::default();
        system.register_context(ctx("battle", 50, true));
        system.register_context(
            StaticHelpContext::new("target", "Targeting", 100)
                .active_when(move || flag.get())
                .boxed(),
        );

        assert_eq!(system.active_context().map(|c| c.context_id()), Some("battle"));
        targeting.set(true);
        assert_eq!(system.active_context().map(|c| c.context_id()), Some("target"));
    }

    #[test]
    fn show_help_speaks_active_context() {
        let sink = RecordingSink::new();
        let mut system = HelpSystem::new(Narrator::new(sink.clone()));
        system.register_context(ctx("shop", 40, true));
        assert_eq!(system.show_help().as_deref(), Some("shop"));
        assert_eq!(sink.take(), vec![Utterance::interrupting("SHOP help. shop keys")]);
    }

    #[test]
    fn show_help_falls_back() {
        let sink = RecordingSink::new();
        let narrator = Narrator::new(sink.clone())
            .with_config(NarrationConfig::new().with_fallback_help("Arrows move."));
        let system = HelpSystem::new(narrator);
        assert_eq!(system.show_help(), None);
        assert_eq!(sink.take(), vec![Utterance::interrupting("Arrows move.")]);
    }

    #[test]
    fn unregister_removes_by_id() {
        let mut system = HelpSystem::default();
        system.register_contexts(vec![ctx("a", 1, true), ctx("b", 2, true)]);
        assert_eq!(system.unregister_context("b"), 1);
        assert_eq!(system.unregister_context("b"), 0);
        assert_eq!(system.len(), 1);
        assert_eq!(system.active_context().map(|c| c.context_id()), Some("a"));
    }

    #[test]
    fn silent_help_still_resolves() {
        let mut system = HelpSystem::default();
        system.register_context(ctx("map", 30, true));
        assert_eq!(system.show_help().as_deref(), Some("map"));
        assert!(!system.is_empty());
    }
}
