#![forbid(unsafe_code)]

//! Session-level focus coordinator.
//!
//! [`VirtualFocusManager`] owns exactly one current [`FocusContext`], the
//! focused item inside it, and a LIFO stack of suspended parent contexts for
//! drill-in/back-out navigation. Every change is narrated through the
//! injected [`Narrator`] and recorded as a [`NavEvent`] for the host to poll.
//!
//! # Invariants
//!
//! 1. When set, the current focus names an item of the current context.
//! 2. Moving off an edge wraps or clamps; it never clears focus while
//!    focusable items exist.
//! 3. Item actions never unwind through the manager: errors and panics are
//!    logged and reported as [`ActivationOutcome::Failed`].
//!
//! The manager is single-threaded by construction (it holds `Rc`s and boxed
//! `FnMut` callbacks). Drive it from one polling loop.

use std::panic::{AssertUnwindSafe, catch_unwind};

use wayfinder_core::{NarrationConfig, Narrator, NavDirection};

use crate::context::FocusContext;
use crate::item::{ActivationError, FocusableItem, ItemId};

/// State changes emitted by the manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    ContextChanged {
        from: Option<String>,
        to: String,
        focus: Option<ItemId>,
    },
    FocusChanged {
        context: String,
        from: Option<ItemId>,
        to: Option<ItemId>,
    },
}

/// Result of [`VirtualFocusManager::activate`] and
/// [`VirtualFocusManager::secondary_action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// The action ran to completion.
    Activated,
    /// Nothing is focused.
    NoFocus,
    /// The focused item has no such action.
    NotSupported,
    /// The action returned an error or panicked; see the logs.
    Failed,
}

/// Result of [`VirtualFocusManager::go_back`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// A suspended parent context was restored.
    Popped,
    /// The stack was empty; the current context's back handler ran.
    Delegated,
    /// Nothing to pop and no back handler.
    Unhandled,
}

/// Central navigation coordinator.
#[derive(Debug)]
pub struct VirtualFocusManager {
    narrator: Narrator,
    current: Option<FocusContext>,
    focus: Option<ItemId>,
    stack: Vec<FocusContext>,
    enabled: bool,
    events: Vec<NavEvent>,
}

impl Default for VirtualFocusManager {
    fn default() -> Self {
        Self::new(Narrator::silent())
    }
}

impl VirtualFocusManager {
    /// Create an enabled manager with no context.
    #[must_use]
    pub fn new(narrator: Narrator) -> Self {
        Self {
            narrator,
            current: None,
            focus: None,
            stack: Vec::new(),
            enabled: true,
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn narrator(&self) -> &Narrator {
        &self.narrator
    }

    pub fn set_narrator(&mut self, narrator: Narrator) {
        self.narrator = narrator;
    }

    fn config(&self) -> &NarrationConfig {
        self.narrator.config()
    }

    /// Enabled and holding a context. Directional navigation requires this.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled && self.current.is_some()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Suspend or resume directional navigation (e.g. while a text field owns the keys).
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub fn current_context(&self) -> Option<&FocusContext> {
        self.current.as_ref()
    }

    /// Mutable access for owners that edit items in place before a
    /// [`refresh_context`](Self::refresh_context).
    pub fn current_context_mut(&mut self) -> Option<&mut FocusContext> {
        self.current.as_mut()
    }

    #[inline]
    #[must_use]
    pub fn current_focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    /// Number of suspended parent contexts.
    #[must_use]
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Drop every suspended parent context (e.g. on return to a root screen).
    pub fn clear_stack(&mut self) {
        if !self.stack.is_empty() {
            tracing::debug!(dropped = self.stack.len(), "context stack cleared");
        }
        self.stack.clear();
    }

    /// Events recorded since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<NavEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn events(&self) -> &[NavEvent] {
        &self.events
    }

    // ── Context transitions ─────────────────────────────────────────────

    /// Enter `context`, optionally suspending the current one for [`go_back`](Self::go_back).
    pub fn set_context(&mut self, mut context: FocusContext, push_to_stack: bool) {
        let from = self.current.as_ref().map(|ctx| ctx.name().to_string());
        if let Some(mut old) = self.current.take() {
            old.on_exit();
            if push_to_stack {
                tracing::debug!(
                    context = old.name(),
                    depth = self.stack.len() + 1,
                    "context suspended"
                );
                self.stack.push(old);
            }
        }

        context.on_enter();
        self.install(context, from);
    }

    /// Swap the current context without leaving a way back to it.
    pub fn replace_context(&mut self, context: FocusContext) {
        self.set_context(context, false);
    }

    /// Return to the most recently suspended context, or let the current
    /// context handle "back" itself when there is none.
    pub fn go_back(&mut self) -> BackOutcome {
        let Some(mut previous) = self.stack.pop() else {
            let Some(ctx) = self.current.as_mut() else {
                return BackOutcome::Unhandled;
            };
            if !ctx.handle_back() {
                return BackOutcome::Unhandled;
            }
            tracing::debug!(context = ctx.name(), "back delegated to context");
            return BackOutcome::Delegated;
        };

        let from = self.current.take().map(|mut ctx| {
            ctx.on_exit();
            ctx.name().to_string()
        });
        previous.on_enter();
        tracing::debug!(context = previous.name(), depth = self.stack.len(), "context restored");
        self.install(previous, from);
        BackOutcome::Popped
    }

    fn install(&mut self, mut context: FocusContext, from: Option<String>) {
        let focus = context.default_focus().map(str::to_string);
        if let Some(id) = &focus {
            context.remember_focus(id.clone());
        }
        self.events.push(NavEvent::ContextChanged {
            from,
            to: context.name().to_string(),
            focus: focus.clone(),
        });
        self.focus = focus;
        self.current = Some(context);
        self.announce_context();
    }

    fn announce_context(&self) {
        let Some(ctx) = &self.current else {
            return;
        };
        self.narrator.announce_screen(ctx.name());
        if let Some(text) = self.focus_text() {
            self.narrator.queue(&text);
        }
    }

    /// Re-read the current context's items and repair a stale focus.
    ///
    /// Call after any host state change that may add, remove, or disable items.
    pub fn refresh_context(&mut self) {
        let Some(ctx) = self.current.as_mut() else {
            return;
        };
        ctx.refresh();

        let still_valid = self.focus.as_deref().is_some_and(|id| ctx.can_focus(id));
        if still_valid {
            return;
        }
        let replacement = ctx.default_focus().map(str::to_string);
        if replacement == self.focus {
            return;
        }
        if let Some(id) = &replacement {
            ctx.remember_focus(id.clone());
        }
        let from = std::mem::replace(&mut self.focus, replacement.clone());
        tracing::debug!(context = ctx.name(), ?from, to = ?replacement, "stale focus replaced");
        self.events.push(NavEvent::FocusChanged {
            context: ctx.name().to_string(),
            from,
            to: replacement,
        });
    }

    // ── Focus movement ──────────────────────────────────────────────────

    /// Focus `id` in the current context and announce it.
    ///
    /// No-op (returns `false`) for `None`, the already focused item, unknown
    /// ids, and items that cannot take focus.
    pub fn set_focus(&mut self, id: Option<&str>) -> bool {
        let Some(id) = id else {
            return false;
        };
        if self.focus.as_deref() == Some(id) {
            return false;
        }
        let Some(ctx) = self.current.as_mut() else {
            return false;
        };
        if !ctx.can_focus(id) {
            return false;
        }

        ctx.remember_focus(id);
        let from = self.focus.replace(id.to_string());
        tracing::trace!(context = ctx.name(), ?from, to = id, "focus moved");
        self.events.push(NavEvent::FocusChanged {
            context: ctx.name().to_string(),
            from,
            to: Some(id.to_string()),
        });

        if let Some(text) = self.focus_text() {
            self.narrator.announce_focus(&text);
        }
        true
    }

    /// Move one cell in `dir`. Returns whether focus changed.
    pub fn navigate(&mut self, dir: NavDirection) -> bool {
        if !self.is_active() {
            return false;
        }
        let target = self
            .current
            .as_ref()
            .and_then(|ctx| ctx.neighbor(self.focus.as_deref(), dir))
            .map(str::to_string);
        self.set_focus(target.as_deref())
    }

    pub fn navigate_up(&mut self) -> bool {
        self.navigate(NavDirection::Up)
    }

    pub fn navigate_down(&mut self) -> bool {
        self.navigate(NavDirection::Down)
    }

    pub fn navigate_left(&mut self) -> bool {
        self.navigate(NavDirection::Left)
    }

    pub fn navigate_right(&mut self) -> bool {
        self.navigate(NavDirection::Right)
    }

    /// Jump to the first focusable item (Home).
    pub fn navigate_first(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        let target = self
            .current
            .as_ref()
            .and_then(FocusContext::first_focusable)
            .map(str::to_string);
        self.set_focus(target.as_deref())
    }

    /// Jump to the last focusable item (End).
    pub fn navigate_last(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        let target = self
            .current
            .as_ref()
            .and_then(FocusContext::last_focusable)
            .map(str::to_string);
        self.set_focus(target.as_deref())
    }

    // ── Actions ─────────────────────────────────────────────────────────

    /// Run the focused item's primary action.
    pub fn activate(&mut self) -> ActivationOutcome {
        self.run_action("activate", |item| Some(item.activate()))
    }

    /// Run the focused item's secondary action, if it has one.
    pub fn secondary_action(&mut self) -> ActivationOutcome {
        self.run_action("secondary", |item| item.secondary_action())
    }

    fn run_action<F>(&mut self, action: &'static str, call: F) -> ActivationOutcome
    where
        F: FnOnce(&mut (dyn FocusableItem + 'static)) -> Option<Result<(), ActivationError>>,
    {
        let Some(id) = self.focus.as_deref() else {
            return ActivationOutcome::NoFocus;
        };
        let Some(ctx) = self.current.as_mut() else {
            return ActivationOutcome::NoFocus;
        };
        let context = ctx.name().to_string();
        let Some(item) = ctx.item_mut(id) else {
            return ActivationOutcome::NoFocus;
        };

        let result = catch_unwind(AssertUnwindSafe(|| call(item))).unwrap_or_else(|payload| {
            Some(Err(ActivationError::Panicked(panic_message(&*payload))))
        });

        match result {
            None => ActivationOutcome::NotSupported,
            Some(Ok(())) => {
                tracing::debug!(%context, item = id, action, "item action completed");
                ActivationOutcome::Activated
            }
            Some(Err(err)) => {
                tracing::warn!(%context, item = id, action, error = %err, "item action failed");
                ActivationOutcome::Failed
            }
        }
    }

    // ── Spoken queries ──────────────────────────────────────────────────

    /// Spoken text for the current focus: description plus ", N of M".
    #[must_use]
    pub fn focus_text(&self) -> Option<String> {
        let ctx = self.current.as_ref()?;
        let id = self.focus.as_deref()?;
        let item = ctx.item(id)?;
        let description = item.description();

        let total = ctx.focusable_count();
        match ctx.item_position(id) {
            Some(position) if self.config().announce_positions && total > 1 => {
                Some(format!("{description}, {position} of {total}"))
            }
            _ => Some(description),
        }
    }

    /// "Where am I": context name and focused item, interrupting.
    pub fn announce_current(&self) -> bool {
        let Some(ctx) = &self.current else {
            return false;
        };
        let text = match self.focus_text() {
            Some(focus) => format!("{}. {focus}", ctx.name()),
            None => format!("{}. Nothing focused", ctx.name()),
        };
        self.narrator.speak(&text, true);
        true
    }

    /// Speak the current context's summary. Returns the text spoken.
    pub fn read_summary(&self) -> Option<String> {
        let ctx = self.current.as_ref()?;
        let summary = ctx.summary_with(&self.config().summary_separator);
        self.narrator.speak(&summary, true);
        Some(summary)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

// =========================================================================
// Tests
// =========================================================================
