#![forbid(unsafe_code)]

//! Speech output.
//!
//! Hosts implement [`SpeechSink`] over whatever actually produces sound
//! (a screen reader bridge, a TTS engine, a log). Everything else in Wayfinder
//! talks to a [`Narrator`], which may or may not have a sink attached.
//!
//! # Invariants
//!
//! 1. A narrator without a sink never fails; every operation is a no-op.
//! 2. Empty or whitespace-only text is never forwarded.
//! 3. `announce_screen` always interrupts; `queue` never does;
//!    `announce_focus` follows [`NarrationConfig::interrupt_on_focus`].

use std::fmt;
use std::rc::Rc;

use crate::config::NarrationConfig;

/// Host-provided speech output.
///
/// Queuing, threading, and voice selection are the sink's own business.
pub trait SpeechSink {
    /// Speak `text`, cutting off current speech when `interrupt` is set.
    fn speak(&self, text: &str, interrupt: bool);
}

impl<F> SpeechSink for F
where
    F: Fn(&str, bool),
{
    fn speak(&self, text: &str, interrupt: bool) {
        self(text, interrupt);
    }
}

/// Shared front over an optional [`SpeechSink`].
///
/// Clones share the same sink.
#[derive(Clone, Default)]
pub struct Narrator {
    sink: Option<Rc<dyn SpeechSink>>,
    config: Rc<NarrationConfig>,
}

impl fmt::Debug for Narrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Narrator")
            .field("has_sink", &self.sink.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl Narrator {
    /// Narrator that speaks through `sink`.
    #[must_use]
    pub fn new(sink: Rc<dyn SpeechSink>) -> Self {
        Self {
            sink: Some(sink),
            config: Rc::default(),
        }
    }

    /// Narrator with no output; every call is discarded.
    #[must_use]
    pub fn silent() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: NarrationConfig) -> Self {
        self.config = Rc::new(config);
        self
    }

    /// Attach or replace the sink.
    pub fn set_sink(&mut self, sink: Option<Rc<dyn SpeechSink>>) {
        self.sink = sink;
    }

    #[must_use]
    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    #[must_use]
    pub fn config(&self) -> &NarrationConfig {
        &self.config
    }

    pub fn speak(&self, text: &str, interrupt: bool) {
        let Some(sink) = &self.sink else {
            return;
        };
        if text.trim().is_empty() {
            return;
        }
        sink.speak(text, interrupt);
    }

    /// Speak after whatever is already queued.
    pub fn queue(&self, text: &str) {
        self.speak(text, false);
    }

    /// Announce a screen or mode change.
    pub fn announce_screen(&self, text: &str) {
        self.speak(text, true);
    }

    /// Announce the newly focused item.
    pub fn announce_focus(&self, text: &str) {
        self.speak(text, self.config.interrupt_on_focus);
    }
}
