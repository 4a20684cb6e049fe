#![forbid(unsafe_code)]

//! Test helpers: a sink that remembers everything it was asked to say.

use std::cell::RefCell;
use std::rc::Rc;

use crate::narrator::SpeechSink;

/// One call to [`SpeechSink::speak`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    pub interrupt: bool,
}

impl Utterance {
    #[must_use]
    pub fn interrupting(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            interrupt: true,
        }
    }

    #[must_use]
    pub fn queued(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            interrupt: false,
        }
    }
}

/// Records utterances in call order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    heard: RefCell<Vec<Utterance>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Everything recorded so far, leaving the log intact.
    #[must_use]
    pub fn utterances(&self) -> Vec<Utterance> {
        self.heard.borrow().clone()
    }

    /// Spoken text only, in order.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.heard.borrow().iter().map(|u| u.text.clone()).collect()
    }

    /// Most recent utterance.
    #[must_use]
    pub fn last(&self) -> Option<Utterance> {
        self.heard.borrow().last().cloned()
    }

    /// Drain the log.
    pub fn take(&self) -> Vec<Utterance> {
        std::mem::take(&mut *self.heard.borrow_mut())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heard.borrow().is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heard.borrow().len()
    }
}

impl SpeechSink for RecordingSink {
    fn speak(&self, text: &str, interrupt: bool) {
        self.heard.borrow_mut().push(Utterance {
            text: text.to_string(),
            interrupt,
        });
    }
}
