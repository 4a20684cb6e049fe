#![forbid(unsafe_code)]

//! Core: shared vocabulary, speech output, and narration settings.
//!
//! # Role in Wayfinder
//! `wayfinder-core` is the output layer. It owns the [`SpeechSink`] capability
//! that hosts implement, the [`Narrator`] front that every other crate speaks
//! through, and the [`NarrationConfig`] that tunes what gets said.
//!
//! # How it fits in the system
//! `wayfinder-focus` and `wayfinder-help` never talk to a host directly. They
//! receive a [`Narrator`] at construction and call its four output operations;
//! when no sink is attached those operations are silent no-ops, so both crates
//! can be driven headless in tests.

pub mod config;
pub mod geometry;
pub mod logging;
pub mod narrator;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use config::{ConfigError, NarrationConfig};
pub use geometry::{GridPos, NavDirection};
pub use narrator::{Narrator, SpeechSink};
