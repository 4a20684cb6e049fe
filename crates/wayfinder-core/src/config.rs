#![forbid(unsafe_code)]

//! Narration settings.
//!
//! # Environment variables
//!
//! | Variable | Field | Values |
//! |----------|-------|--------|
//! | `WAYFINDER_INTERRUPT_FOCUS` | `interrupt_on_focus` | 1/true/yes/on, 0/false/no/off |
//! | `WAYFINDER_ANNOUNCE_POSITIONS` | `announce_positions` | same |
//! | `WAYFINDER_SUMMARY_SEPARATOR` | `summary_separator` | any string |
//!
//! Unset variables keep their defaults.

use std::fmt;

/// Spoken when no help context reports itself active.
pub const DEFAULT_FALLBACK_HELP: &str = "Arrow keys move focus. Enter activates. \
     Backspace goes back. F1 repeats this help.";

/// Errors from configuration parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A value could not be interpreted for its key.
    InvalidValue { key: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value '{value}' for {key}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// What the narrator says and how eagerly it interrupts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NarrationConfig {
    /// Focus announcements cut off whatever is being spoken.
    pub interrupt_on_focus: bool,
    /// Append ", N of M" to focus announcements.
    pub announce_positions: bool,
    /// Joins entries in context summaries.
    pub summary_separator: String,
    /// Spoken by the help system when no context is active.
    pub fallback_help: String,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            interrupt_on_focus: true,
            announce_positions: true,
            summary_separator: ", ".to_string(),
            fallback_help: DEFAULT_FALLBACK_HELP.to_string(),
        }
    }
}

impl NarrationConfig {
    pub const ENV_INTERRUPT_FOCUS: &'static str = "WAYFINDER_INTERRUPT_FOCUS";
    pub const ENV_ANNOUNCE_POSITIONS: &'static str = "WAYFINDER_ANNOUNCE_POSITIONS";
    pub const ENV_SUMMARY_SEPARATOR: &'static str = "WAYFINDER_SUMMARY_SEPARATOR";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_interrupt_on_focus(mut self, interrupt: bool) -> Self {
        self.interrupt_on_focus = interrupt;
        self
    }

    #[must_use]
    pub fn with_announce_positions(mut self, announce: bool) -> Self {
        self.announce_positions = announce;
        self
    }

    #[must_use]
    pub fn with_summary_separator(mut self, separator: impl Into<String>) -> Self {
        self.summary_separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_fallback_help(mut self, text: impl Into<String>) -> Self {
        self.fallback_help = text.into();
        self
    }

    const KEYS: [&'static str; 3] = [
        Self::ENV_INTERRUPT_FOCUS,
        Self::ENV_ANNOUNCE_POSITIONS,
        Self::ENV_SUMMARY_SEPARATOR,
    ];

    /// Load from the process environment.
    ///
    /// Invalid values are logged and the default is kept.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup_lenient(|key| std::env::var(key).ok())
    }

    /// Like [`from_lookup`](Self::from_lookup), but logs invalid values and
    /// keeps the default for them.
    #[must_use]
    pub fn from_lookup_lenient<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        for key in Self::KEYS {
            let Some(value) = lookup(key) else {
                continue;
            };
            if let Err(err) = config.apply(key, &value) {
                tracing::warn!(%err, "ignoring narration setting");
            }
        }
        config
    }

    /// Load through an arbitrary lookup, failing on the first invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        for key in Self::KEYS {
            if let Some(value) = lookup(key) {
                config.apply(key, &value)?;
            }
        }
        Ok(config)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            Self::ENV_INTERRUPT_FOCUS => self.interrupt_on_focus = parse_flag(key, value)?,
            Self::ENV_ANNOUNCE_POSITIONS => self.announce_positions = parse_flag(key, value)?,
            Self::ENV_SUMMARY_SEPARATOR => self.summary_separator = value.to_string(),
            _ => {}
        }
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
