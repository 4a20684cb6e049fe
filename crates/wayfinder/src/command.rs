#![forbid(unsafe_code)]

//! Commands a host routes into a [`Session`](crate::Session).

use std::fmt;
use std::str::FromStr;

use wayfinder_core::NavDirection;
use wayfinder_focus::{ActivationOutcome, BackOutcome};

/// One user intent, already decoded from whatever input device the host has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavCommand {
    Up,
    Down,
    Left,
    Right,
    /// Jump to the first item (Home).
    First,
    /// Jump to the last item (End).
    Last,
    Activate,
    Secondary,
    Back,
    Help,
    /// Read every item in the current context.
    Summary,
    /// Repeat the current context and focus.
    WhereAmI,
    /// Resynchronize the current context with host state.
    Refresh,
}

impl NavCommand {
    /// Direction for the four arrow commands.
    #[must_use]
    pub const fn direction(self) -> Option<NavDirection> {
        match self {
            Self::Up => Some(NavDirection::Up),
            Self::Down => Some(NavDirection::Down),
            Self::Left => Some(NavDirection::Left),
            Self::Right => Some(NavDirection::Right),
            _ => None,
        }
    }

    /// Name accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::First => "first",
            Self::Last => "last",
            Self::Activate => "activate",
            Self::Secondary => "secondary",
            Self::Back => "back",
            Self::Help => "help",
            Self::Summary => "summary",
            Self::WhereAmI => "where-am-i",
            Self::Refresh => "refresh",
        }
    }
}

impl fmt::Display for NavCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A command name that [`NavCommand::from_str`] does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown navigation command: {}", self.0)
    }
}

impl std::error::Error for UnknownCommand {}

impl FromStr for NavCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cmd = match s.trim().to_ascii_lowercase().as_str() {
            "up" => Self::Up,
            "down" => Self::Down,
            "left" => Self::Left,
            "right" => Self::Right,
            "first" | "home" => Self::First,
            "last" | "end" => Self::Last,
            "activate" | "enter" => Self::Activate,
            "secondary" => Self::Secondary,
            "back" | "escape" | "backspace" => Self::Back,
            "help" | "f1" => Self::Help,
            "summary" => Self::Summary,
            "where-am-i" | "whereami" => Self::WhereAmI,
            "refresh" => Self::Refresh,
            _ => return Err(UnknownCommand(s.to_string())),
        };
        Ok(cmd)
    }
}

/// What a [`NavCommand`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Movement command; `true` if focus changed.
    Moved(bool),
    Activation(ActivationOutcome),
    Back(BackOutcome),
    /// Help was spoken; carries the context id, `None` for the fallback.
    Help(Option<String>),
    /// Something was read aloud.
    Spoken,
    /// Nothing to act on (no current context).
    Ignored,
    Refreshed,
}
