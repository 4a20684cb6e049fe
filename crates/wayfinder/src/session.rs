#![forbid(unsafe_code)]

//! Application context tying narration, focus, and help together.
//!
//! A [`Session`] replaces process-wide singletons: the host constructs it
//! once, passes it by reference to whatever needs it, and drops it on
//! teardown. Nothing in Wayfinder keeps global state.

use std::rc::Rc;

use wayfinder_core::{NarrationConfig, Narrator, SpeechSink};
use wayfinder_focus::VirtualFocusManager;
use wayfinder_help::HelpSystem;

use crate::command::{CommandOutcome, NavCommand};

/// Narrator, focus manager, and help registry for one running session.
#[derive(Debug, Default)]
pub struct Session {
    narrator: Narrator,
    focus: VirtualFocusManager,
    help: HelpSystem,
}

impl Session {
    /// Session speaking through `narrator`.
    #[must_use]
    pub fn new(narrator: Narrator) -> Self {
        Self {
            focus: VirtualFocusManager::new(narrator.clone()),
            help: HelpSystem::new(narrator.clone()),
            narrator,
        }
    }

    /// Session speaking through `sink` with `config`.
    #[must_use]
    pub fn with_sink(sink: Rc<dyn SpeechSink>, config: NarrationConfig) -> Self {
        Self::new(Narrator::new(sink).with_config(config))
    }

    /// Session with no speech output.
    #[must_use]
    pub fn silent() -> Self {
        Self::new(Narrator::silent())
    }

    #[must_use]
    pub fn narrator(&self) -> &Narrator {
        &self.narrator
    }

    /// Swap the narrator everywhere, e.g. once the host's screen reader
    /// bridge finishes initializing.
    pub fn set_narrator(&mut self, narrator: Narrator) {
        self.focus.set_narrator(narrator.clone());
        self.help.set_narrator(narrator.clone());
        self.narrator = narrator;
    }

    #[must_use]
    pub fn focus(&self) -> &VirtualFocusManager {
        &self.focus
    }

    pub fn focus_mut(&mut self) -> &mut VirtualFocusManager {
        &mut self.focus
    }

    #[must_use]
    pub fn help(&self) -> &HelpSystem {
        &self.help
    }

    pub fn help_mut(&mut self) -> &mut HelpSystem {
        &mut self.help
    }

    /// Apply one command.
    pub fn handle(&mut self, command: NavCommand) -> CommandOutcome {
        tracing::trace!(%command, "command");
        match command {
            NavCommand::Up | NavCommand::Down | NavCommand::Left | NavCommand::Right => {
                let moved = command
                    .direction()
                    .is_some_and(|dir| self.focus.navigate(dir));
                CommandOutcome::Moved(moved)
            }
            NavCommand::First => CommandOutcome::Moved(self.focus.navigate_first()),
            NavCommand::Last => CommandOutcome::Moved(self.focus.navigate_last()),
            NavCommand::Activate => CommandOutcome::Activation(self.focus.activate()),
            NavCommand::Secondary => CommandOutcome::Activation(self.focus.secondary_action()),
            NavCommand::Back => CommandOutcome::Back(self.focus.go_back()),
            NavCommand::Help => CommandOutcome::Help(self.help.show_help()),
            NavCommand::Summary => match self.focus.read_summary() {
                Some(_) => CommandOutcome::Spoken,
                None => CommandOutcome::Ignored,
            },
            NavCommand::WhereAmI => {
                if self.focus.announce_current() {
                    CommandOutcome::Spoken
                } else {
                    CommandOutcome::Ignored
                }
            }
            NavCommand::Refresh => {
                if self.focus.current_context().is_none() {
                    return CommandOutcome::Ignored;
                }
                self.focus.refresh_context();
                CommandOutcome::Refreshed
            }
        }
    }
}
