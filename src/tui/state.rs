//! TUI state algebra: pure types, zero effects.
//!
//! `App` is the single owner of the countdown and the choice log. The
//! update layer mutates it in response to `Action`s and background
//! `AppEvent`s; the view layer only reads it. Anything that needs a
//! thread or the filesystem is described as an `Effect` and left to
//! the run loop.

use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::KeyEvent;

use crate::choice_log::ChoiceLog;
use crate::clock::Epoch;
use crate::countdown::Countdown;
use crate::types::{AppConfig, Choice};

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// Three kinds of producer feed a single mpsc channel:
/// - A key reader thread sends `Key`
/// - The clock thread sends `Tick` once per second while running
/// - One-shot timers send `HighlightExpired`
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// One elapsed second from the clock run with this epoch.
    Tick(Epoch),
    /// The highlight scheduled under this token is due to revert.
    HighlightExpired(u64),
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    /// Timer state. Only touched through its own methods.
    pub countdown: Countdown,

    /// Choice history, in insertion order.
    pub log: ChoiceLog,

    /// Text of the duration field. Left as typed when a start fails.
    pub duration_input: String,

    /// What keystrokes currently mean.
    pub mode: Mode,

    /// Most recent choice, shown emphasised until its revert fires.
    pub highlight: Option<Highlight>,

    /// Last status or error message, shown until replaced or dismissed.
    pub notice: Option<Notice>,

    pub config: AppConfig,

    /// Set to true when the app should exit on the next loop iteration.
    pub should_quit: bool,

    next_token: u64,
}

/// Input mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Keys map to commands.
    #[default]
    Normal,
    /// Keys edit the duration field. `previous` is restored on cancel.
    EditDuration { previous: String },
    /// Keys edit the export destination.
    ExportPrompt { path: String },
}

/// A choice currently shown as acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub choice: Choice,
    /// Matches the `HighlightExpired` event that clears it.
    pub token: u64,
}

/// Message for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
    Reset,
    Choose(Choice),
    AddLap,
    ClearHistory,
    Export,
    /// Enter the duration field.
    EditDuration,
    /// Character typed into the active text field.
    Input(char),
    Backspace,
    /// Enter: accept the active text field.
    Confirm,
    /// Esc: leave the active text field, or dismiss the notice.
    Cancel,
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of handling an action or background event.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// State may have changed; redraw.
    Render,
    /// Quit the application.
    Quit,
    /// Redraw, and execute this side effect.
    Effect(Effect),
}

/// Side effect requested by the update layer. Executed only by `run`.
#[derive(Debug, PartialEq)]
pub enum Effect {
    /// Begin delivering ticks.
    StartClock,
    /// Stop delivering ticks.
    StopClock,
    /// Deliver `HighlightExpired(token)` after `delay`, cancelling any
    /// revert still pending from an earlier choice.
    ScheduleRevert { token: u64, delay: Duration },
    /// Write export text to a file.
    WriteExport { path: PathBuf, contents: String },
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl App {
    /// Fresh state: idle at 00:00, empty log, default duration suggested.
    pub fn new(config: AppConfig) -> Self {
        App {
            countdown: Countdown::new(config.default_duration),
            log: ChoiceLog::new(),
            duration_input: config.default_duration.to_string(),
            mode: Mode::Normal,
            highlight: None,
            notice: None,
            config,
            should_quit: false,
            next_token: 0,
        }
    }

    /// Allocate a token for a new highlight.
    pub fn next_highlight_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_app_is_idle_with_default_input() {
        let app = App::new(AppConfig::default());
        assert_eq!(app.countdown.remaining(), 0);
        assert!(!app.countdown.is_running());
        assert_eq!(app.duration_input, "60");
        assert!(app.log.is_empty());
        assert_eq!(app.mode, Mode::Normal);
        assert!(!app.should_quit);
    }

    #[test]
    fn new_app_uses_configured_duration() {
        let config = AppConfig {
            default_duration: 45,
            ..Default::default()
        };
        assert_eq!(App::new(config).duration_input, "45");
    }

    #[test]
    fn highlight_tokens_are_unique() {
        let mut app = App::new(AppConfig::default());
        let a = app.next_highlight_token();
        let b = app.next_highlight_token();
        assert_ne!(a, b);
    }
}
