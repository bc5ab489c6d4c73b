//! TUI style constants.
//!
//! Semantic styles only, enough to keep the screen legible:
//! - Green: running clock, acknowledged choice
//! - Cyan: interactive elements (keybinding hints)
//! - Yellow: text field being edited
//! - Red: errors
//! - Dim: de-emphasized (disabled commands, help line)

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Interactive element / keybinding hint: cyan.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// De-emphasized metadata: dark gray.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Important text: bold.
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

/// Informational notice: green.
pub const STYLE_INFO: Style = Style::new().fg(Color::Green);

/// Error notice: red.
pub const STYLE_ERROR: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// The MM:SS readout.
pub const STYLE_CLOCK: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// "running" status label.
pub const STYLE_RUNNING: Style = Style::new().fg(Color::Green);

/// A command that currently has no effect (Start while running).
pub const STYLE_DISABLED: Style = Style::new()
    .fg(Color::DarkGray)
    .add_modifier(Modifier::CROSSED_OUT);

/// Text field being edited.
pub const STYLE_INPUT_ACTIVE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Choice button at rest.
pub const STYLE_CHOICE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Choice button just picked.
pub const STYLE_HIGHLIGHT: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Green)
    .add_modifier(Modifier::BOLD);

/// Lap separator in the history list.
pub const STYLE_LAP: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// TESTS
// ============================================================================
