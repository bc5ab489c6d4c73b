//! Domain types for choice-timer.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveTime;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Duration suggested at startup and restored by reset, in seconds.
pub const DEFAULT_DURATION_SECS: u64 = 60;

/// How long a chosen option stays highlighted.
pub const DEFAULT_HIGHLIGHT: Duration = Duration::from_millis(2000);

/// Divider line a lap separator renders as, on screen and in exports.
pub const LAP_DIVIDER: &str = "________________";

/// First line of every export file.
pub const EXPORT_HEADER: &str = "My Choices:";

/// File name suggested by the export prompt.
pub const DEFAULT_EXPORT_FILE: &str = "choices.txt";

// ============================================================================
// CHOICES
// ============================================================================

/// One of the four selectable options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    A,
    B,
    C,
    D,
}

impl Choice {
    /// All options in display order.
    pub const ALL: [Choice; 4] = [Choice::A, Choice::B, Choice::C, Choice::D];

    pub fn label(self) -> &'static str {
        match self {
            Choice::A => "A",
            Choice::B => "B",
            Choice::C => "C",
            Choice::D => "D",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single entry in the choice log. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceEvent {
    /// A pick, stamped with local wall-clock time (second resolution).
    Choice { choice: Choice, at: NaiveTime },
    /// A manually inserted divider.
    LapSeparator,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Resolved runtime configuration (defaults, then config file, then CLI).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Duration input text at startup and after reset.
    pub default_duration: u64,
    /// Directory the export prompt starts in.
    pub export_dir: PathBuf,
    /// How long a chosen option stays highlighted.
    pub highlight: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_duration: DEFAULT_DURATION_SECS,
            export_dir: PathBuf::from("."), // Replaced at runtime by config::default_export_dir
            highlight: DEFAULT_HIGHLIGHT,
        }
    }
}

impl AppConfig {
    /// Path the export prompt is prefilled with.
    pub fn default_export_path(&self) -> PathBuf {
        self.export_dir.join(DEFAULT_EXPORT_FILE)
    }
}
