//! choice-timer: a countdown timer paired with a timestamped A/B/C/D choice log.

pub mod choice_log;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod error;
pub mod export;
pub mod tui;
pub mod types;
