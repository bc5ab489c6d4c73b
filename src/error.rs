//! Error taxonomy for choice-timer.
//!
//! Every failure a user can trigger is one of these variants. None of
//! them are fatal inside the running UI: the shell turns them into a
//! notice and keeps going.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Duration input was not a positive whole number of seconds.
    #[error("invalid duration {input:?}: {reason}")]
    InvalidDuration { input: String, reason: &'static str },

    /// Export requested while the choice log is empty.
    #[error("no choices to export")]
    NoData,

    /// Writing the export file failed.
    #[error("export to {} failed: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config file exists but could not be read or parsed.
    #[error("config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_duration_message_quotes_input() {
        let err = Error::InvalidDuration {
            input: "abc".into(),
            reason: "enter a whole number of seconds",
        };
        assert_eq!(
            err.to_string(),
            "invalid duration \"abc\": enter a whole number of seconds"
        );
    }

    #[test]
    fn io_error_carries_path_and_cause() {
        let err = Error::Io {
            path: PathBuf::from("/nope/choices.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/nope/choices.txt"));
        assert!(msg.contains("permission denied"));
    }
}
