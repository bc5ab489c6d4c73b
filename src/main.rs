//! choice-timer CLI
//!
//! Countdown timer with a timestamped A/B/C/D choice log.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use choice_timer::config::{self, Overrides};

#[derive(Parser)]
#[command(name = "choice-timer")]
#[command(about = "Countdown timer with a timestamped A/B/C/D choice log")]
#[command(version)]
struct Cli {
    /// Duration suggested at startup and restored by reset, in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    duration: Option<u64>,

    /// Directory the export prompt starts in
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// How long a chosen option stays highlighted, in milliseconds
    #[arg(long)]
    highlight_ms: Option<u64>,

    /// Config file (default: <config dir>/choice-timer/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file (default: <data dir>/choice-timer/choice-timer.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(config::default_log_path);
    init_logging(&log_path);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "fatal");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let overrides = Overrides {
        default_duration: cli.duration,
        export_dir: cli.export_dir,
        highlight_ms: cli.highlight_ms,
    };
    let app_config = config::load(cli.config.as_deref(), overrides).map_err(|e| e.to_string())?;
    tracing::debug!(?app_config, "configuration resolved");

    choice_timer::tui::run(app_config).map_err(|e| format!("terminal: {}", e))
}

// ============================================================================
// LOGGING
// ============================================================================

/// Send tracing output to a file; the terminal belongs to the UI.
///
/// Filter comes from `RUST_LOG`, defaulting to `info`. If the file cannot
/// be opened, logging stays disabled.
fn init_logging(path: &Path) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => f,
        Err(_) => return,
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}
