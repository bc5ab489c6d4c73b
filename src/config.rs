//! Configuration layering: built-in defaults, then an optional TOML file,
//! then command-line overrides.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::AppConfig;

const APP_DIR: &str = "choice-timer";
const CONFIG_FILENAME: &str = "config.toml";
const LOG_FILENAME: &str = "choice-timer.log";

/// On-disk config. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub default_duration: Option<u64>,
    pub export_dir: Option<PathBuf>,
    pub highlight_ms: Option<u64>,
}

/// Values supplied on the command line; `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub default_duration: Option<u64>,
    pub export_dir: Option<PathBuf>,
    pub highlight_ms: Option<u64>,
}

// ============================================================================
// LOCATIONS
// ============================================================================

/// `<config_dir>/choice-timer/config.toml`, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILENAME))
}

/// `<data_local_dir>/choice-timer/choice-timer.log`, falling back to cwd.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(LOG_FILENAME)
}

/// Documents folder, then home, then the current directory.
pub fn default_export_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

// ============================================================================
// LOADING
// ============================================================================

/// Read a config file. A missing file yields the empty config.
pub fn load_file(path: &Path) -> Result<FileConfig> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(FileConfig::default()),
        Err(e) => {
            return Err(Error::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            });
        }
    };
    parse_file(&text).map_err(|message| Error::Config {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_file(text: &str) -> std::result::Result<FileConfig, String> {
    let file: FileConfig = toml::from_str(text).map_err(|e| e.to_string())?;
    if file.default_duration == Some(0) {
        return Err("default_duration must be greater than zero".to_string());
    }
    Ok(file)
}

/// Layer file values and overrides on top of the defaults.
pub fn resolve(file: FileConfig, overrides: Overrides) -> AppConfig {
    let defaults = AppConfig::default();
    AppConfig {
        default_duration: overrides
            .default_duration
            .or(file.default_duration)
            .unwrap_or(defaults.default_duration),
        export_dir: overrides
            .export_dir
            .or(file.export_dir)
            .unwrap_or_else(default_export_dir),
        highlight: overrides
            .highlight_ms
            .or(file.highlight_ms)
            .map(Duration::from_millis)
            .unwrap_or(defaults.highlight),
    }
}

/// Load the file at `path` (or the default location) and apply overrides.
pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<AppConfig> {
    let file = match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(p) => load_file(&p)?,
        None => FileConfig::default(),
    };
    Ok(resolve(file, overrides))
}
