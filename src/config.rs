//! Configuration system using TOML files.
//!
//! Config is read from `--config` when given, otherwise from the OS-standard
//! config directory:
//! - Windows: %APPDATA%\music-catalog\config.toml
//! - macOS: ~/Library/Application Support/music-catalog/config.toml
//! - Linux: ~/.config/music-catalog/config.toml
//!
//! Every setting is optional and command-line flags take precedence.
//! A broken config file is logged and ignored; it never stops a scan.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result, ResultExt};
use crate::report::{QuoteStyle, ReportFormat, ReportOptions};
use crate::scanner::ScanOptions;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Traversal settings
    pub scan: ScanConfig,

    /// Output settings
    pub report: ReportConfig,
}

/// Directory traversal settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Follow symbolic links while walking
    pub follow_links: bool,
}

/// Report output settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// "csv" or "json"
    pub format: ReportFormat,

    /// Sort albums, artists and formats
    pub sort: bool,

    /// "verbatim" or "escaped"
    pub quote_style: QuoteStyle,
}

impl Config {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            follow_links: self.scan.follow_links,
        }
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            format: self.report.format,
            quote_style: self.report.quote_style,
            sort: self.report.sort,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("music-catalog"))
}

/// Get the full path to the default config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Read and parse a config file.
pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(Error::not_found(path));
    }
    let contents = std::fs::read_to_string(path)
        .with_context(format!("Failed to read {}", path.display()))?;
    toml::from_str(&contents)
        .map_err(|e| Error::config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Load configuration from `explicit`, or from the default location.
///
/// Returns default config if the file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load(explicit: Option<&Path>) -> Config {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match config_path() {
            Some(path) => path,
            None => {
                tracing::warn!("Could not determine config directory, using defaults");
                return Config::default();
            }
        },
    };

    match load_from(&path) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", path);
            config
        }
        Err(Error::NotFound(_)) if explicit.is_none() => {
            tracing::info!("No config file found at {:?}, using defaults", path);
            Config::default()
        }
        Err(e) => {
            tracing::error!("{}", e);
            tracing::warn!("Using default configuration");
            Config::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
