//! CLI argument definitions for the Nutrition Guide client.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// Nutrition Guide: ask about calories, nutrients and health benefits of foods.
#[derive(Parser, Debug)]
#[command(name = "nutriguide", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Base URL of the nutrition backend.
    #[arg(short = 'u', long = "base-url")]
    pub base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Directory that receives exported transcripts.
    #[arg(short = 'o', long = "export-dir")]
    pub export_dir: Option<PathBuf>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > NUTRIGUIDE_CONFIG env var > ~/.nutriguide/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("NUTRIGUIDE_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the backend base URL.
    ///
    /// Priority: --base-url flag > NUTRIGUIDE_BASE_URL env var > config file value.
    pub fn resolve_base_url(&self, config_url: &str) -> String {
        if let Some(ref u) = self.base_url {
            return u.clone();
        }
        if let Ok(u) = std::env::var("NUTRIGUIDE_BASE_URL") {
            if !u.trim().is_empty() {
                return u;
            }
        }
        config_url.to_string()
    }

    /// Resolve the log level; `None` keeps the config file value.
    pub fn resolve_log_level(&self) -> Option<String> {
        self.log_level.clone()
    }

    /// Resolve the export directory.
    ///
    /// Priority: --export-dir flag > config file value.
    pub fn resolve_export_dir(&self, config_dir: &str) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| expand_home(config_dir))
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let var = "USERPROFILE";
    #[cfg(not(target_os = "windows"))]
    let var = "HOME";
    std::env::var(var).ok().map(PathBuf::from)
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    match home_dir() {
        Some(home) => home.join(".nutriguide").join("config.toml"),
        None => PathBuf::from("config.toml"),
    }
}
