//! Configuration for the netmancer CLI.
//!
//! Layered TOML + environment settings (tool locations, Netplan output
//! directory, audit log path), and translation to
//! `netmancer_core::HostConfig`.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use netmancer_core::netplan::DEFAULT_NETPLAN_DIR;
use netmancer_core::{HostConfig, Renderer, ToolPaths};

/// Audit log location used when nothing else is configured.
pub const DEFAULT_LOG_FILE: &str = "/var/log/netmancer/netmancer.log";

/// Prefix for environment overrides; nested keys use `__`
/// (e.g. `NETMANCER_TOOLS__NMCLI`).
pub const ENV_PREFIX: &str = "NETMANCER_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Audit log file; one line per command outcome.
    pub log_file: PathBuf,

    /// Where `network-apply` writes files when `--output` is omitted.
    pub netplan_dir: PathBuf,

    /// `networkd` or `NetworkManager`.
    pub renderer: Renderer,

    /// Run `netplan apply` through sudo when not root.
    pub escalate: bool,

    /// External tool names or absolute paths.
    pub tools: ToolPaths,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            netplan_dir: PathBuf::from(DEFAULT_NETPLAN_DIR),
            renderer: Renderer::default(),
            escalate: true,
            tools: ToolPaths::default(),
        }
    }
}

impl Config {
    /// Translate into the core crate's runtime configuration.
    pub fn to_host_config(&self) -> HostConfig {
        HostConfig {
            netplan_dir: self.netplan_dir.clone(),
            renderer: self.renderer,
            escalate: self.escalate,
            tools: self.tools.clone(),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "netmancer", "netmancer").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("netmancer");
    p
}

// ── Config loading ──────────────────────────────────────────────────

fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load the full Config from file + environment.
///
/// `path` overrides the platform config location. A missing file is not
/// an error; defaults and environment still apply.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    let config: Config = figment(&path).extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path` (or the canonical path).
pub fn save_config(cfg: &Config, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(path)
}
