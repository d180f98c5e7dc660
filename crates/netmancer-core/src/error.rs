// ── Core error types ──
//
// User-facing errors from netmancer-core. Consumers never see raw
// `std::process` or INI parser failures directly; everything is mapped
// into configuration, interface, or execution variants here.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration (INI) errors ───────────────────────────────────
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Malformed configuration file: {message}")]
    IniSyntax { message: String },

    #[error("Missing [{section}] section {reason}")]
    MissingSection { section: String, reason: String },

    #[error("Missing '{key}' in [{section}] section {reason}")]
    MissingKey {
        section: String,
        key: String,
        reason: String,
    },

    #[error("Invalid {key} in [{section}] section: '{value}' ({reason})")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    // ── Interface errors ─────────────────────────────────────────────
    #[error("Interface '{interface}' is not connected (state: {state})")]
    InterfaceUnavailable { interface: String, state: String },

    #[error("Interface '{interface}' not found")]
    InterfaceNotFound { interface: String },

    // ── Execution errors ─────────────────────────────────────────────
    #[error("Error running {program}: {message}")]
    CommandFailed {
        program: String,
        /// Exit status code, if the process exited normally.
        status: Option<i32>,
        message: String,
    },

    #[error("Failed to execute {program}: {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    // ── Output errors ────────────────────────────────────────────────
    #[error("Failed to render Netplan YAML: {0}")]
    Serialization(#[from] serde_yaml::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub(crate) fn invalid(
        section: &str,
        key: &str,
        value: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            section: section.into(),
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
