//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a stable exit code.

use std::io;

use miette::Diagnostic;
use thiserror::Error;

use netmancer_config::ConfigError;
use netmancer_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const TOOL: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── INI input ────────────────────────────────────────────────────

    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(netmancer::ini_not_found),
        help("Check the path passed to network-apply.")
    )]
    IniNotFound { path: String },

    #[error("Malformed configuration file: {message}")]
    #[diagnostic(
        code(netmancer::ini_syntax),
        help("INI files use [section] headers followed by key = value lines.")
    )]
    IniSyntax { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(netmancer::invalid_ini),
        help(
            "Expected sections:\n  \
             [general] interface, dhcp (default true), type (optional)\n  \
             [address] ip, subnet, gateway, dns (required when dhcp = false)\n  \
             [wifi]    ssid, password (required for wireless interfaces)"
        )
    )]
    InvalidIni { message: String },

    // ── Interfaces ───────────────────────────────────────────────────

    #[error("Interface '{interface}' not found")]
    #[diagnostic(
        code(netmancer::interface_not_found),
        help("Run: netmancer list-network-interfaces")
    )]
    InterfaceNotFound { interface: String },

    #[error("Interface '{interface}' is not connected (state: {state})")]
    #[diagnostic(
        code(netmancer::interface_unavailable),
        help("Bring it up first, e.g.: nmcli device connect {interface}")
    )]
    InterfaceUnavailable { interface: String, state: String },

    // ── External tools ───────────────────────────────────────────────

    #[error("Error running {program}: {message}")]
    #[diagnostic(code(netmancer::tool_failed))]
    ToolFailed { program: String, message: String },

    #[error("'{program}' is not installed or not on PATH")]
    #[diagnostic(
        code(netmancer::tool_missing),
        help("Install it, or point [tools] in the netmancer config at its location.")
    )]
    ToolMissing { program: String },

    // ── Files ────────────────────────────────────────────────────────

    #[error("Permission denied writing {path}")]
    #[diagnostic(
        code(netmancer::permission_denied),
        help("Run with sudo, or pass --output with a writable location.")
    )]
    PermissionDenied { path: String },

    #[error("Failed to write {path}")]
    #[diagnostic(code(netmancer::write_failed))]
    WriteFailed {
        path: String,
        #[source]
        source: io::Error,
    },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(
        code(netmancer::config),
        help("Fix the file, or reset it with: netmancer config init --force")
    )]
    Config(#[from] ConfigError),

    #[error("Configuration file already exists: {path}")]
    #[diagnostic(
        code(netmancer::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Operation '{action}' requires confirmation")]
    #[diagnostic(
        code(netmancer::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(netmancer::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(netmancer::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidIni { .. }
            | Self::ConfigExists { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::IniNotFound { .. } | Self::IniSyntax { .. } | Self::Config(_) => {
                exit_code::CONFIG
            }
            Self::InterfaceNotFound { .. } => exit_code::NOT_FOUND,
            Self::PermissionDenied { .. } => exit_code::PERMISSION,
            Self::ToolFailed { .. } | Self::ToolMissing { .. } => exit_code::TOOL,
            _ => exit_code::GENERAL,
        }
    }

    /// Classify a failed file write.
    pub fn write(path: &std::path::Path, source: io::Error) -> Self {
        let path = path.display().to_string();
        if source.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied { path }
        } else {
            Self::WriteFailed { path, source }
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConfigNotFound { path } => Self::IniNotFound {
                path: path.display().to_string(),
            },

            CoreError::IniSyntax { message } => Self::IniSyntax { message },

            err @ (CoreError::MissingSection { .. }
            | CoreError::MissingKey { .. }
            | CoreError::InvalidValue { .. }) => Self::InvalidIni {
                message: err.to_string(),
            },

            CoreError::InterfaceNotFound { interface } => Self::InterfaceNotFound { interface },

            CoreError::InterfaceUnavailable { interface, state } => {
                Self::InterfaceUnavailable { interface, state }
            }

            CoreError::CommandFailed {
                program, message, ..
            } => Self::ToolFailed { program, message },

            CoreError::CommandSpawn { program, source } => {
                if source.kind() == io::ErrorKind::NotFound {
                    Self::ToolMissing { program }
                } else {
                    Self::ToolFailed {
                        program,
                        message: source.to_string(),
                    }
                }
            }

            CoreError::Serialization(e) => Self::Yaml(e),

            CoreError::Write { path, source } => Self::write(&path, source),

            CoreError::Io(e) => Self::Io(e),
        }
    }
}
