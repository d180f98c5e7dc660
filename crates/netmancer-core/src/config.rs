// ── Runtime host configuration ──
//
// These types describe *where* the OS tools live and how Netplan output
// is produced. They never touch disk: the CLI builds a `HostConfig`
// (from netmancer-config) and hands it to `Host`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::netplan::{DEFAULT_NETPLAN_DIR, Renderer};

/// Program names (or absolute paths) for every external tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub nmcli: String,
    pub netplan: String,
    pub ethtool: String,
    pub iwconfig: String,
    pub hostnamectl: String,
    pub sudo: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            nmcli: "nmcli".into(),
            netplan: "netplan".into(),
            ethtool: "ethtool".into(),
            iwconfig: "iwconfig".into(),
            hostnamectl: "hostnamectl".into(),
            sudo: "sudo".into(),
        }
    }
}

/// Everything `Host` needs to query and configure the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Directory default output files are written to.
    pub netplan_dir: PathBuf,
    /// Renderer written into generated documents.
    pub renderer: Renderer,
    /// Prefix `netplan apply` with sudo when not running as root.
    pub escalate: bool,
    pub tools: ToolPaths,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            netplan_dir: PathBuf::from(DEFAULT_NETPLAN_DIR),
            renderer: Renderer::default(),
            escalate: true,
            tools: ToolPaths::default(),
        }
    }
}
