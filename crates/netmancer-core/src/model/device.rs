// ── NetworkManager device rows ──

use serde::{Deserialize, Serialize};

/// One row of `nmcli device` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEntry {
    #[serde(rename = "DEVICE")]
    pub device: String,
    #[serde(rename = "TYPE")]
    pub device_type: String,
    #[serde(rename = "STATE")]
    pub state: String,
    /// Active connection profile name, empty when none.
    #[serde(rename = "CONNECTION")]
    pub connection: String,
}

impl DeviceEntry {
    /// `connected` and `connected (externally)` count; `disconnected`,
    /// `connecting (...)` and `unavailable` do not.
    pub fn is_connected(&self) -> bool {
        self.state
            .trim()
            .to_ascii_lowercase()
            .starts_with("connected")
    }

    pub fn is_loopback(&self) -> bool {
        self.device == "lo"
    }
}
