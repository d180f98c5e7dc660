// ── Interface detail records (`show-info`) ──

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An IPv4 address split into address and dotted mask.
///
/// `subnet_mask` is `None` when NetworkManager reported something that
/// is not `a.b.c.d/n`; the raw value is kept in `address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceAddress {
    pub address: String,
    pub subnet_mask: Option<String>,
}

/// Link details from `ethtool`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct EthernetInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wake_on: Option<String>,
}

/// Radio details from `iwconfig`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct WifiInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub essid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_power: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_level: Option<String>,
}

/// Everything `show-info` reports for one interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceInfo {
    #[serde(rename = "IP4.ADDRESSES")]
    pub addresses: Vec<InterfaceAddress>,
    #[serde(rename = "IP4.DNS_SERVERS")]
    pub dns_servers: Vec<String>,
    #[serde(rename = "IP4.GATEWAY")]
    pub gateway: String,
    #[serde(rename = "IP4.DOMAIN")]
    pub domain: String,
    #[serde(rename = "GENERAL.STATE")]
    pub state: String,
    #[serde(rename = "GENERAL.TYPE")]
    pub device_type: String,
    /// Fields `nmcli` returned that have no dedicated slot above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
    #[serde(rename = "ETHERNET_INFO", skip_serializing_if = "Option::is_none")]
    pub ethernet: Option<EthernetInfo>,
    #[serde(rename = "WIFI_INFO", skip_serializing_if = "Option::is_none")]
    pub wifi: Option<WifiInfo>,
}

impl InterfaceInfo {
    pub fn is_ethernet(&self) -> bool {
        self.device_type.eq_ignore_ascii_case("ethernet")
    }

    pub fn is_wireless(&self) -> bool {
        self.device_type.eq_ignore_ascii_case("wifi")
            || self.device_type.eq_ignore_ascii_case("wireless")
    }
}
