// ── DHCP lease details (`dhcp-info`) ──

use serde::{Deserialize, Serialize};

/// DHCPv4 options reported by NetworkManager, plus the static hostname.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpInfo {
    #[serde(rename = "DHCP_SERVER_IDENTIFIER")]
    pub server_identifier: String,
    #[serde(rename = "DOMAIN_NAME_SERVER")]
    pub domain_name_servers: Vec<String>,
    #[serde(rename = "DOMAIN_NAME")]
    pub domain_name: String,
    #[serde(rename = "ROUTES")]
    pub routers: Vec<String>,
    #[serde(rename = "HOSTNAME")]
    pub hostname: String,
    #[serde(rename = "IP4_ADDRESS")]
    pub ip_address: String,
    #[serde(rename = "SUBNETMASK")]
    pub subnet_mask: String,
}
