// ── Declarative interface settings ──

use std::net::IpAddr;

use ipnet::Ipv4Net;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Wired or wireless. Decides the Netplan section and the output file name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum InterfaceKind {
    #[strum(to_string = "ethernet")]
    Ethernet,
    #[strum(to_string = "wifi", serialize = "wireless")]
    Wireless,
}

impl InterfaceKind {
    /// Infer the kind from a kernel interface name.
    ///
    /// `en*`/`eth*` are wired and `wl*` is wireless. Unknown prefixes
    /// (bonds, bridges, vendor names) are treated as wired.
    pub fn from_name(name: &str) -> Self {
        if name.starts_with("wl") {
            Self::Wireless
        } else {
            Self::Ethernet
        }
    }

    /// Netplan file priority prefix for this kind.
    pub fn file_priority(self) -> u8 {
        match self {
            Self::Ethernet => 99,
            Self::Wireless => 100,
        }
    }
}

/// Optional static addressing. In static mode every field except `dns`
/// is guaranteed present after validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticAddress {
    pub address: Option<Ipv4Net>,
    pub gateway: Option<IpAddr>,
    pub dns: Vec<IpAddr>,
}

impl StaticAddress {
    pub fn is_empty(&self) -> bool {
        self.address.is_none() && self.gateway.is_none() && self.dns.is_empty()
    }
}

/// Access point credentials for a wireless interface.
#[derive(Debug)]
pub struct WifiCredentials {
    pub ssid: String,
    pub password: SecretString,
}

/// One interface worth of validated settings, parsed from an INI file.
#[derive(Debug)]
pub struct NetworkSettings {
    pub interface: String,
    pub kind: InterfaceKind,
    pub dhcp: bool,
    pub address: Option<StaticAddress>,
    pub wifi: Option<WifiCredentials>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_name_prefixes() {
        assert_eq!(InterfaceKind::from_name("eth0"), InterfaceKind::Ethernet);
        assert_eq!(InterfaceKind::from_name("enp3s0"), InterfaceKind::Ethernet);
        assert_eq!(InterfaceKind::from_name("wlan0"), InterfaceKind::Wireless);
        assert_eq!(InterfaceKind::from_name("wlp2s0"), InterfaceKind::Wireless);
        assert_eq!(InterfaceKind::from_name("bond0"), InterfaceKind::Ethernet);
    }

    #[test]
    fn kind_parses_aliases_case_insensitively() {
        assert_eq!("Ethernet".parse::<InterfaceKind>().unwrap(), InterfaceKind::Ethernet);
        assert_eq!("WIFI".parse::<InterfaceKind>().unwrap(), InterfaceKind::Wireless);
        assert_eq!("wireless".parse::<InterfaceKind>().unwrap(), InterfaceKind::Wireless);
        assert!("token-ring".parse::<InterfaceKind>().is_err());
    }

    #[test]
    fn kind_display() {
        assert_eq!(InterfaceKind::Ethernet.to_string(), "ethernet");
        assert_eq!(InterfaceKind::Wireless.to_string(), "wifi");
    }
}
