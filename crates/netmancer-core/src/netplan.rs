// ── Netplan rendering ──
//
// Maps validated `NetworkSettings` onto the Netplan v2 document shape and
// serializes it with serde_yaml. Field order in the structs below is the
// key order in the emitted YAML.

use std::io::Write;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;
use crate::model::{InterfaceKind, NetworkSettings};

/// Directory Netplan reads its configuration from.
pub const DEFAULT_NETPLAN_DIR: &str = "/etc/netplan";

/// Backend Netplan hands the configuration to.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Renderer {
    #[default]
    #[serde(rename = "networkd")]
    #[strum(to_string = "networkd")]
    Networkd,
    #[serde(rename = "NetworkManager")]
    #[strum(to_string = "NetworkManager")]
    NetworkManager,
}

// ── Document types ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetplanDocument {
    pub network: NetplanNetwork,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetplanNetwork {
    pub version: u8,
    pub renderer: Renderer,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub ethernets: IndexMap<String, InterfaceBlock>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub wifis: IndexMap<String, InterfaceBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceBlock {
    pub dhcp4: bool,
    pub dhcp6: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nameservers: Option<Nameservers>,
    #[serde(
        rename = "access-points",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub access_points: IndexMap<String, AccessPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub to: String,
    pub via: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nameservers {
    pub addresses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPoint {
    pub password: String,
}

impl NetplanDocument {
    /// Build the single-interface document for `settings`.
    pub fn from_settings(settings: &NetworkSettings, renderer: Renderer) -> Self {
        let mut block = InterfaceBlock {
            dhcp4: settings.dhcp,
            dhcp6: settings.dhcp,
            ..InterfaceBlock::default()
        };

        if let Some(address) = &settings.address {
            if let Some(net) = address.address {
                block.addresses.push(net.to_string());
            }
            if let Some(gateway) = address.gateway {
                block.routes.push(Route {
                    to: "default".into(),
                    via: gateway.to_string(),
                });
            }
            if !address.dns.is_empty() {
                block.nameservers = Some(Nameservers {
                    addresses: address.dns.iter().map(ToString::to_string).collect(),
                });
            }
        }

        if let Some(wifi) = &settings.wifi {
            block.access_points.insert(
                wifi.ssid.clone(),
                AccessPoint {
                    password: wifi.password.expose_secret().to_owned(),
                },
            );
        }

        let mut network = NetplanNetwork {
            version: 2,
            renderer,
            ethernets: IndexMap::new(),
            wifis: IndexMap::new(),
        };
        let target = match settings.kind {
            InterfaceKind::Ethernet => &mut network.ethernets,
            InterfaceKind::Wireless => &mut network.wifis,
        };
        target.insert(settings.interface.clone(), block);

        Self { network }
    }

    pub fn to_yaml(&self) -> Result<String, CoreError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

// ── Output path & file writing ──────────────────────────────────────

/// `<dir>/99-netmancer-<iface>.yaml` for wired, `<dir>/100-netmancer-<iface>.yaml` for wireless.
pub fn default_output_path(dir: &Path, interface: &str, kind: InterfaceKind) -> PathBuf {
    dir.join(format!(
        "{}-netmancer-{interface}.yaml",
        kind.file_priority()
    ))
}

/// Write the rendered YAML, restricting permissions to the owner.
pub fn write_document(path: &Path, yaml: &str) -> Result<(), CoreError> {
    let to_write_error = |source| CoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path).map_err(to_write_error)?;
    file.write_all(yaml.as_bytes()).map_err(to_write_error)?;

    // `mode` only applies on creation; tighten pre-existing files too.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .map_err(to_write_error)?;
    }

    debug!(path = %path.display(), bytes = yaml.len(), "wrote netplan file");
    Ok(())
}
