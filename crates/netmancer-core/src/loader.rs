// ── INI loader: text → NetworkSettings ──
//
// Parses the declarative INI file and enforces the mode-dependent rules:
// `[general]` always, `[address]` when DHCP is off, `[wifi]` for wireless
// interfaces. Section and key names match case-insensitively; values are
// taken verbatim (no quote or escape processing) so passwords survive.

use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;

use ini::{Ini, ParseOption, Properties};
use ipnet::Ipv4Net;
use secrecy::SecretString;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{InterfaceKind, NetworkSettings, StaticAddress, WifiCredentials};
use crate::subnet;

const GENERAL: &str = "general";
const ADDRESS: &str = "address";
const WIFI: &str = "wifi";

/// Kernel limit on interface names, excluding the trailing NUL.
const MAX_INTERFACE_LEN: usize = 15;

/// Read and validate an INI file from disk.
pub fn read_settings(path: &Path) -> Result<NetworkSettings, CoreError> {
    if !path.is_file() {
        return Err(CoreError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = text.len(), "read INI file");
    parse_settings(&text)
}

/// Parse and validate INI text.
pub fn parse_settings(text: &str) -> Result<NetworkSettings, CoreError> {
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(text, options).map_err(|e| CoreError::IniSyntax {
        message: e.to_string(),
    })?;
    reject_duplicates(&ini)?;

    let general = section(&ini, GENERAL).ok_or_else(|| CoreError::MissingSection {
        section: GENERAL.into(),
        reason: "in configuration file".into(),
    })?;

    let interface = value(general, "interface")
        .ok_or_else(|| missing_key(GENERAL, "interface", "(interface name is required)"))?
        .to_owned();
    check_interface_name(&interface)?;

    let kind = match value(general, "type") {
        Some(raw) => raw.parse::<InterfaceKind>().map_err(|_| {
            CoreError::invalid(GENERAL, "type", raw, "expected ethernet, wifi or wireless")
        })?,
        None => InterfaceKind::from_name(&interface),
    };

    let dhcp = match value(general, "dhcp") {
        Some(raw) => parse_bool(raw).ok_or_else(|| {
            CoreError::invalid(GENERAL, "dhcp", raw, "expected true/false, yes/no, on/off or 1/0")
        })?,
        None => true,
    };

    let address = if dhcp {
        match section(&ini, ADDRESS) {
            Some(props) => Some(parse_address(props, false)?).filter(|a| !a.is_empty()),
            None => None,
        }
    } else {
        let props = section(&ini, ADDRESS).ok_or_else(|| CoreError::MissingSection {
            section: ADDRESS.into(),
            reason: "for static IP configuration".into(),
        })?;
        Some(parse_address(props, true)?)
    };

    let wifi = match kind {
        InterfaceKind::Wireless => {
            let props = section(&ini, WIFI).ok_or_else(|| CoreError::MissingSection {
                section: WIFI.into(),
                reason: "for wireless interface configuration".into(),
            })?;
            Some(parse_wifi(props)?)
        }
        InterfaceKind::Ethernet => None,
    };

    debug!(%interface, %kind, dhcp, "validated network settings");

    Ok(NetworkSettings {
        interface,
        kind,
        dhcp,
        address,
        wifi,
    })
}

// ── Section parsers ─────────────────────────────────────────────────

fn parse_address(props: &Properties, required: bool) -> Result<StaticAddress, CoreError> {
    const FOR_STATIC: &str = "for static configuration";

    let ip = value(props, "ip");
    let subnet = value(props, "subnet");
    let gateway = value(props, "gateway");

    if required {
        if ip.is_none() {
            return Err(missing_key(ADDRESS, "ip", FOR_STATIC));
        }
        if gateway.is_none() {
            return Err(missing_key(ADDRESS, "gateway", FOR_STATIC));
        }
    }

    let address = match ip {
        Some(ip) => Some(parse_ip_with_subnet(ip, subnet)?),
        None => None,
    };

    let gateway = gateway
        .map(|raw| {
            raw.parse::<IpAddr>()
                .map_err(|_| CoreError::invalid(ADDRESS, "gateway", raw, "not an IP address"))
        })
        .transpose()?;

    let dns = value(props, "dns").map(parse_dns).transpose()?.unwrap_or_default();

    Ok(StaticAddress {
        address,
        gateway,
        dns,
    })
}

/// Combine `ip` and `subnet` into one network. `ip` may already carry a
/// `/prefix`, in which case `subnet` is optional but must agree.
fn parse_ip_with_subnet(ip: &str, subnet: Option<&str>) -> Result<Ipv4Net, CoreError> {
    let (addr_raw, inline_prefix) = match ip.split_once('/') {
        Some((addr, prefix)) => (addr.trim(), Some(prefix.trim())),
        None => (ip, None),
    };

    let addr: Ipv4Addr = addr_raw
        .parse()
        .map_err(|_| CoreError::invalid(ADDRESS, "ip", ip, "not an IPv4 address"))?;

    let inline_prefix = inline_prefix
        .map(|raw| {
            subnet::parse_subnet(raw).map_err(|e| CoreError::invalid(ADDRESS, "ip", ip, e.to_string()))
        })
        .transpose()?;

    let subnet_prefix = subnet
        .map(|raw| {
            subnet::parse_subnet(raw)
                .map_err(|e| CoreError::invalid(ADDRESS, "subnet", raw, e.to_string()))
        })
        .transpose()?;

    let prefix = match (inline_prefix, subnet_prefix) {
        (Some(a), Some(b)) if a != b => {
            return Err(CoreError::invalid(
                ADDRESS,
                "subnet",
                subnet.unwrap_or_default(),
                format!("conflicts with /{a} given in ip"),
            ));
        }
        (Some(p), _) | (None, Some(p)) => p,
        (None, None) => {
            return Err(missing_key(ADDRESS, "subnet", "(required alongside ip)"));
        }
    };

    Ipv4Net::new(addr, prefix).map_err(|e| CoreError::invalid(ADDRESS, "subnet", ip, e.to_string()))
}

fn parse_dns(raw: &str) -> Result<Vec<IpAddr>, CoreError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<IpAddr>()
                .map_err(|_| CoreError::invalid(ADDRESS, "dns", entry, "not an IP address"))
        })
        .collect()
}

fn parse_wifi(props: &Properties) -> Result<WifiCredentials, CoreError> {
    const FOR_WIRELESS: &str = "for wireless interface";

    let ssid = value(props, "ssid").ok_or_else(|| missing_key(WIFI, "ssid", FOR_WIRELESS))?;
    let password =
        value(props, "password").ok_or_else(|| missing_key(WIFI, "password", FOR_WIRELESS))?;

    Ok(WifiCredentials {
        ssid: ssid.to_owned(),
        password: SecretString::from(password.to_owned()),
    })
}

// ── Structural checks ───────────────────────────────────────────────

/// A repeated section or key would otherwise be silently shadowed by the
/// first occurrence.
fn reject_duplicates(ini: &Ini) -> Result<(), CoreError> {
    let mut sections = HashSet::new();
    for (name, props) in ini {
        let label = name.map_or_else(String::new, |n| n.trim().to_ascii_lowercase());
        if name.is_some() && !sections.insert(label.clone()) {
            return Err(CoreError::IniSyntax {
                message: format!("duplicate section [{label}]"),
            });
        }

        let mut keys = HashSet::new();
        for (key, _) in props {
            let key = key.trim().to_ascii_lowercase();
            if !keys.insert(key.clone()) {
                let scope = if name.is_some() {
                    format!("in [{label}]")
                } else {
                    "before the first section".to_owned()
                };
                return Err(CoreError::IniSyntax {
                    message: format!("duplicate key '{key}' {scope}"),
                });
            }
        }
    }
    Ok(())
}

/// The name ends up in a file name and in nmcli arguments, so it must be
/// something the kernel would accept as a device name.
fn check_interface_name(name: &str) -> Result<(), CoreError> {
    let reason = if name.len() > MAX_INTERFACE_LEN {
        Some("longer than 15 bytes")
    } else if name == "." || name == ".." {
        Some("not a device name")
    } else if name
        .chars()
        .any(|c| c == '/' || c == ':' || c.is_whitespace() || c.is_control())
    {
        Some("must not contain '/', ':' or whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CoreError::invalid(GENERAL, "interface", name, reason)),
        None => Ok(()),
    }
}

// ── Lookup helpers ──────────────────────────────────────────────────

fn section<'a>(ini: &'a Ini, name: &str) -> Option<&'a Properties> {
    ini.iter()
        .find(|(sec, _)| sec.is_some_and(|s| s.trim().eq_ignore_ascii_case(name)))
        .map(|(_, props)| props)
}

/// Non-empty trimmed value for `key`. Empty values count as absent.
fn value<'a>(props: &'a Properties, key: &str) -> Option<&'a str> {
    props
        .iter()
        .find(|(k, _)| k.trim().eq_ignore_ascii_case(key))
        .map(|(_, v)| v.trim())
        .filter(|v| !v.is_empty())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

fn missing_key(section: &str, key: &str, reason: &str) -> CoreError {
    CoreError::MissingKey {
        section: section.into(),
        key: key.into(),
        reason: reason.into(),
    }
}
