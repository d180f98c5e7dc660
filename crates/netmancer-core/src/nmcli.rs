// ── NetworkManager output parsing ──
//
// Parsers for `nmcli -t` (terse) output. Terse mode separates fields with
// `:` and escapes literal colons and backslashes with `\`.

use crate::model::{DeviceEntry, DhcpInfo, InterfaceAddress, InterfaceInfo};
use crate::subnet;

/// Split one terse line on unescaped `:` and unescape each field.
pub fn split_terse(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            ':' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// `nmcli -t -f DEVICE,TYPE,STATE,CONNECTION device`
pub fn parse_device_list(stdout: &str) -> Vec<DeviceEntry> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let mut fields = split_terse(line).into_iter();
            let device = fields.next()?;
            let device_type = fields.next()?;
            let state = fields.next()?;
            let connection = fields.next()?;
            Some(DeviceEntry {
                device,
                device_type,
                state,
                connection,
            })
        })
        .collect()
}

/// Split a `device show` line into its base key (no `[n]` suffix) and value.
fn show_line(line: &str) -> Option<(&str, String)> {
    let (key, value) = line.split_once(':')?;
    let base = key.split('[').next().unwrap_or(key).trim();
    let value = split_terse(value).join(":");
    Some((base, value.trim().to_owned()))
}

/// `nmcli -t -f IP4.ADDRESS,IP4.GATEWAY,IP4.DNS,IP4.DOMAIN,GENERAL.STATE,GENERAL.TYPE device show <iface>`
pub fn parse_device_show(stdout: &str) -> InterfaceInfo {
    let mut info = InterfaceInfo::default();

    for (key, value) in stdout.lines().filter_map(show_line) {
        match key {
            "IP4.ADDRESS" if !value.is_empty() => {
                let address = match subnet::split_cidr(&value) {
                    Ok((ip, mask)) => InterfaceAddress {
                        address: ip.to_string(),
                        subnet_mask: Some(mask.to_string()),
                    },
                    Err(_) => InterfaceAddress {
                        address: value,
                        subnet_mask: None,
                    },
                };
                info.addresses.push(address);
            }
            "IP4.DNS" if !value.is_empty() => info.dns_servers.push(value),
            "IP4.ADDRESS" | "IP4.DNS" => {}
            "IP4.GATEWAY" => info.gateway = value,
            "IP4.DOMAIN" => info.domain = value,
            "GENERAL.STATE" => info.state = value,
            "GENERAL.TYPE" => info.device_type = value,
            other => {
                info.extra.insert(other.to_owned(), value);
            }
        }
    }

    info
}

/// `nmcli -t -f DHCP4.OPTION device show <iface>`
///
/// Lines look like `DHCP4.OPTION[3]:domain_name_servers = 192.168.1.1 8.8.8.8`.
/// The hostname is not part of this output and is left empty.
pub fn parse_dhcp_options(stdout: &str) -> DhcpInfo {
    let mut info = DhcpInfo::default();

    for (_, option) in stdout.lines().filter_map(show_line) {
        let Some((key, value)) = option.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "dhcp_server_identifier" => info.server_identifier = value.into(),
            "domain_name_servers" => info.domain_name_servers = split_list(value),
            "domain_name" => info.domain_name = value.into(),
            "routers" => info.routers = split_list(value),
            "ip_address" => info.ip_address = value.into(),
            "subnet_mask" => info.subnet_mask = value.into(),
            _ => {}
        }
    }

    info
}

/// NetworkManager has used spaces, `;` and `,` as list separators across versions.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == ';' || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn split_terse_handles_escapes() {
        assert_eq!(split_terse("eth0:ethernet"), vec!["eth0", "ethernet"]);
        assert_eq!(
            split_terse(r"wlan0:wifi:connected:Cafe\:Guest"),
            vec!["wlan0", "wifi", "connected", "Cafe:Guest"]
        );
        assert_eq!(split_terse(r"a\\b:c"), vec![r"a\b", "c"]);
        assert_eq!(split_terse("lo:loopback:unmanaged:"), vec!["lo", "loopback", "unmanaged", ""]);
    }

    #[test]
    fn device_list_rows() {
        let out = "\
eth0:ethernet:connected:Wired connection 1
wlan0:wifi:disconnected:
lo:loopback:connected (externally):lo

p2p-dev-wlan0:wifi-p2p:disconnected:
";
        let rows = parse_device_list(out);
        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[0],
            DeviceEntry {
                device: "eth0".into(),
                device_type: "ethernet".into(),
                state: "connected".into(),
                connection: "Wired connection 1".into(),
            }
        );
        assert_eq!(rows[1].connection, "");
        assert!(rows[2].is_loopback());
    }

    #[test]
    fn device_list_skips_short_rows() {
        assert!(parse_device_list("garbage\neth0:ethernet\n").is_empty());
    }

    #[test]
    fn device_show_fields() {
        let out = "\
GENERAL.TYPE:ethernet
GENERAL.STATE:100 (connected)
IP4.ADDRESS[1]:192.168.1.20/24
IP4.ADDRESS[2]:10.0.0.4/8
IP4.GATEWAY:192.168.1.1
IP4.DNS[1]:192.168.1.1
IP4.DNS[2]:8.8.8.8
IP4.DOMAIN[1]:lan
";
        let info = parse_device_show(out);
        assert_eq!(info.device_type, "ethernet");
        assert_eq!(info.state, "100 (connected)");
        assert_eq!(
            info.addresses,
            vec![
                InterfaceAddress {
                    address: "192.168.1.20".into(),
                    subnet_mask: Some("255.255.255.0".into()),
                },
                InterfaceAddress {
                    address: "10.0.0.4".into(),
                    subnet_mask: Some("255.0.0.0".into()),
                },
            ]
        );
        assert_eq!(info.gateway, "192.168.1.1");
        assert_eq!(info.dns_servers, vec!["192.168.1.1", "8.8.8.8"]);
        assert_eq!(info.domain, "lan");
        assert!(info.extra.is_empty());
        assert!(info.is_ethernet());
    }

    #[test]
    fn device_show_keeps_unparseable_address() {
        let info = parse_device_show("IP4.ADDRESS[1]:not-an-address\nIP4.GATEWAY:\n");
        assert_eq!(
            info.addresses,
            vec![InterfaceAddress {
                address: "not-an-address".into(),
                subnet_mask: None,
            }]
        );
        assert_eq!(info.gateway, "");
    }

    #[test]
    fn device_show_collects_unknown_fields() {
        let info = parse_device_show("GENERAL.HWADDR:AA\\:BB\\:CC\\:DD\\:EE\\:FF\n");
        assert_eq!(info.extra.get("GENERAL.HWADDR").map(String::as_str), Some("AA:BB:CC:DD:EE:FF"));
    }

    #[test]
    fn dhcp_options() {
        let out = "\
DHCP4.OPTION[1]:dhcp_lease_time = 86400
DHCP4.OPTION[2]:dhcp_server_identifier = 192.168.1.1
DHCP4.OPTION[3]:domain_name = home.lan
DHCP4.OPTION[4]:domain_name_servers = 192.168.1.1 8.8.8.8
DHCP4.OPTION[5]:ip_address = 192.168.1.20
DHCP4.OPTION[6]:routers = 192.168.1.1
DHCP4.OPTION[7]:subnet_mask = 255.255.255.0
";
        let info = parse_dhcp_options(out);
        assert_eq!(
            info,
            DhcpInfo {
                server_identifier: "192.168.1.1".into(),
                domain_name_servers: vec!["192.168.1.1".into(), "8.8.8.8".into()],
                domain_name: "home.lan".into(),
                routers: vec!["192.168.1.1".into()],
                hostname: String::new(),
                ip_address: "192.168.1.20".into(),
                subnet_mask: "255.255.255.0".into(),
            }
        );
    }

    #[test]
    fn dhcp_option_lists_accept_semicolons() {
        let info = parse_dhcp_options("DHCP4.OPTION[1]:domain_name_servers = 1.1.1.1;9.9.9.9\n");
        assert_eq!(info.domain_name_servers, vec!["1.1.1.1", "9.9.9.9"]);
    }
}
