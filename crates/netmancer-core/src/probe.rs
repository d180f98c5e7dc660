// ── Link-layer probes ──
//
// Best-effort parsers for `ethtool <iface>` and `iwconfig <iface>` text.
// Missing fields stay `None`; nothing here fails.

use crate::model::{EthernetInfo, WifiInfo};

/// Extract speed, duplex, and wake-on mode from `ethtool` output.
pub fn parse_ethtool(stdout: &str) -> EthernetInfo {
    let mut info = EthernetInfo::default();

    for line in stdout.lines().map(str::trim) {
        // `Supports Wake-on:` is a separate line and must not match.
        if let Some(v) = line.strip_prefix("Speed:") {
            info.speed = non_empty(v);
        } else if let Some(v) = line.strip_prefix("Duplex:") {
            info.duplex = non_empty(v);
        } else if let Some(v) = line.strip_prefix("Wake-on:") {
            info.wake_on = non_empty(v);
        }
    }

    info
}

/// Extract association and radio details from `iwconfig` output.
pub fn parse_iwconfig(stdout: &str) -> WifiInfo {
    WifiInfo {
        essid: after(stdout, "ESSID:\"")
            .and_then(|rest| rest.split('"').next())
            .filter(|s| !s.is_empty())
            .map(str::to_owned),
        frequency: after(stdout, "Frequency:").and_then(|rest| measure(rest, &["GHz", "MHz"])),
        access_point: after(stdout, "Access Point: ").and_then(|rest| {
            let bssid: String = rest
                .chars()
                .take_while(|c| c.is_ascii_hexdigit() || *c == ':')
                .collect();
            (bssid.len() == 17).then_some(bssid)
        }),
        bit_rate: after(stdout, "Bit Rate=")
            .and_then(|rest| measure(rest, &["Gb/s", "Mb/s", "kb/s", "Kb/s"])),
        tx_power: after(stdout, "Tx-Power=").and_then(|rest| measure(rest, &["dBm"])),
        link_quality: after(stdout, "Link Quality=").and_then(|rest| {
            let (num, den) = rest.split_once('/')?;
            let den: String = den.chars().take_while(char::is_ascii_digit).collect();
            (is_number(num) && !den.is_empty()).then(|| format!("{num}/{den}"))
        }),
        signal_level: after(stdout, "Signal level=").and_then(|rest| measure(rest, &["dBm"])),
    }
}

fn non_empty(v: &str) -> Option<String> {
    let v = v.trim();
    (!v.is_empty()).then(|| v.to_owned())
}

fn after<'a>(haystack: &'a str, marker: &str) -> Option<&'a str> {
    haystack.find(marker).map(|i| &haystack[i + marker.len()..])
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-')
}

/// `"2.437 GHz  Access..."` with units `["GHz"]` -> `"2.437 GHz"`.
fn measure(rest: &str, units: &[&str]) -> Option<String> {
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
        .unwrap_or(rest.len());
    let (number, tail) = rest.split_at(end);
    if !is_number(number) {
        return None;
    }
    let tail = tail.strip_prefix(' ').unwrap_or(tail);
    units
        .iter()
        .find(|unit| tail.starts_with(*unit))
        .map(|unit| format!("{number} {unit}"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const ETHTOOL: &str = "\
Settings for eth0:
	Supported ports: [ TP ]
	Supported link modes:   10baseT/Half 10baseT/Full
	Speed: 1000Mb/s
	Duplex: Full
	Port: Twisted Pair
	Supports Wake-on: pumbg
	Wake-on: g
	Link detected: yes
";

    const IWCONFIG: &str = r#"wlan0     IEEE 802.11  ESSID:"HomeNet"
          Mode:Managed  Frequency:2.437 GHz  Access Point: 3C:84:6A:12:34:56
          Bit Rate=72.2 Mb/s   Tx-Power=22 dBm
          Retry short limit:7   RTS thr:off   Fragment thr:off
          Power Management:on
          Link Quality=58/70  Signal level=-52 dBm
          Rx invalid nwid:0  Rx invalid crypt:0  Rx invalid frag:0
"#;

    #[test]
    fn ethtool_fields() {
        assert_eq!(
            parse_ethtool(ETHTOOL),
            EthernetInfo {
                speed: Some("1000Mb/s".into()),
                duplex: Some("Full".into()),
                wake_on: Some("g".into()),
            }
        );
    }

    #[test]
    fn ethtool_empty_output() {
        assert_eq!(parse_ethtool(""), EthernetInfo::default());
    }

    #[test]
    fn iwconfig_fields() {
        assert_eq!(
            parse_iwconfig(IWCONFIG),
            WifiInfo {
                essid: Some("HomeNet".into()),
                frequency: Some("2.437 GHz".into()),
                access_point: Some("3C:84:6A:12:34:56".into()),
                bit_rate: Some("72.2 Mb/s".into()),
                tx_power: Some("22 dBm".into()),
                link_quality: Some("58/70".into()),
                signal_level: Some("-52 dBm".into()),
            }
        );
    }

    #[test]
    fn iwconfig_not_associated() {
        let out = "wlan0     IEEE 802.11  ESSID:off/any\n          Mode:Managed  Access Point: Not-Associated   Tx-Power=off\n";
        let info = parse_iwconfig(out);
        assert_eq!(info.essid, None);
        assert_eq!(info.access_point, None);
        assert_eq!(info.tx_power, None);
    }
}
