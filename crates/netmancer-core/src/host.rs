// ── Host facade ──
//
// One method per user-facing operation. Queries shell out to nmcli and
// friends through the `CommandRunner`, then hand the text to the parsers
// in `nmcli` / `probe`. Netplan planning is pure until `NetplanPlan::write`.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::HostConfig;
use crate::error::CoreError;
use crate::loader;
use crate::model::{DeviceEntry, DhcpInfo, EthernetInfo, InterfaceInfo, NetworkSettings, WifiInfo};
use crate::netplan::{self, NetplanDocument};
use crate::nmcli;
use crate::probe;
use crate::runner::{CommandRunner, SystemRunner};

const DEVICE_FIELDS: &str = "DEVICE,TYPE,STATE,CONNECTION";
const SHOW_FIELDS: &str = "IP4.ADDRESS,IP4.GATEWAY,IP4.DNS,IP4.DOMAIN,GENERAL.STATE,GENERAL.TYPE";
const DHCP_FIELDS: &str = "DHCP4.OPTION";

/// A rendered Netplan file that has not been written yet.
#[derive(Debug)]
pub struct NetplanPlan {
    pub settings: NetworkSettings,
    pub path: PathBuf,
    pub yaml: String,
}

impl NetplanPlan {
    pub fn write(&self) -> Result<(), CoreError> {
        netplan::write_document(&self.path, &self.yaml)
    }
}

/// Entry point for every query and configuration operation.
#[derive(Debug)]
pub struct Host<R = SystemRunner> {
    config: HostConfig,
    runner: R,
}

impl Host<SystemRunner> {
    pub fn new(config: HostConfig) -> Self {
        Self::with_runner(config, SystemRunner)
    }
}

impl<R: CommandRunner> Host<R> {
    pub fn with_runner(config: HostConfig, runner: R) -> Self {
        Self { config, runner }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Every device NetworkManager knows about, loopback included.
    pub fn devices(&self) -> Result<Vec<DeviceEntry>, CoreError> {
        let out = self.nmcli(&["-t", "-f", DEVICE_FIELDS, "device"])?;
        Ok(nmcli::parse_device_list(&out))
    }

    /// Devices minus loopback.
    pub fn list_interfaces(&self) -> Result<Vec<DeviceEntry>, CoreError> {
        let mut devices = self.devices()?;
        devices.retain(|d| !d.is_loopback());
        debug!(count = devices.len(), "listed interfaces");
        Ok(devices)
    }

    /// The device row for `interface`, which must exist and be connected.
    pub fn ensure_connected(&self, interface: &str) -> Result<DeviceEntry, CoreError> {
        let device = self
            .devices()?
            .into_iter()
            .find(|d| d.device == interface)
            .ok_or_else(|| CoreError::InterfaceNotFound {
                interface: interface.into(),
            })?;

        if !device.is_connected() {
            return Err(CoreError::InterfaceUnavailable {
                interface: interface.into(),
                state: device.state,
            });
        }
        Ok(device)
    }

    pub fn interface_status(&self, interface: &str) -> Result<DeviceEntry, CoreError> {
        self.ensure_connected(interface)
    }

    pub fn show_info(&self, interface: &str) -> Result<InterfaceInfo, CoreError> {
        self.ensure_connected(interface)?;

        let out = self.nmcli(&["-t", "-f", SHOW_FIELDS, "device", "show", interface])?;
        let mut info = nmcli::parse_device_show(&out);

        if info.is_ethernet() {
            info.ethernet = Some(self.ethernet_probe(interface));
        } else if info.is_wireless() {
            info.wifi = Some(self.wifi_probe(interface));
        }
        Ok(info)
    }

    pub fn dhcp_info(&self, interface: &str) -> Result<DhcpInfo, CoreError> {
        self.ensure_connected(interface)?;

        let out = self.nmcli(&["-t", "-f", DHCP_FIELDS, "device", "show", interface])?;
        let mut info = nmcli::parse_dhcp_options(&out);
        info.hostname = self.static_hostname();
        Ok(info)
    }

    // ── Netplan ──────────────────────────────────────────────────────

    /// Parse `ini_path` and render its Netplan document. `output` overrides
    /// the default `<netplan_dir>/<priority>-netmancer-<iface>.yaml`.
    pub fn plan(&self, ini_path: &Path, output: Option<&Path>) -> Result<NetplanPlan, CoreError> {
        let settings = loader::read_settings(ini_path)?;
        let yaml = NetplanDocument::from_settings(&settings, self.config.renderer).to_yaml()?;
        let path = output.map_or_else(
            || {
                netplan::default_output_path(
                    &self.config.netplan_dir,
                    &settings.interface,
                    settings.kind,
                )
            },
            Path::to_path_buf,
        );

        debug!(interface = %settings.interface, path = %path.display(), "planned netplan file");
        Ok(NetplanPlan {
            settings,
            path,
            yaml,
        })
    }

    /// Run `netplan apply`, through sudo when needed and allowed.
    pub fn netplan_apply(&self) -> Result<(), CoreError> {
        let tools = &self.config.tools;
        if self.config.escalate && !self.runner.is_root() {
            info!("not running as root, applying through {}", tools.sudo);
            self.runner.run(&tools.sudo, &[&tools.netplan, "apply"])?;
        } else {
            self.runner.run(&tools.netplan, &["apply"])?;
        }
        Ok(())
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn nmcli(&self, args: &[&str]) -> Result<String, CoreError> {
        self.runner.run(&self.config.tools.nmcli, args)
    }

    fn ethernet_probe(&self, interface: &str) -> EthernetInfo {
        match self.runner.run(&self.config.tools.ethtool, &[interface]) {
            Ok(out) => probe::parse_ethtool(&out),
            Err(err) => {
                warn!(%interface, error = %err, "ethtool probe failed");
                EthernetInfo::default()
            }
        }
    }

    fn wifi_probe(&self, interface: &str) -> WifiInfo {
        match self.runner.run(&self.config.tools.iwconfig, &[interface]) {
            Ok(out) => probe::parse_iwconfig(&out),
            Err(err) => {
                warn!(%interface, error = %err, "iwconfig probe failed");
                WifiInfo::default()
            }
        }
    }

    fn static_hostname(&self) -> String {
        match self.runner.run(&self.config.tools.hostnamectl, &["--static"]) {
            Ok(out) => out.trim().to_owned(),
            Err(err) => {
                debug!(error = %err, "hostnamectl failed");
                String::new()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::InterfaceKind;

    const DEVICES: &str = "\
eth0:ethernet:connected:Wired connection 1
wlan0:wifi:connected:HomeNet
eth1:ethernet:disconnected:
lo:loopback:connected (externally):lo
";

    /// Replays canned stdout keyed by the full command line.
    #[derive(Default)]
    struct ScriptedRunner {
        responses: HashMap<String, Result<String, String>>,
        calls: RefCell<Vec<String>>,
        root: bool,
    }

    impl ScriptedRunner {
        fn ok(mut self, command: &str, stdout: &str) -> Self {
            self.responses.insert(command.into(), Ok(stdout.into()));
            self
        }

        fn fail(mut self, command: &str, message: &str) -> Self {
            self.responses.insert(command.into(), Err(message.into()));
            self
        }

        fn with_devices(self) -> Self {
            self.ok("nmcli -t -f DEVICE,TYPE,STATE,CONNECTION device", DEVICES)
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, program: &str, args: &[&str]) -> Result<String, CoreError> {
            let line = std::iter::once(program)
                .chain(args.iter().copied())
                .collect::<Vec<_>>()
                .join(" ");
            self.calls.borrow_mut().push(line.clone());
            match self.responses.get(&line) {
                Some(Ok(out)) => Ok(out.clone()),
                Some(Err(message)) => Err(CoreError::CommandFailed {
                    program: program.into(),
                    status: Some(1),
                    message: message.clone(),
                }),
                None => Err(CoreError::CommandSpawn {
                    program: program.into(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, line),
                }),
            }
        }

        fn is_root(&self) -> bool {
            self.root
        }
    }

    fn host(runner: ScriptedRunner) -> Host<ScriptedRunner> {
        Host::with_runner(HostConfig::default(), runner)
    }

    #[test]
    fn list_interfaces_skips_loopback() {
        let host = host(ScriptedRunner::default().with_devices());
        let names: Vec<_> = host
            .list_interfaces()
            .unwrap()
            .into_iter()
            .map(|d| d.device)
            .collect();
        assert_eq!(names, vec!["eth0", "wlan0", "eth1"]);
    }

    #[test]
    fn list_interfaces_surfaces_nmcli_failure() {
        let host = host(ScriptedRunner::default().fail(
            "nmcli -t -f DEVICE,TYPE,STATE,CONNECTION device",
            "NetworkManager is not running.",
        ));
        let err = host.list_interfaces().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error running nmcli: NetworkManager is not running."
        );
    }

    #[test]
    fn interface_status_requires_connection() {
        let host = host(ScriptedRunner::default().with_devices());

        let status = host.interface_status("wlan0").unwrap();
        assert_eq!(status.connection, "HomeNet");

        let err = host.interface_status("eth1").unwrap_err();
        assert!(matches!(err, CoreError::InterfaceUnavailable { ref state, .. } if state == "disconnected"));

        let err = host.interface_status("eth9").unwrap_err();
        assert!(matches!(err, CoreError::InterfaceNotFound { .. }));
    }

    #[test]
    fn show_info_ethernet_adds_ethtool() {
        let runner = ScriptedRunner::default()
            .with_devices()
            .ok(
                "nmcli -t -f IP4.ADDRESS,IP4.GATEWAY,IP4.DNS,IP4.DOMAIN,GENERAL.STATE,GENERAL.TYPE device show eth0",
                "GENERAL.TYPE:ethernet\nGENERAL.STATE:100 (connected)\nIP4.ADDRESS[1]:192.168.1.20/24\nIP4.GATEWAY:192.168.1.1\n",
            )
            .ok("ethtool eth0", "Settings for eth0:\n\tSpeed: 100Mb/s\n\tDuplex: Half\n");
        let info = host(runner).show_info("eth0").unwrap();

        assert_eq!(info.addresses[0].subnet_mask.as_deref(), Some("255.255.255.0"));
        let ethernet = info.ethernet.unwrap();
        assert_eq!(ethernet.speed.as_deref(), Some("100Mb/s"));
        assert_eq!(ethernet.duplex.as_deref(), Some("Half"));
        assert!(info.wifi.is_none());
    }

    #[test]
    fn show_info_wifi_tolerates_missing_iwconfig() {
        let runner = ScriptedRunner::default().with_devices().ok(
            "nmcli -t -f IP4.ADDRESS,IP4.GATEWAY,IP4.DNS,IP4.DOMAIN,GENERAL.STATE,GENERAL.TYPE device show wlan0",
            "GENERAL.TYPE:wifi\nGENERAL.STATE:100 (connected)\n",
        );
        let info = host(runner).show_info("wlan0").unwrap();
        assert_eq!(info.wifi, Some(WifiInfo::default()));
        assert!(info.ethernet.is_none());
    }

    #[test]
    fn show_info_rejects_disconnected_interface_before_querying() {
        let runner = ScriptedRunner::default().with_devices();
        let host = host(runner);
        assert!(host.show_info("eth1").is_err());
        assert_eq!(host.runner.calls.borrow().len(), 1);
    }

    #[test]
    fn dhcp_info_merges_hostname() {
        let runner = ScriptedRunner::default()
            .with_devices()
            .ok(
                "nmcli -t -f DHCP4.OPTION device show eth0",
                "DHCP4.OPTION[1]:ip_address = 192.168.1.20\nDHCP4.OPTION[2]:routers = 192.168.1.1\n",
            )
            .ok("hostnamectl --static", "gateway-box\n");
        let info = host(runner).dhcp_info("eth0").unwrap();
        assert_eq!(info.ip_address, "192.168.1.20");
        assert_eq!(info.routers, vec!["192.168.1.1"]);
        assert_eq!(info.hostname, "gateway-box");
    }

    #[test]
    fn dhcp_info_hostname_failure_is_empty() {
        let runner = ScriptedRunner::default()
            .with_devices()
            .ok("nmcli -t -f DHCP4.OPTION device show eth0", "");
        assert_eq!(host(runner).dhcp_info("eth0").unwrap().hostname, "");
    }

    #[test]
    fn netplan_apply_escalates_when_not_root() {
        let runner = ScriptedRunner::default().ok("sudo netplan apply", "");
        let host = host(runner);
        host.netplan_apply().unwrap();
        assert_eq!(*host.runner.calls.borrow(), vec!["sudo netplan apply"]);
    }

    #[test]
    fn netplan_apply_direct_as_root_or_without_escalation() {
        let runner = ScriptedRunner {
            root: true,
            ..ScriptedRunner::default()
        }
        .ok("netplan apply", "");
        let host = host(runner);
        host.netplan_apply().unwrap();
        assert_eq!(*host.runner.calls.borrow(), vec!["netplan apply"]);

        let config = HostConfig {
            escalate: false,
            ..HostConfig::default()
        };
        let host = Host::with_runner(config, ScriptedRunner::default().ok("netplan apply", ""));
        host.netplan_apply().unwrap();
        assert_eq!(*host.runner.calls.borrow(), vec!["netplan apply"]);
    }

    #[test]
    fn netplan_apply_failure_is_execution_error() {
        let host = host(ScriptedRunner::default().fail("sudo netplan apply", "Invalid YAML"));
        let err = host.netplan_apply().unwrap_err();
        assert!(matches!(err, CoreError::CommandFailed { .. }));
    }

    #[test]
    fn plan_uses_default_path_by_kind() {
        let dir = tempfile::tempdir().unwrap();
        let wired = dir.path().join("wired.ini");
        std::fs::write(&wired, "[general]\ninterface=eth0\n").unwrap();
        let wireless = dir.path().join("wireless.ini");
        std::fs::write(&wireless, "[general]\ninterface=wlan0\n[wifi]\nssid=a\npassword=b\n").unwrap();

        let host = host(ScriptedRunner::default());

        let plan = host.plan(&wired, None).unwrap();
        assert_eq!(plan.path, PathBuf::from("/etc/netplan/99-netmancer-eth0.yaml"));
        assert!(plan.yaml.contains("dhcp4: true"));

        let plan = host.plan(&wireless, None).unwrap();
        assert_eq!(plan.settings.kind, InterfaceKind::Wireless);
        assert_eq!(plan.path, PathBuf::from("/etc/netplan/100-netmancer-wlan0.yaml"));
    }

    #[test]
    fn plan_honours_output_override_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let ini = dir.path().join("net.ini");
        std::fs::write(&ini, "[general]\ninterface=eth0\n").unwrap();
        let out = dir.path().join("custom.yaml");

        let plan = host(ScriptedRunner::default()).plan(&ini, Some(&out)).unwrap();
        assert_eq!(plan.path, out);
        plan.write().unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), plan.yaml);
    }
}
