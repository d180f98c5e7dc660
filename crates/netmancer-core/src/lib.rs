//! Translation and query layer behind the `netmancer` CLI.
//!
//! - **[`loader`]**: reads the declarative INI file into a validated
//!   [`NetworkSettings`] record (mandatory sections per mode, subnet
//!   normalization, DNS list parsing).
//! - **[`netplan`]**: renders settings as a Netplan v2 document and
//!   derives the output path from the interface kind.
//! - **[`Host`]**: facade over NetworkManager (`nmcli`), `ethtool`,
//!   `iwconfig`, `hostnamectl` and `netplan`, driven through the
//!   [`CommandRunner`] seam.

pub mod config;
pub mod error;
pub mod host;
pub mod loader;
pub mod model;
pub mod netplan;
pub mod nmcli;
pub mod probe;
pub mod runner;
pub mod subnet;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{HostConfig, ToolPaths};
pub use error::CoreError;
pub use host::{Host, NetplanPlan};
pub use netplan::{NetplanDocument, Renderer};
pub use runner::{CommandRunner, SystemRunner};

pub use model::{
    DeviceEntry, DhcpInfo, EthernetInfo, InterfaceAddress, InterfaceInfo, InterfaceKind,
    NetworkSettings, StaticAddress, WifiCredentials, WifiInfo,
};
