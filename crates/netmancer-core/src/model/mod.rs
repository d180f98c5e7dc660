// ── Domain model ──
//
// `settings` is the declarative side (what the INI file asks for).
// `device`, `info`, and `dhcp` are the live side (what NetworkManager
// reports). Keys on the live records keep the upper-case names the JSON
// output has always used.

pub mod device;
pub mod dhcp;
pub mod info;
pub mod settings;

// ── Re-exports ──────────────────────────────────────────────────────

pub use device::DeviceEntry;
pub use dhcp::DhcpInfo;
pub use info::{EthernetInfo, InterfaceAddress, InterfaceInfo, WifiInfo};
pub use settings::{InterfaceKind, NetworkSettings, StaticAddress, WifiCredentials};
