//! Command dispatch: bridges CLI args -> `Host` operations -> output formatting.

pub mod apply;
pub mod config_cmd;
pub mod man;
pub mod query;
pub mod util;

use netmancer_core::Host;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Name recorded in the audit log for a command.
pub fn command_name(cmd: &Command) -> &'static str {
    match cmd {
        Command::ListNetworkInterfaces(_) => "list-network-interfaces",
        Command::ShowInfo(_) => "show-info",
        Command::DhcpInfo(_) => "dhcp-info",
        Command::InterfaceStatus(_) => "interface-status",
        Command::NetworkApply(_) => "network-apply",
        Command::Config(_) => "config",
        Command::Completions(_) => "completions",
        Command::Man(_) => "man",
    }
}

/// Dispatch a host-bound command to the appropriate handler.
pub fn dispatch(cmd: Command, host: &Host, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::ListNetworkInterfaces(args) => query::list_interfaces(host, &args, global),
        Command::ShowInfo(args) => query::show_info(host, &args, global),
        Command::DhcpInfo(args) => query::dhcp_info(host, &args, global),
        Command::InterfaceStatus(args) => query::interface_status(host, &args, global),
        Command::NetworkApply(args) => apply::handle(host, &args, global),
        // Handled before a host is built
        Command::Config(_) | Command::Completions(_) | Command::Man(_) => unreachable!(),
    }
}
