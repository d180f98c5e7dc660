//! Read-only interface queries.

use tabled::Tabled;

use netmancer_core::{DeviceEntry, Host};

use crate::cli::{GlobalOpts, InterfaceArgs, SaveArgs};
use crate::error::CliError;
use crate::logging::audit;
use crate::output;

// ── Table row ────────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Type")]
    device_type: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Connection")]
    connection: String,
}

fn device_row(d: &DeviceEntry) -> DeviceRow {
    DeviceRow {
        device: d.device.clone(),
        device_type: d.device_type.clone(),
        state: d.state.clone(),
        connection: d.connection.clone(),
    }
}

// ── Handlers ─────────────────────────────────────────────────────────

pub fn list_interfaces(
    host: &Host,
    args: &SaveArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let devices = host.list_interfaces()?;
    let rendered = output::render_list(global.format, &devices, device_row)?;
    deliver(
        "list-network-interfaces",
        &rendered,
        args,
        global,
        "Listed network interfaces",
    )
}

pub fn show_info(host: &Host, args: &InterfaceArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let info = host.show_info(&args.interface)?;
    let rendered = output::render_single(global.format, &info)?;
    deliver(
        "show-info",
        &rendered,
        &args.save,
        global,
        &format!("Showed information for interface {}", args.interface),
    )
}

pub fn dhcp_info(host: &Host, args: &InterfaceArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let info = host.dhcp_info(&args.interface)?;
    let rendered = output::render_single(global.format, &info)?;
    deliver(
        "dhcp-info",
        &rendered,
        &args.save,
        global,
        &format!("Showed DHCP information for interface {}", args.interface),
    )
}

pub fn interface_status(
    host: &Host,
    args: &InterfaceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let status = host.interface_status(&args.interface)?;
    let rendered = output::render_single(global.format, &status)?;
    deliver(
        "interface-status",
        &rendered,
        &args.save,
        global,
        &format!("Showed status for interface {}", args.interface),
    )
}

/// Save to `-o FILE` or print, then record the outcome.
fn deliver(
    command: &str,
    rendered: &str,
    args: &SaveArgs,
    global: &GlobalOpts,
    shown: &str,
) -> Result<(), CliError> {
    if let Some(path) = &args.output {
        output::save_output(path, rendered)?;
        let message = format!("Output saved to {}", path.display());
        output::print_output(&message, global.quiet);
        audit(command, &message);
    } else {
        output::print_output(rendered, global.quiet);
        audit(command, shown);
    }
    Ok(())
}
