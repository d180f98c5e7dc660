//! `network-apply`: INI file -> Netplan YAML on disk -> optional `netplan apply`.

use netmancer_core::Host;

use crate::cli::{GlobalOpts, NetworkApplyArgs};
use crate::error::CliError;
use crate::logging::audit;
use crate::output::print_output;

use super::util;

const COMMAND: &str = "network-apply";

pub fn handle(host: &Host, args: &NetworkApplyArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let plan = host.plan(&args.ini_file, args.output.as_deref())?;
    tracing::debug!(
        interface = %plan.settings.interface,
        kind = %plan.settings.kind,
        dhcp = plan.settings.dhcp,
        "parsed interface settings"
    );

    if args.dry_run {
        let message = format!(
            "Generated Netplan configuration from {} (dry run, would write {})",
            args.ini_file.display(),
            plan.path.display()
        );
        print_output(&message, global.quiet);
        print_output(&plan.yaml, global.quiet);
        audit(COMMAND, &message);
        return Ok(());
    }

    plan.write()?;
    let message = format!(
        "Generated Netplan configuration from {} and saved to {}",
        args.ini_file.display(),
        plan.path.display()
    );
    print_output(&message, global.quiet);
    audit(COMMAND, &message);

    print_output("\nGenerated YAML content:", global.quiet);
    print_output(&plan.yaml, global.quiet);

    if !args.apply {
        return Ok(());
    }

    let prompt = format!(
        "Apply {} now? Network connectivity may drop",
        plan.path.display()
    );
    if !util::confirm(&prompt, "netplan apply", global.yes)? {
        let message = "Skipped netplan apply";
        print_output(message, global.quiet);
        audit(COMMAND, message);
        return Ok(());
    }

    host.netplan_apply()?;
    let message = "Applied Netplan configuration successfully";
    print_output(message, global.quiet);
    audit(COMMAND, message);
    Ok(())
}
