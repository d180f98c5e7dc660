//! Man page rendering via `clap_mangen`.

use std::io::Write;
use std::path::Path;

use clap::CommandFactory;

use crate::cli::{Cli, GlobalOpts, ManArgs};
use crate::error::CliError;
use crate::output::print_output;

pub fn handle(args: &ManArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cmd = Cli::command();

    let Some(dir) = &args.out_dir else {
        let mut stdout = std::io::stdout().lock();
        clap_mangen::Man::new(cmd).render(&mut stdout)?;
        stdout.flush()?;
        return Ok(());
    };

    std::fs::create_dir_all(dir).map_err(|e| CliError::write(dir, e))?;
    let mut written = Vec::new();
    write_pages(&cmd, dir, &mut written)?;
    print_output(
        &format!("Wrote {} man pages to {}", written.len(), dir.display()),
        global.quiet,
    );
    Ok(())
}

/// One page for `cmd`, then one per visible subcommand (`netmancer-show-info.1`, ...).
fn write_pages(
    cmd: &clap::Command,
    dir: &Path,
    written: &mut Vec<String>,
) -> Result<(), CliError> {
    let name = cmd.get_name().to_owned();
    let path = dir.join(format!("{name}.1"));

    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buf)?;
    std::fs::write(&path, buf).map_err(|e| CliError::write(&path, e))?;
    written.push(name.clone());

    for sub in cmd.get_subcommands().filter(|sub| !sub.is_hide_set()) {
        let sub = sub.clone().name(format!("{name}-{}", sub.get_name()));
        write_pages(&sub, dir, written)?;
    }
    Ok(())
}
