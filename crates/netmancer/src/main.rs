mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::path::PathBuf;

use clap::Parser;

use netmancer_config::{Config, DEFAULT_LOG_FILE};
use netmancer_core::Host;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::{CliError, exit_code};

fn main() {
    let Cli { global, command } = Cli::parse();

    // The audit log location can come from the config file, so load it first.
    let config = netmancer_config::load_config(global.config.as_deref());
    let log_file = global
        .log_file
        .clone()
        .or_else(|| config.as_ref().ok().map(|c| c.log_file.clone()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    let guard = logging::init(global.verbose, &log_file);
    let name = commands::command_name(&command);

    let result = match command {
        // Must keep working while the config file itself is broken.
        Command::Config(args) => {
            if let Err(err) = &config {
                tracing::warn!(error = %err, "configuration file does not load");
            }
            commands::config_cmd::handle(&args, &global)
        }
        command => config
            .map_err(CliError::from)
            .and_then(|config| run(command, &config, &global)),
    };

    let code = match result {
        Ok(()) => exit_code::SUCCESS,
        Err(err) => {
            logging::audit(name, &format!("Error: {err}"));
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            code
        }
    };

    // Flush the audit writer before exiting.
    drop(guard);
    std::process::exit(code);
}

fn run(command: Command, config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    match command {
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "netmancer", &mut std::io::stdout());
            Ok(())
        }

        Command::Man(args) => commands::man::handle(&args, global),

        cmd => {
            let host = Host::new(config.to_host_config());
            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &host, global)
        }
    }
}
