//! Config subcommand handlers.

use netmancer_config::{self as config, Config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::print_output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = global.config.clone().unwrap_or_else(config::config_path);

    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load_config(global.config.as_deref())?;
            let rendered = toml::to_string_pretty(&cfg).map_err(config::ConfigError::from)?;
            print_output(&rendered, global.quiet);
        }

        ConfigCommand::Path => print_output(&path.display().to_string(), global.quiet),

        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            let written = config::save_config(&Config::default(), Some(&path))?;
            print_output(
                &format!("Wrote default configuration to {}", written.display()),
                global.quiet,
            );
        }
    }
    Ok(())
}
