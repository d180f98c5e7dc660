//! Clap derive structures for the `netmancer` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// netmancer -- inspect NetworkManager interfaces and generate Netplan files
#[derive(Debug, Parser)]
#[command(
    name = "netmancer",
    version,
    about = "Inspect network interfaces and generate Netplan configuration",
    long_about = "Query interface details through NetworkManager (nmcli), ethtool and\n\
        iwconfig, and translate declarative INI files into Netplan YAML.\n\n\
        Every command outcome is appended to the audit log.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, env = "NETMANCER_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Audit log file (overrides `log_file` from configuration)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Output format for query results
    #[arg(long, short = 'f', default_value = "json", global = true)]
    pub format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON (default)
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Pretty table
    Table,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List network interfaces known to NetworkManager (loopback excluded)
    #[command(alias = "ls")]
    ListNetworkInterfaces(SaveArgs),

    /// Show addresses, DNS, gateway and link details for an interface
    ShowInfo(InterfaceArgs),

    /// Show DHCP lease details for an interface
    DhcpInfo(InterfaceArgs),

    /// Show the NetworkManager status row for an interface
    InterfaceStatus(InterfaceArgs),

    /// Generate a Netplan file from an INI description, optionally applying it
    NetworkApply(NetworkApplyArgs),

    /// Inspect and initialize netmancer's own configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Render man pages (stdout, or one file per command with --out-dir)
    Man(ManArgs),
}

// ── Query Commands ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SaveArgs {
    /// Save the result to FILE instead of printing it
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct InterfaceArgs {
    /// Interface name (e.g. eth0, wlan0)
    pub interface: String,

    #[command(flatten)]
    pub save: SaveArgs,
}

// ── Network Apply ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NetworkApplyArgs {
    /// INI file describing the interface configuration
    pub ini_file: PathBuf,

    /// Netplan file to write (default: <netplan_dir>/99-netmancer-<iface>.yaml,
    /// or 100-netmancer-<iface>.yaml for wireless)
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Run `netplan apply` after writing the file
    #[arg(long, short = 'a')]
    pub apply: bool,

    /// Print the generated YAML without writing or applying it
    #[arg(long, conflicts_with = "apply")]
    pub dry_run: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (defaults, file, environment)
    Show,

    /// Print the configuration file path
    Path,

    /// Write a configuration file populated with defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

// ── Man Pages ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ManArgs {
    /// Write `netmancer.1` plus one page per subcommand into this directory
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}
