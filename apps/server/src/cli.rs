use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "apiwatch",
    about = "HTTP(S) endpoint status monitor with a web dashboard",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path of the TOML configuration file
    #[arg(short, long, global = true, env = "APIWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long, global = true)]
    pub print_config: bool,

    #[command(flatten)]
    pub overrides: Overrides,
}

/// Values that take precedence over the configuration file
#[derive(Debug, Default, Clone, Args)]
pub struct Overrides {
    /// Address the web server listens on
    #[arg(long, global = true, env = "APIWATCH_BIND")]
    pub bind: Option<String>,

    /// Port the web server listens on
    #[arg(short, long, global = true, env = "APIWATCH_PORT")]
    pub port: Option<u16>,

    /// Seconds between two polling rounds
    #[arg(short, long, global = true, env = "APIWATCH_INTERVAL")]
    pub interval: Option<u64>,

    /// Seconds before a probe is reported as down
    #[arg(short, long, global = true, env = "APIWATCH_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Records kept per endpoint
    #[arg(long, global = true, env = "APIWATCH_HISTORY")]
    pub history: Option<usize>,

    /// Start polling right after startup
    #[arg(long, global = true, env = "APIWATCH_START")]
    pub start: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Run the web server and dashboard (default if no command specified)")]
    Serve,

    #[command(about = "Probe endpoints from the terminal")]
    Check {
        /// URL to probe, repeatable. Defaults to the configured endpoints
        #[arg(short, long = "url")]
        urls: Vec<String>,

        /// Display name for the URL at the same position
        #[arg(short, long = "name")]
        names: Vec<String>,

        /// Run a single round and exit
        #[arg(long)]
        once: bool,
    },
}
