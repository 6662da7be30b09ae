use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// Multi-tenant gateway for managing and running agents.
#[derive(Debug, Parser)]
#[command(name = "hive", version)]
pub(crate) struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "HIVE_CONFIG", default_value = "hive.toml")]
    pub config: PathBuf,

    /// Address to listen on; overrides the configuration file.
    #[arg(short, long, env = "HIVE_LISTEN_ADDRESS")]
    pub listen_address: Option<SocketAddr>,

    /// Log filter directives, e.g. "info" or "server=debug,rate_limit=debug".
    #[arg(long, env = "HIVE_LOG", default_value = "info")]
    pub log_filter: String,
}
