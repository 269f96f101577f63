use clap::Parser;
use std::{net::SocketAddr, path::PathBuf};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-api", version, about = "City weather HTTP service")]
pub struct Args {
    /// Path to a TOML configuration file.
    ///
    /// Defaults to the platform config directory, falling back to the
    /// built-in city table when no file exists.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:5000. Overrides the configured value.
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}
