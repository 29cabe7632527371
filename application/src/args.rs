//! [`Args`] definitions.

use std::path::PathBuf;

use clap::Parser;

/// Servers of the user administration system.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Path to the JSON file to seed the record store with.
    ///
    /// Overrides `record_store.seed` of the configuration file. Ignored by
    /// the proxy.
    #[arg(short, long)]
    pub seed: Option<PathBuf>,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}
