//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use cert_inventory_app::config::{AppConfig, DEFAULT_CONFIG_PATH};

#[derive(Debug, Parser)]
#[command(name = "cert-inventory", version, about = "SSL certificate inventory server")]
pub struct Args {
    /// Path to the JSON config document
    #[arg(short, long, env = "CERT_INVENTORY_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// HTTP port, overrides the config file; 0 disables the server
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Credential file, overrides `keyTextFile`
    #[arg(short, long = "key-file")]
    pub key_file: Option<String>,
}

impl Args {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(ref key_file) = self.key_file {
            config.key_text_file.clone_from(key_file);
        }
    }
}
