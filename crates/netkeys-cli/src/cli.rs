// ABOUTME: CLI flag definitions using clap
// ABOUTME: Mirrors the flags an AuthorizedKeysCommand line passes to netkeys

use clap::Parser;
use netkeys_core::ServiceIdentity;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "netkeys",
    about = "Print an entity's public keys from the identity directory",
    version
)]
pub struct Cli {
    /// Type of keys to print
    #[arg(long = "type", default_value = "SSH")]
    pub key_type: String,

    /// ID to look up
    #[arg(long = "ID", default_value = "")]
    pub id: String,

    /// Service ID to send
    #[arg(long, default_value = ServiceIdentity::DEFAULT)]
    pub service: String,

    /// Config file to use
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Identity server host, overriding the config file
    #[arg(long, env = "NETAUTH_SERVER")]
    pub server: Option<String>,

    /// Show logs
    #[arg(long)]
    pub verbose: bool,
}
