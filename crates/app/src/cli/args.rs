pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "lpl", version)]
#[command(about = "Create, read, update and delete linear playlists over the signed API")]
pub struct Args {
    /// API host to talk to (defaults to `api_host` from the config file)
    #[arg(long, global = true)]
    pub remote: Option<Url>,

    /// Path to the lpl config directory (defaults to ~/.lpl)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG overrides
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: crate::Command,
}
