use std::path::PathBuf;

use clap::Parser;

/// Beacon: broadcast what you are working on.
#[derive(Parser, Debug)]
#[command(name = "beacon", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Exit after this many seconds instead of waiting for Ctrl-C.
    #[arg(long, value_name = "SECS")]
    pub linger: Option<u64>,

    /// Print the workspace snapshot as JSON after opening directories.
    #[arg(long)]
    pub print_snapshot: bool,

    /// Directories to open as workspaces.
    pub dirs: Vec<PathBuf>,
}

pub fn parse() -> Args {
    Args::parse()
}
