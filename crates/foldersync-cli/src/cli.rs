use std::path::PathBuf;

use clap::Parser;

/// Periodic one-way folder synchronization tool
///
/// Keeps a replica folder identical to a source folder, re-scanning and
/// reconciling both trees on a fixed interval until interrupted.
#[derive(Parser, Debug)]
#[command(name = "foldersync")]
#[command(long_about = None, version)]
pub struct Cli {
    /// Path to the source (input) folder
    #[arg(short, long, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to the replica (output) folder
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,

    /// Time interval in seconds between synchronization cycles
    #[arg(
        short = 't',
        long = "time",
        value_name = "SECONDS",
        default_value_t = 60
    )]
    pub time: u64,

    /// Path to the logfile; use 'LAST' to append to the most recent one
    /// (default: logs/sync_log-YYMMDD_hhmmss.log)
    #[arg(short, long, value_name = "PATH")]
    pub logfile: Option<String>,
}
