//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Cachet - shared local cache for remote files
///
/// Keeps one local copy of each remote file, refreshed by content digest
/// and guarded by per-file locks so parallel workers never clobber it.
#[derive(Parser, Debug)]
#[command(name = "cachet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CACHET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Cache root directory (overrides cache.root)
    #[arg(long, global = true, env = "CACHET_CACHE_ROOT")]
    pub cache_root: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a remote file into the cache and print its local path
    Get(FetchArgs),

    /// Fetch and unpack a remote tarball and print the directory
    Tarball(FetchArgs),

    /// Show the cache slot for an identifier without touching anything
    Path(PathArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the get and tarball commands
#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Full remote path, e.g. /data/models/latest.tar
    pub identifier: String,

    /// Remote endpoint overriding remote.endpoint (hdfs) or remote.root (mounted)
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "plain")]
    pub format: OutputFormat,
}

/// Arguments for the path command
#[derive(Parser, Debug)]
pub struct PathArgs {
    /// Full remote path
    pub identifier: String,

    /// Output format
    #[arg(short, long, default_value = "plain")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for fetch results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Bare path, ready for shell substitution
    Plain,
    /// JSON object with update details
    Json,
}
