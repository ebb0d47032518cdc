//! Get command - fetch a remote file into the cache

use crate::cache::entry_manager;
use crate::cli::args::{FetchArgs, OutputFormat};
use crate::config::Config;
use crate::error::CachetResult;

/// Execute the get command
pub async fn execute(args: FetchArgs, config: &Config) -> CachetResult<()> {
    let manager = entry_manager(config, args.endpoint.as_deref())?;
    let entry = manager.ensure_local(&args.identifier).await?;

    match args.format {
        OutputFormat::Plain => println!("{}", entry.local_path.display()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
    }

    Ok(())
}
