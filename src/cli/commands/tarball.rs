//! Tarball command - fetch and unpack a remote archive

use crate::cache::tarball_expander;
use crate::cli::args::{FetchArgs, OutputFormat};
use crate::config::Config;
use crate::error::CachetResult;

/// Execute the tarball command
pub async fn execute(args: FetchArgs, config: &Config) -> CachetResult<()> {
    let expander = tarball_expander(config, args.endpoint.as_deref())?;
    let entry = expander.ensure_extracted(&args.identifier).await?;

    match args.format {
        OutputFormat::Plain => println!("{}", entry.extraction_dir.display()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
    }

    Ok(())
}
