//! Path command - show where an identifier is cached

use crate::cache::cache_root;
use crate::cli::args::{OutputFormat, PathArgs};
use crate::config::Config;
use crate::error::CachetResult;

/// Execute the path command
pub async fn execute(args: PathArgs, config: &Config) -> CachetResult<()> {
    let slot = cache_root(config)?.slot(&args.identifier);

    match args.format {
        OutputFormat::Plain => {
            println!("{}", slot.local_path.display());
            println!("{}", slot.lock_path.display());
            println!("{}", slot.extraction_dir.display());
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "identifier": args.identifier,
                "local_path": slot.local_path,
                "lock_path": slot.lock_path,
                "extraction_dir": slot.extraction_dir,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}
