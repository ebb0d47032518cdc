//! Local cache of remote files shared by many processes
//!
//! Every remote identifier owns one slot under the cache root:
//!
//! | Path | Purpose |
//! |------|---------|
//! | `<root>/<escaped id>` | Cached copy of the remote file |
//! | `<root>/<escaped id>.lock` | Advisory lock serializing updates |
//! | `<root>/<escaped id>.dir` | Extraction directory, tarballs only |
//!
//! A cached copy is refreshed whenever its digest differs from the remote.
//! Slots are never evicted.

pub mod digest;
pub mod entry;
pub mod lock;
pub mod path;
pub mod tarball;

pub use digest::{ContentDigest, DigestAlgorithm};
pub use entry::{CacheEntry, CacheEntryManager};
pub use lock::{FileLockCoordinator, LockCoordinator, SlotGuard};
pub use path::{escape_identifier, CacheRoot, CacheSlot};
pub use tarball::{ExtractionEntry, TarballExpander};

use crate::config::{Config, ConfigManager};
use crate::error::CachetResult;
use crate::extract::TarExtractor;
use crate::remote::create_remote;
use std::path::PathBuf;
use std::sync::Arc;

/// Resolve the cache root described by `config`
pub fn cache_root(config: &Config) -> CachetResult<CacheRoot> {
    let dir = config
        .cache
        .root
        .clone()
        .unwrap_or_else(ConfigManager::default_cache_root);
    CacheRoot::new(dir)
}

/// Build a manager from configuration
///
/// `endpoint` overrides the configured remote location for this manager only.
pub fn entry_manager(config: &Config, endpoint: Option<&str>) -> CachetResult<CacheEntryManager> {
    Ok(CacheEntryManager::new(
        cache_root(config)?,
        create_remote(&config.remote, endpoint)?,
        Arc::new(FileLockCoordinator::new()),
        config.cache.digest.parse()?,
    ))
}

/// Build a tarball expander from configuration
pub fn tarball_expander(config: &Config, endpoint: Option<&str>) -> CachetResult<TarballExpander> {
    Ok(TarballExpander::new(
        entry_manager(config, endpoint)?,
        Arc::new(TarExtractor::new(config.extract.tar_bin.clone())),
    ))
}

/// Local path of an up-to-date copy of the remote file `identifier`
pub async fn get_file(
    config: &Config,
    endpoint: Option<&str>,
    identifier: &str,
) -> CachetResult<PathBuf> {
    let entry = entry_manager(config, endpoint)?
        .ensure_local(identifier)
        .await?;
    Ok(entry.local_path)
}

/// Local directory holding the extracted contents of the remote tarball `identifier`
pub async fn get_tarball_as_directory(
    config: &Config,
    endpoint: Option<&str>,
    identifier: &str,
) -> CachetResult<PathBuf> {
    let entry = tarball_expander(config, endpoint)?
        .ensure_extracted(identifier)
        .await?;
    Ok(entry.extraction_dir)
}
