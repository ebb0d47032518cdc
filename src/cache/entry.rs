//! Fetch-or-reuse decisions for single cache slots

use crate::cache::digest::{hash_file, hash_reader, DigestAlgorithm};
use crate::cache::lock::{LockCoordinator, SlotGuard};
use crate::cache::path::CacheRoot;
use crate::error::{CachetError, CachetResult};
use crate::remote::RemoteFs;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

/// State of one cached remote resource after a fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntry {
    /// Full remote path of the resource
    pub identifier: String,
    /// Cached copy under the cache root
    pub local_path: PathBuf,
    /// Whether this call wrote new content to `local_path`
    pub updated: bool,
}

/// Keeps cache slots in sync with their remote resources
pub struct CacheEntryManager {
    root: CacheRoot,
    remote: Arc<dyn RemoteFs>,
    locks: Arc<dyn LockCoordinator>,
    algorithm: DigestAlgorithm,
}

impl CacheEntryManager {
    pub fn new(
        root: CacheRoot,
        remote: Arc<dyn RemoteFs>,
        locks: Arc<dyn LockCoordinator>,
        algorithm: DigestAlgorithm,
    ) -> Self {
        Self {
            root,
            remote,
            locks,
            algorithm,
        }
    }

    /// Cache root this manager writes under
    pub fn root(&self) -> &CacheRoot {
        &self.root
    }

    /// Make sure the cached copy of `identifier` matches the remote
    ///
    /// Copies when the slot is empty or the content digests differ. The
    /// check and the copy run under the slot lock, which is released before
    /// returning on every path.
    pub async fn ensure_local(&self, identifier: &str) -> CachetResult<CacheEntry> {
        let (entry, guard) = self.ensure_local_held(identifier).await?;
        guard.release();
        Ok(entry)
    }

    /// Like [`ensure_local`](Self::ensure_local), but hands back the still-held slot lock
    pub(crate) async fn ensure_local_held(
        &self,
        identifier: &str,
    ) -> CachetResult<(CacheEntry, SlotGuard)> {
        debug!(backend = self.remote.backend_name(), "Checking remote {}", identifier);
        if !self.remote.exists(identifier).await? {
            return Err(CachetError::RemoteNotFound(identifier.to_string()));
        }

        self.root.ensure_exists().await?;
        let slot = self.root.slot(identifier);
        let guard = self.locks.acquire(&slot.lock_path).await?;

        let updated = self.refresh(identifier, &slot.local_path).await?;
        let entry = CacheEntry {
            identifier: identifier.to_string(),
            local_path: slot.local_path,
            updated,
        };
        Ok((entry, guard))
    }

    /// Copy the remote into `local_path` unless it is already current
    async fn refresh(&self, identifier: &str, local_path: &Path) -> CachetResult<bool> {
        let cached = fs::try_exists(local_path)
            .await
            .map_err(|e| CachetError::io(format!("checking {}", local_path.display()), e))?;

        if cached && self.is_current(identifier, local_path).await? {
            info!(
                "Local file {} and remote file {} are identical, update not required",
                local_path.display(),
                identifier
            );
            return Ok(false);
        }

        self.remote.copy_to_local(identifier, local_path).await?;
        info!("Copied {} to {}", identifier, local_path.display());
        Ok(true)
    }

    async fn is_current(&self, identifier: &str, local_path: &Path) -> CachetResult<bool> {
        let mut stream = self.remote.open_read(identifier).await?;
        let remote = hash_reader(self.algorithm, &mut stream)
            .await
            .map_err(|e| CachetError::transfer(identifier, e.to_string()))?;
        let local = hash_file(self.algorithm, local_path).await?;

        debug!(%remote, %local, algorithm = %self.algorithm, "Compared digests for {}", identifier);
        Ok(remote == local)
    }
}
