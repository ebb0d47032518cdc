//! Remote filesystem mounted into the local tree
//!
//! Covers NFS, FUSE-mounted HDFS and similar setups where the remote
//! namespace is reachable under an ordinary directory.

use crate::error::{CachetError, CachetResult};
use crate::remote::client::{RemoteFs, RemoteStream};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Remote client reading from a local mount point
#[derive(Debug, Clone)]
pub struct MountedFs {
    root: PathBuf,
}

impl MountedFs {
    /// Create a client rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve an identifier under the mount point
    pub fn resolve(&self, identifier: &str) -> PathBuf {
        self.root.join(identifier.trim_start_matches('/'))
    }
}

#[async_trait]
impl RemoteFs for MountedFs {
    async fn exists(&self, identifier: &str) -> CachetResult<bool> {
        match fs::metadata(self.resolve(identifier)).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CachetError::transfer(identifier, e.to_string())),
        }
    }

    async fn open_read(&self, identifier: &str) -> CachetResult<RemoteStream> {
        let file = fs::File::open(self.resolve(identifier))
            .await
            .map_err(|e| CachetError::transfer(identifier, e.to_string()))?;
        Ok(Box::new(file))
    }

    async fn copy_to_local(&self, identifier: &str, local_path: &Path) -> CachetResult<()> {
        let source = self.resolve(identifier);
        debug!("Copying {} to {}", source.display(), local_path.display());

        fs::copy(&source, local_path)
            .await
            .map_err(|e| CachetError::transfer(identifier, e.to_string()))?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "mounted"
    }
}
