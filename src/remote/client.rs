//! Remote filesystem abstraction
//!
//! The cache only needs three things from a remote filesystem: an
//! existence check, a byte stream to hash, and a full copy to a local path.

use crate::error::CachetResult;
use async_trait::async_trait;
use std::path::Path;
use tokio::io::AsyncRead;

/// Readable content of a remote resource
pub type RemoteStream = Box<dyn AsyncRead + Send + Unpin>;

/// Abstract remote filesystem client
///
/// Implemented by:
/// - [`HdfsCli`](super::HdfsCli): the `hdfs dfs` command line client
/// - [`MountedFs`](super::MountedFs): a remote filesystem mounted locally
#[async_trait]
pub trait RemoteFs: Send + Sync {
    /// Check whether `identifier` names an existing remote file
    async fn exists(&self, identifier: &str) -> CachetResult<bool>;

    /// Open `identifier` for streaming reads
    async fn open_read(&self, identifier: &str) -> CachetResult<RemoteStream>;

    /// Copy the whole of `identifier` to `local_path`, overwriting it
    async fn copy_to_local(&self, identifier: &str, local_path: &Path) -> CachetResult<()>;

    /// Get the human-readable backend name for display
    fn backend_name(&self) -> &'static str;
}
