//! Remote client factory
//!
//! Picks the configured backend and applies an optional endpoint override.

use crate::config::schema::RemoteConfig;
use crate::config::RemoteBackend;
use crate::error::{CachetError, CachetResult};
use crate::remote::client::RemoteFs;
use crate::remote::hdfs::HdfsCli;
use crate::remote::mounted::MountedFs;
use std::path::PathBuf;
use std::sync::Arc;

/// Create the remote client described by `config`
///
/// # Arguments
/// * `config` - Remote filesystem settings
/// * `endpoint` - Overrides the configured endpoint (hdfs) or mount root (mounted)
pub fn create_remote(
    config: &RemoteConfig,
    endpoint: Option<&str>,
) -> CachetResult<Arc<dyn RemoteFs>> {
    match config.backend {
        RemoteBackend::Hdfs => {
            let endpoint = endpoint
                .map(String::from)
                .or_else(|| config.endpoint.clone());
            Ok(Arc::new(HdfsCli::new(config.hdfs_bin.clone(), endpoint)))
        }
        RemoteBackend::Mounted => {
            let root = endpoint
                .map(PathBuf::from)
                .or_else(|| config.root.clone())
                .ok_or(CachetError::MountRootMissing)?;
            Ok(Arc::new(MountedFs::new(root)))
        }
    }
}
