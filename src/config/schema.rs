//! Configuration schema for cachet
//!
//! Configuration is stored at `~/.config/cachet/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Local cache settings
    pub cache: CacheConfig,

    /// Remote filesystem settings
    pub remote: RemoteConfig,

    /// Archive extraction settings
    pub extract: ExtractConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Local cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache root directory (defaults to `~/.cachet`)
    pub root: Option<PathBuf>,

    /// Digest used for staleness checks: "sha1" or "sha256"
    pub digest: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root: None,
            digest: "sha256".to_string(),
        }
    }
}

/// Which remote filesystem client to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteBackend {
    /// The `hdfs dfs` command line client
    #[default]
    Hdfs,
    /// A remote filesystem mounted into the local tree
    Mounted,
}

/// Remote filesystem configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Backend driving remote reads and copies
    pub backend: RemoteBackend,

    /// Default endpoint, e.g. `hdfs://namenode:8020` (None = client default)
    pub endpoint: Option<String>,

    /// Program used by the hdfs backend
    pub hdfs_bin: String,

    /// Mount point used by the mounted backend
    pub root: Option<PathBuf>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            backend: RemoteBackend::Hdfs,
            endpoint: None,
            hdfs_bin: "hdfs".to_string(),
            root: None,
        }
    }
}

/// Archive extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Program used to unpack tarballs
    pub tar_bin: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            tar_bin: "tar".to_string(),
        }
    }
}
