//! Configuration management for cachet

pub mod schema;

pub use schema::{Config, RemoteBackend};

use crate::cache::DigestAlgorithm;
use crate::error::{CachetError, CachetResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Directory name of the default cache root under the home directory
const DEFAULT_CACHE_DIR: &str = ".cachet";

/// Locates, loads and resolves the cachet configuration
///
/// The returned [`Config`] always carries a concrete cache root: the
/// command-line override when set, else the file's `cache.root`, else
/// `~/.cachet`.
pub struct ConfigManager {
    config_path: PathBuf,
    cache_root_override: Option<PathBuf>,
}

impl ConfigManager {
    /// Use `path` when given, otherwise the per-user config file
    pub fn locate(path: Option<PathBuf>) -> Self {
        Self {
            config_path: path.unwrap_or_else(Self::default_config_path),
            cache_root_override: None,
        }
    }

    /// Replace whatever cache root the file names
    pub fn with_cache_root(mut self, root: Option<PathBuf>) -> Self {
        self.cache_root_override = root;
        self
    }

    /// `<config dir>/cachet/config.toml`
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cachet")
            .join("config.toml")
    }

    /// Get the default cache root, `~/.cachet`
    pub fn default_cache_root() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_CACHE_DIR)
    }

    /// Load and resolve the configuration
    ///
    /// A missing file means defaults. The digest name is checked here so a
    /// bad value fails before any remote is touched.
    pub async fn load(&self) -> CachetResult<Config> {
        let mut config = if fs::try_exists(&self.config_path).await.unwrap_or(false) {
            let content = fs::read_to_string(&self.config_path).await.map_err(|e| {
                let context = format!("reading config from {}", self.config_path.display());
                CachetError::io(context, e)
            })?;
            toml::from_str(&content).map_err(|e| CachetError::ConfigInvalid {
                path: self.config_path.clone(),
                reason: e.to_string(),
            })?
        } else {
            debug!("No config at {}, using defaults", self.config_path.display());
            Config::default()
        };

        config.cache.digest.parse::<DigestAlgorithm>()?;

        let root = match (&self.cache_root_override, config.cache.root.take()) {
            (Some(root), _) => root.clone(),
            (None, Some(root)) => root,
            (None, None) => Self::default_cache_root(),
        };
        debug!("Cache root: {}", root.display());
        config.cache.root = Some(root);

        Ok(config)
    }

    /// Write `config` to the config file, creating its directory
    pub async fn save(&self, config: &Config) -> CachetResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| CachetError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            CachetError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}
