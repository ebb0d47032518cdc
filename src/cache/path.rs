//! Mapping from remote identifiers to flat cache slots
//!
//! Every `/` in an identifier becomes [`SEPARATOR_TOKEN`], so one remote
//! path always lands on one filename directly under the cache root.
//! Identifiers that already contain the token can collide with others;
//! `/a__b` and `/a/b` share a slot.

use crate::error::{CachetError, CachetResult};
use std::path::{Path, PathBuf};

/// Replaces the path separator inside slot filenames
pub const SEPARATOR_TOKEN: &str = "__";

/// Suffix of the lock file guarding a slot
pub const LOCK_SUFFIX: &str = ".lock";

/// Suffix of the directory a cached tarball is unpacked into
pub const EXTRACTION_SUFFIX: &str = ".dir";

/// Escape a remote identifier into a single filename
pub fn escape_identifier(identifier: &str) -> String {
    identifier.replace('/', SEPARATOR_TOKEN)
}

/// The directory holding every slot, lock and extraction directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRoot {
    dir: PathBuf,
}

/// Local paths belonging to one remote identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSlot {
    /// The cached copy of the remote file
    pub local_path: PathBuf,
    /// The advisory lock file for this slot
    pub lock_path: PathBuf,
    /// Where the cached file is unpacked when it is a tarball
    pub extraction_dir: PathBuf,
}

impl CacheRoot {
    /// Use `dir` as the cache root, made absolute against the current directory
    pub fn new(dir: impl AsRef<Path>) -> CachetResult<Self> {
        let dir = dir.as_ref();
        let dir = std::path::absolute(dir).map_err(|e| {
            CachetError::io(format!("resolving cache root {}", dir.display()), e)
        })?;
        Ok(Self { dir })
    }

    /// The root directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Local path of the cached copy of `identifier`
    pub fn local_path(&self, identifier: &str) -> PathBuf {
        self.dir.join(escape_identifier(identifier))
    }

    /// All paths of the slot for `identifier`
    pub fn slot(&self, identifier: &str) -> CacheSlot {
        let local_path = self.local_path(identifier);
        CacheSlot {
            lock_path: with_suffix(&local_path, LOCK_SUFFIX),
            extraction_dir: with_suffix(&local_path, EXTRACTION_SUFFIX),
            local_path,
        }
    }

    /// Create the root directory if it does not exist yet
    pub async fn ensure_exists(&self) -> CachetResult<()> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            CachetError::io(format!("creating cache root {}", self.dir.display()), e)
        })
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}
