//! Cross-process advisory locks, one per cache slot
//!
//! A slot is locked by taking an exclusive `flock(2)` on its lock file.
//! The lock only excludes processes that go through a [`LockCoordinator`]
//! on the same cache root; anything else touching the cache is unaffected.
//! There is no timeout. The kernel drops a `flock` when its holder dies,
//! but a holder that hangs blocks every waiter on that slot.

use crate::error::{CachetError, CachetResult};
use async_trait::async_trait;
use fs4::FileExt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Exclusive ownership of one slot, released on drop
#[must_use = "the slot is released as soon as the guard is dropped"]
pub struct SlotGuard {
    path: PathBuf,
    _held: Box<dyn Send + Sync>,
}

impl SlotGuard {
    /// Wrap any value whose drop releases the underlying lock
    pub fn new(path: PathBuf, held: impl Send + Sync + 'static) -> Self {
        Self {
            path,
            _held: Box::new(held),
        }
    }

    /// Lock file this guard holds
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the slot now
    pub fn release(self) {
        trace!("Releasing lock {}", self.path.display());
    }
}

/// Named mutual exclusion across cooperating processes
#[async_trait]
pub trait LockCoordinator: Send + Sync {
    /// Block until `lock_path` is exclusively held, creating it if missing
    async fn acquire(&self, lock_path: &Path) -> CachetResult<SlotGuard>;
}

/// [`LockCoordinator`] backed by `flock(2)` on lock files
#[derive(Debug, Default, Clone, Copy)]
pub struct FileLockCoordinator;

impl FileLockCoordinator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LockCoordinator for FileLockCoordinator {
    async fn acquire(&self, lock_path: &Path) -> CachetResult<SlotGuard> {
        let path = lock_path.to_path_buf();
        let lock_err = |path: &Path, source| CachetError::Lock {
            path: path.to_path_buf(),
            source,
        };

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|e| lock_err(&path, e))?;

        debug!("Waiting for lock {}", path.display());

        // lock_exclusive blocks the calling thread for as long as another holder exists
        let held = tokio::task::spawn_blocking(move || loop {
            match FileExt::lock_exclusive(&file) {
                Ok(()) => return Ok(file),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        })
        .await
        .map_err(|e| CachetError::Internal(format!("lock task failed: {}", e)))?
        .map_err(|e| lock_err(&path, e))?;

        debug!("Acquired lock {}", path.display());
        Ok(SlotGuard::new(path, LockedFile(held)))
    }
}

struct LockedFile(File);

impl Drop for LockedFile {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.0);
    }
}
