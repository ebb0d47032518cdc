//! Extraction directories derived from cached tarballs
//!
//! The directory next to a cached archive is rebuilt whenever the archive
//! was just refreshed or the directory is missing, and trusted otherwise.
//! The archive's slot lock stays held until extraction finishes so no two
//! processes rebuild the same directory at once.

use crate::cache::entry::CacheEntryManager;
use crate::error::{CachetError, CachetResult};
use crate::extract::Extractor;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

/// A cached tarball together with its extraction directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionEntry {
    /// Cached archive
    pub archive_local_path: PathBuf,
    /// Directory holding the unpacked archive
    pub extraction_dir: PathBuf,
    /// Directory matches the current archive content
    pub valid: bool,
    /// Whether this call deleted and re-extracted the directory
    pub rebuilt: bool,
}

/// Manages extraction directories on top of a [`CacheEntryManager`]
pub struct TarballExpander {
    entries: CacheEntryManager,
    extractor: Arc<dyn Extractor>,
}

impl TarballExpander {
    pub fn new(entries: CacheEntryManager, extractor: Arc<dyn Extractor>) -> Self {
        Self { entries, extractor }
    }

    /// Fetch the tarball `identifier` and make sure its extraction directory is current
    pub async fn ensure_extracted(&self, identifier: &str) -> CachetResult<ExtractionEntry> {
        let (entry, guard) = self.entries.ensure_local_held(identifier).await?;
        let extraction_dir = self.entries.root().slot(identifier).extraction_dir;

        let present = fs::try_exists(&extraction_dir).await.map_err(|e| {
            CachetError::io(format!("checking {}", extraction_dir.display()), e)
        })?;

        let rebuilt = entry.updated || !present;
        if rebuilt {
            self.rebuild(&entry.local_path, &extraction_dir, present)
                .await?;
        } else {
            debug!("Reusing extraction directory {}", extraction_dir.display());
        }

        guard.release();
        Ok(ExtractionEntry {
            archive_local_path: entry.local_path,
            extraction_dir,
            valid: true,
            rebuilt,
        })
    }

    async fn rebuild(&self, archive: &Path, dir: &Path, present: bool) -> CachetResult<()> {
        if present {
            fs::remove_dir_all(dir).await.map_err(|e| {
                CachetError::io(format!("deleting old directory {}", dir.display()), e)
            })?;
        }

        fs::create_dir(dir)
            .await
            .map_err(|e| CachetError::io(format!("creating directory {}", dir.display()), e))?;

        if let Err(e) = self.extractor.extract(archive, dir).await {
            // A half-filled directory must not be trusted by the next caller
            if let Err(cleanup) = fs::remove_dir_all(dir).await {
                warn!("Failed to remove partial extraction {}: {}", dir.display(), cleanup);
            }
            return Err(e);
        }

        info!("Extracted {} to {}", archive.display(), dir.display());
        Ok(())
    }
}
