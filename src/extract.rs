//! Archive extraction
//!
//! Extraction runs to completion before returning; a non-zero exit from
//! the tool is an error rather than a half-filled directory.

use crate::error::{CachetError, CachetResult};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Max number of stderr lines kept in an extraction error
const ERROR_TAIL_LINES: usize = 20;

/// Unpacks an archive into an existing directory
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract `archive` into `destination`, waiting for completion
    async fn extract(&self, archive: &Path, destination: &Path) -> CachetResult<()>;
}

/// [`Extractor`] running `tar -xf`
#[derive(Debug, Clone)]
pub struct TarExtractor {
    program: String,
}

impl TarExtractor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for TarExtractor {
    fn default() -> Self {
        Self::new("tar")
    }
}

#[async_trait]
impl Extractor for TarExtractor {
    async fn extract(&self, archive: &Path, destination: &Path) -> CachetResult<()> {
        let mut directory = std::ffi::OsString::from("--directory=");
        directory.push(destination);
        let command = format!(
            "{} -xf {} --directory={}",
            self.program,
            archive.display(),
            destination.display()
        );
        debug!("Executing: {}", command);

        let output = Command::new(&self.program)
            .arg("-xf")
            .arg(archive)
            .arg(&directory)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| CachetError::command_failed(command, e))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let lines: Vec<&str> = stderr.lines().collect();
        let tail = &lines[lines.len().saturating_sub(ERROR_TAIL_LINES)..];
        Err(CachetError::Extraction {
            archive: archive.to_path_buf(),
            reason: format!("{} ({})", tail.join("\n"), output.status),
        })
    }
}
