//! Streaming content digests for staleness checks
//!
//! Both sides of a comparison are hashed chunk by chunk so neither the
//! remote resource nor the cached copy is ever held in memory at once.

use crate::error::{CachetError, CachetResult};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Bytes read from a stream per hash update
pub const HASH_CHUNK_SIZE: usize = 64 * 1024;

/// Supported content hash algorithms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DigestAlgorithm {
    /// SHA-1, matching caches written by older tooling
    Sha1,
    /// SHA-256
    #[default]
    Sha256,
}

impl FromStr for DigestAlgorithm {
    type Err = CachetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            _ => Err(CachetError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
        };
        write!(f, "{}", name)
    }
}

/// Final digest of a content stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDigest(Vec<u8>);

impl ContentDigest {
    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

enum Hasher {
    Sha1(Sha1),
    Sha256(Sha256),
}

impl Hasher {
    fn new(algorithm: DigestAlgorithm) -> Self {
        match algorithm {
            DigestAlgorithm::Sha1 => Self::Sha1(Sha1::new()),
            DigestAlgorithm::Sha256 => Self::Sha256(Sha256::new()),
        }
    }

    fn update(&mut self, chunk: &[u8]) {
        match self {
            Self::Sha1(h) => h.update(chunk),
            Self::Sha256(h) => h.update(chunk),
        }
    }

    fn finish(self) -> ContentDigest {
        match self {
            Self::Sha1(h) => ContentDigest(h.finalize().to_vec()),
            Self::Sha256(h) => ContentDigest(h.finalize().to_vec()),
        }
    }
}

/// Hash `reader` until EOF
///
/// Only the bytes actually returned by each read are fed to the hasher,
/// so a short final chunk never picks up leftovers from the previous one.
pub async fn hash_reader<R>(
    algorithm: DigestAlgorithm,
    reader: &mut R,
) -> std::io::Result<ContentDigest>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut hasher = Hasher::new(algorithm);
    let mut buf = vec![0u8; HASH_CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hasher.finish())
}

/// Hash a local file
pub async fn hash_file(
    algorithm: DigestAlgorithm,
    path: &std::path::Path,
) -> CachetResult<ContentDigest> {
    let context = || format!("hashing {}", path.display());
    let mut file = tokio::fs::File::open(path)
        .await
        .map_err(|e| CachetError::io(context(), e))?;
    hash_reader(algorithm, &mut file)
        .await
        .map_err(|e| CachetError::io(context(), e))
}
