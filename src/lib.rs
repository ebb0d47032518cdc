//! Cachet - shared local cache for remote files
//!
//! Copies files from a remote distributed filesystem into a per-user cache
//! directory and keeps them there. Parallel worker processes sharing the
//! cache take a per-file lock, so each remote file is copied at most once
//! per change and never written by two processes at the same time.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod remote;

pub use cache::{get_file, get_tarball_as_directory};
pub use error::{CachetError, CachetResult};
