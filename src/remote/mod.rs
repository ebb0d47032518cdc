//! Remote filesystem clients
//!
//! - `hdfs`: the `hdfs dfs` command line client
//! - `mounted`: a remote namespace reachable under a local directory

mod client;
mod factory;
mod hdfs;
mod mounted;

pub use client::{RemoteFs, RemoteStream};
pub use factory::create_remote;
pub use hdfs::HdfsCli;
pub use mounted::MountedFs;
