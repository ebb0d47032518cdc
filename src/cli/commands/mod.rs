//! CLI command implementations

pub mod config;
pub mod get;
pub mod path;
pub mod tarball;

pub use config::execute as config;
pub use get::execute as get;
pub use path::execute as path;
pub use tarball::execute as tarball;
