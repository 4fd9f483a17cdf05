//! Configuration types and validation
//!
//! The configuration surface is supplied by the command-line layer:
//! cached mode on/off, page count for a full cache build, force-rebuild,
//! cache file location, listen port, and selection policy.

mod types;
mod validation;

pub use types::{CacheConfig, Config, ServerConfig, SourceConfig, DEFAULT_LISTING_URL};
pub use validation::validate;
