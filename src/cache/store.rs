use crate::extract::Quote;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur reading or writing the quote cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// No cache file exists yet. Recoverable: triggers a full rebuild.
    #[error("Cache file not found: {path}")]
    Missing { path: PathBuf },

    /// The cache file exists but cannot be decoded. Fatal upstream: a
    /// damaged cache is kept distinct from a missing one so corruption is
    /// never papered over by a silent rebuild.
    #[error("Cache file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The collection could not be encoded to JSON
    #[error("Failed to encode cache: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Durable store for the quote collection
///
/// One JSON file at a fixed path, holding the full collection as an array
/// of `{author, book, poetry}` objects, indented for human inspection.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    /// Creates a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes the full collection to the backing file
    ///
    /// Any prior content is fully replaced. The JSON is written to a
    /// temporary sibling first and renamed over the target, so a crash
    /// mid-write cannot leave a partial file behind.
    ///
    /// # Arguments
    ///
    /// * `quotes` - The collection to persist
    pub fn save(&self, quotes: &[Quote]) -> CacheResult<()> {
        let json = serde_json::to_string_pretty(quotes).map_err(CacheError::Encode)?;

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(
            "Saved {} quotes to {}",
            quotes.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Reads and deserializes the backing file
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Quote>)` - The decoded collection (possibly empty)
    /// * `Err(CacheError::Missing)` - No file at the store path
    /// * `Err(CacheError::Corrupt)` - File present but undecodable
    /// * `Err(CacheError::Io)` - Any other read failure
    pub fn load(&self) -> CacheResult<Vec<Quote>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CacheError::Missing {
                    path: self.path.clone(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|source| CacheError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}
