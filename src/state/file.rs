//! File-based cache implementation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::api::IpInfo;

use super::{CachedIp, LoadResult, StateError, StateStore};

/// File name of the cache inside the temporary directory.
pub const CACHE_FILE_NAME: &str = "myip_current.json";

/// Default cache location: `<temp dir>/myip_current.json`.
#[must_use]
pub fn default_cache_path() -> PathBuf {
    std::env::temp_dir().join(CACHE_FILE_NAME)
}

/// File-based implementation of [`StateStore`].
///
/// The file holds the API document as JSON, with no wrapper. Saving writes
/// the fetched document as received; loading reads back only its `ip`.
///
/// # Atomic Writes
///
/// Uses write-to-temp-then-rename:
/// 1. Write to `{path}.tmp`
/// 2. Rename `{path}.tmp` to `{path}`
///
/// A crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    /// Creates a new file-based store at the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the cache file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Performs the blocking save operation.
    ///
    /// Separated out so it can be wrapped in `spawn_blocking`.
    fn save_blocking(path: &Path, content: &[u8]) -> Result<(), StateError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StateError::Write)?;
            }
        }

        // state.json -> state.json.tmp, not state.tmp
        let temp_path = PathBuf::from(format!("{}.tmp", path.display()));

        std::fs::write(&temp_path, content).map_err(StateError::Write)?;
        std::fs::rename(&temp_path, path).map_err(StateError::Write)?;

        Ok(())
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> LoadResult {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return LoadResult::NotFound,
            Err(e) => {
                return LoadResult::Corrupted {
                    reason: format!("Failed to read file: {e}"),
                };
            }
        };

        match serde_json::from_str::<CachedIp>(&content) {
            Ok(cached) if cached.ip.trim().is_empty() => LoadResult::Corrupted {
                reason: "Empty ip".to_string(),
            },
            Ok(cached) => LoadResult::Loaded(cached),
            Err(e) => LoadResult::Corrupted {
                reason: format!("Invalid JSON: {e}"),
            },
        }
    }

    async fn save(&self, info: &IpInfo) -> Result<(), StateError> {
        let path = self.path.clone();
        let content = match info.document() {
            Some(document) => serde_json::to_vec(document),
            None => serde_json::to_vec(info),
        }
        .map_err(StateError::Serialize)?;

        tokio::task::spawn_blocking(move || Self::save_blocking(&path, &content))
            .await
            .map_err(|e| StateError::Task(e.to_string()))?
    }
}
