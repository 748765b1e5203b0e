//! Persistence of the last observed IP information.
//!
//! The monitor keeps exactly one document: the last successful fetch.
//! There is no history and no locking; concurrent runs race and the last
//! writer wins.

mod file;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::{FileStateStore, default_cache_path};

use std::io;

use serde::Deserialize;
use thiserror::Error;

use crate::api::IpInfo;

/// The part of a cached document the monitor compares against.
///
/// Only `ip` is read back. The rest of the cache is whatever the API
/// returned last time and may have missing or `null` fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CachedIp {
    pub ip: String,
}

/// Result of loading the cached document.
///
/// Explicitly models all valid states:
/// - A previously saved address
/// - No cache yet (first run)
/// - A cache that exists but cannot be used
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResult {
    /// Successfully loaded the previous address.
    Loaded(CachedIp),

    /// No cache file exists (first run or explicitly deleted).
    NotFound,

    /// Cache file exists but could not be read or has no usable `ip`.
    /// Treated as having no baseline; the next save overwrites it.
    Corrupted {
        /// Reason for corruption (for logging/debugging).
        reason: String,
    },
}

/// Errors that can occur while writing the cache.
///
/// Read-side issues are modeled as [`LoadResult`] variants instead.
#[derive(Debug, Error)]
pub enum StateError {
    /// Failed to write the cache file.
    #[error("Failed to write cache file: {0}")]
    Write(#[source] io::Error),

    /// Failed to serialize the document to JSON.
    #[error("Failed to serialize cache: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The blocking write task did not complete.
    #[error("Cache write task failed: {0}")]
    Task(String),
}

/// Storage for the last observed document.
///
/// Implementations should:
/// - Return `LoadResult::NotFound` when nothing was saved yet
/// - Degrade to `LoadResult::Corrupted` on read errors or a missing `ip`
/// - Replace the previous document in full on save
pub trait StateStore: Send + Sync {
    /// Loads the previously saved document.
    fn load(&self) -> LoadResult;

    /// Replaces the saved document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn save(
        &self,
        info: &IpInfo,
    ) -> impl std::future::Future<Output = Result<(), StateError>> + Send;
}
