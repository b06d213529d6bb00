// # File State Store
//
// File-based implementation of StateStore.
//
// ## Purpose
//
// Keeps the last known public IP across runs. The scheduler starts a fresh
// process each time, so this file is the client's only memory.
//
// ## File Format
//
// A single line of UTF-8 text holding the address, no trailing newline.
// Surrounding whitespace is ignored on read:
//
// ```text
// 203.0.113.7
// ```
//
// ## Crash Safety
//
// - Atomic writes: new content goes to a `.tmp` sibling, then is renamed
//   over the cache file
// - A missing file is created empty on first read

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::Error;
use crate::traits::state_store::StateStore;
use crate::types::PublicIp;

/// Default cache file name, relative to the working directory
pub const DEFAULT_CACHE_FILE: &str = "my_public_ip.txt";

/// Single-value file state store
///
/// # Example
///
/// ```rust,no_run
/// use ddns_core::state::FileStateStore;
/// use ddns_core::traits::StateStore;
/// use ddns_core::PublicIp;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = FileStateStore::new("my_public_ip.txt");
///
///     // Empty on first run
///     let cached = store.read_cached_ip().await?;
///     assert!(cached.is_empty());
///
///     store.write_cached_ip(&PublicIp::from("1.2.3.4")).await?;
///     assert_eq!(store.read_cached_ip().await?, PublicIp::from("1.2.3.4"));
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    /// Create a store backed by `path`
    ///
    /// Nothing is touched on disk until the first read or write.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get path to temporary file for atomic writes
    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        PathBuf::from(temp)
    }

    /// Create the parent directory if it doesn't exist
    async fn ensure_parent(&self) -> Result<(), Error> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await.map_err(|e| {
                Error::state_store(format!(
                    "Failed to create cache directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Create an empty cache file
    async fn create_empty(&self) -> Result<(), Error> {
        self.ensure_parent().await?;
        fs::File::create(&self.path).await.map_err(|e| {
            Error::state_store(format!(
                "Failed to create cache file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(())
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn read_cached_ip(&self) -> Result<PublicIp, Error> {
        tracing::info!("Fetching cached public IP");

        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    "Cache file does not exist, creating it: {}",
                    self.path.display()
                );
                self.create_empty().await?;
                String::new()
            }
            Err(e) => {
                return Err(Error::state_store(format!(
                    "Failed to read cache file {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let first_line = content.lines().next().unwrap_or_default().trim();
        if first_line.is_empty() {
            tracing::info!("No cached public IP found");
        }

        Ok(PublicIp::new(first_line))
    }

    async fn write_cached_ip(&self, ip: &PublicIp) -> Result<(), Error> {
        tracing::info!("Updating the local cache");
        self.ensure_parent().await?;

        // Write to temporary file first
        let temp_path = self.temp_path();
        {
            let mut file = fs::File::create(&temp_path).await.map_err(|e| {
                Error::state_store(format!(
                    "Failed to create temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.write_all(ip.as_str().as_bytes()).await.map_err(|e| {
                Error::state_store(format!(
                    "Failed to write to temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.flush().await.map_err(|e| {
                Error::state_store(format!(
                    "Failed to flush temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
        }

        // Atomic rename (temp -> actual)
        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            Error::state_store(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::info!("Cached IP updated successfully");
        Ok(())
    }
}
