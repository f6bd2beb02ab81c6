//! Utility functions for directory management and file persistence
//!
//! This module provides helper functions following the XDG Base Directory specification
//! for portable configuration and data storage.
//!
//! # Directory Structure
//!
//! - Data: `~/.local/share/devkit/` - Config and conversion history
//! - State: `~/.local/state/devkit/` - Log file
//!
//! # Example
//!
//! ```
//! use devkit::utils::{get_data_dir, ensure_dirs};
//!
//! // Ensure directories exist before use
//! ensure_dirs().expect("Failed to create directories");
//!
//! if let Some(data_path) = get_data_dir() {
//!     // Load history from data_path
//! }
//! ```

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

pub fn get_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "devkit", "devkit").map(|pd| pd.data_dir().to_path_buf())
}

pub fn get_state_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "devkit", "devkit")
        .and_then(|pd| pd.state_dir().map(std::path::Path::to_path_buf))
}

pub fn ensure_dirs() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::fs::DirBuilder;
        use std::os::unix::fs::DirBuilderExt;

        let mut builder = DirBuilder::new();
        builder.mode(0o700); // User read/write/execute only
        builder.recursive(true);

        if let Some(dir) = get_data_dir() {
            builder.create(dir)?;
        }
        if let Some(dir) = get_state_dir() {
            builder.create(dir)?;
        }
    }

    #[cfg(not(unix))]
    {
        if let Some(dir) = get_data_dir() {
            std::fs::create_dir_all(dir)?;
        }
        if let Some(dir) = get_state_dir() {
            std::fs::create_dir_all(dir)?;
        }
    }

    Ok(())
}

/// Writes `contents` to `path` using an atomic write pattern.
/// 1. Writes to `<path>.tmp` next to the target.
/// 2. Sets restrictive permissions (0o600) before any data is written.
/// 3. Atomically renames to the target path.
///
/// The parent directory is created if missing.
/// The temp file is removed again if any step fails.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let result = write_and_rename(&temp_path, path, contents).await;
    if result.is_err() {
        let _ = tokio::fs::remove_file(&temp_path).await;
    }
    result
}

async fn write_and_rename(temp_path: &Path, path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use tokio::io::AsyncWriteExt;

    #[cfg(unix)]
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .mode(0o600)
        .open(temp_path)
        .await?;

    #[cfg(not(unix))]
    let mut file = tokio::fs::File::create(temp_path).await?;

    file.write_all(contents).await?;
    file.sync_all().await?; // Ensure data is flushed to physical media
    drop(file);

    tokio::fs::rename(temp_path, path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::StorageFull {
            std::io::Error::new(
                std::io::ErrorKind::StorageFull,
                "Disk full: cannot save file. Free up space and try again.",
            )
        } else {
            e
        }
    })
}

/// Reads a JSON document, falling back to `T::default()`.
///
/// A missing file is silent. Read and parse failures are logged with `what`
/// naming the document.
pub async fn load_json_or_default<T>(path: &Path, what: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let json = match tokio::fs::read_to_string(path).await {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
        Err(e) => {
            tracing::warn!("Failed to read {what} {}: {e}", path.display());
            return T::default();
        }
    };

    serde_json::from_str(&json).unwrap_or_else(|e| {
        tracing::warn!("Failed to parse {what} {}: {e}", path.display());
        T::default()
    })
}

/// Removes a file. A file that does not exist is not an error.
pub async fn remove_file_if_exists(path: &Path) -> std::io::Result<()> {
    match tokio::fs::remove_file(path).await {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// Truncates a string to a maximum length and adds an ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        // Find the nearest character boundary to avoid splitting multi-byte characters
        let end = s
            .char_indices()
            .map(|(idx, _)| idx)
            .take_while(|&idx| idx <= max_len.saturating_sub(3))
            .last()
            .unwrap_or(0);
        format!("{}...", &s[..end])
    }
}
