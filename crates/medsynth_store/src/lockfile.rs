//! Cross-process advisory lock built on an exclusively created marker file.
//!
//! Every writer that appends to a comment log creates `<log>.lock` with
//! `create_new` before reading the current count, and removes it afterwards.
//! A marker older than `stale_after` is assumed to belong to a crashed
//! process and is reclaimed.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::error::{Result, StoreError};

const RETRY_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Copy)]
pub struct LockPolicy {
    /// How long to keep retrying before giving up.
    pub wait: Duration,
    /// Age past which an existing marker is removed.
    pub stale_after: Duration,
}

impl Default for LockPolicy {
    fn default() -> Self {
        Self {
            wait: Duration::from_secs(5),
            stale_after: Duration::from_secs(30),
        }
    }
}

/// Held lock; the marker is removed on drop.
#[derive(Debug)]
pub struct FileLock {
    path: PathBuf,
}

impl FileLock {
    pub async fn acquire(path: &Path, policy: LockPolicy) -> Result<FileLock> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let deadline = tokio::time::Instant::now() + policy.wait;
        loop {
            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(path)
                .await
            {
                Ok(_) => {
                    return Ok(FileLock {
                        path: path.to_path_buf(),
                    })
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
                Err(e) => return Err(e.into()),
            }

            if is_stale(path, policy.stale_after).await {
                tracing::warn!("Removing stale lock {}", path.display());
                match tokio::fs::remove_file(path).await {
                    Ok(()) => continue,
                    Err(e) if e.kind() == ErrorKind::NotFound => continue,
                    Err(e) => return Err(e.into()),
                }
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(StoreError::LockTimeout(path.display().to_string()));
            }
            tokio::time::sleep(RETRY_INTERVAL).await;
        }
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!("Failed to release lock {}: {}", self.path.display(), e);
            }
        }
    }
}

async fn is_stale(path: &Path, stale_after: Duration) -> bool {
    let modified = match tokio::fs::metadata(path).await.and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(_) => return false,
    };
    SystemTime::now()
        .duration_since(modified)
        .map(|age| age > stale_after)
        .unwrap_or(false)
}
