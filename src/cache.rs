//! Time-to-live file cache shared by every fetcher.
//!
//! Each logical key (a doc page path, the gallery, a notebook path) maps to one
//! markdown or JSON file under the cache root. Freshness is judged purely by file
//! modification time; stale files are never swept, only overwritten by the next
//! successful fetch.

use crate::error::Result;
use anyhow::Context;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};

/// File name of the cached gallery index.
pub const GALLERY_FILE: &str = "_gallery.json";
/// Subdirectory holding extracted notebooks.
pub const EXAMPLES_DIR: &str = "examples";

/// Distinguishes temp files written concurrently by the same process.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
    ttl: Duration,
}

impl CacheStore {
    pub fn new(root: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            root: root.into(),
            ttl,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a page path like `/d3-scale/linear` to `<root>/d3-scale/linear.md`.
    ///
    /// Leading separators are stripped, so `/x` and `x` share an entry. Keys with
    /// empty, `.` or `..` segments have no entry and yield `None`.
    pub fn path_for(&self, key: &str) -> Option<PathBuf> {
        let relative = relative_entry(key.trim_start_matches('/'))?;
        Some(self.root.join(relative))
    }

    /// Map a notebook path like `@d3/bar-chart/2` to `<root>/examples/d3/bar-chart/2.md`.
    pub fn notebook_path_for(&self, path: &str) -> Option<PathBuf> {
        let relative = relative_entry(path.trim_start_matches(['@', '/']))?;
        Some(self.root.join(EXAMPLES_DIR).join(relative))
    }

    /// Location of the single gallery index entry.
    pub fn gallery_path(&self) -> PathBuf {
        self.root.join(GALLERY_FILE)
    }

    /// True iff the file exists and was last written less than one TTL ago.
    ///
    /// A modification time in the future counts as fresh.
    pub async fn is_fresh(&self, path: &Path) -> bool {
        let Ok(metadata) = tokio::fs::metadata(path).await else {
            return false;
        };
        let Ok(modified) = metadata.modified() else {
            return false;
        };
        match SystemTime::now().duration_since(modified) {
            Ok(age) => age < self.ttl,
            Err(_) => true,
        }
    }

    /// Read a cached entry. Callers check [`is_fresh`](Self::is_fresh) first.
    pub async fn read(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read cache entry {}", path.display()))
    }

    /// Return the entry's content if it is fresh, otherwise `None`.
    pub async fn read_fresh(&self, path: &Path) -> Option<String> {
        if !self.is_fresh(path).await {
            return None;
        }
        match self.read(path).await {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::warn!("Ignoring unreadable cache entry: {:#}", e);
                None
            }
        }
    }

    /// Store content, creating parent directories as needed.
    ///
    /// Content goes to a sibling temp file first and is renamed into place, so a
    /// concurrent reader sees either the old entry or the new one, never a partial write.
    pub async fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let temp = temp_sibling(path);
        tokio::fs::write(&temp, content)
            .await
            .with_context(|| format!("Failed to write {}", temp.display()))?;

        if let Err(e) = tokio::fs::rename(&temp, path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e)
                .with_context(|| format!("Failed to move cache entry into {}", path.display()));
        }
        Ok(())
    }
}

/// `a/b` → `a/b.md`, provided every segment is a plain file name.
fn relative_entry(key: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for segment in key.split('/') {
        let mut parts = Path::new(segment).components();
        match (parts.next(), parts.next()) {
            (Some(Component::Normal(part)), None) => relative.push(part),
            _ => return None,
        }
    }
    let mut file = relative.into_os_string();
    file.push(".md");
    Some(PathBuf::from(file))
}

fn temp_sibling(path: &Path) -> PathBuf {
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.{}.tmp", name, std::process::id(), n))
}
