//! On-disk session store
//!
//! One JSON file per key under the cache directory. Each file records when the
//! session that wrote it ends.

use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// File layout of a stored entry
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
    /// End of the session the entry belongs to
    expires_at: DateTime<Utc>,
}

/// An entry read back from disk
#[derive(Debug)]
pub struct CachedData<T> {
    pub data: T,
    /// When the lookup that produced `data` finished
    pub cached_at: DateTime<Utc>,
    /// The session has ended; callers should fetch again rather than serve `data`
    pub is_expired: bool,
}

/// Session store rooted at a directory
///
/// `new` uses the platform cache directory (`~/.cache/ghcard/` on Linux);
/// `with_dir` roots the store anywhere else.
#[derive(Debug, Clone)]
pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Store in the platform cache directory, or `None` when there is no home directory
    pub fn new() -> Option<Self> {
        ProjectDirs::from("", "", "ghcard").map(|dirs| Self::with_dir(dirs.cache_dir().to_path_buf()))
    }

    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Maps a key onto a file name; anything outside `[A-Za-z0-9_-]` becomes `_`.
    fn cache_path(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.cache_dir.join(format!("{}.json", safe))
    }

    /// Stores `data` under `key` for a session of `ttl_minutes`
    ///
    /// Creates the cache directory on first use. A session length whose end
    /// cannot be represented is rejected with `InvalidInput`.
    pub fn write<T: Serialize>(&self, key: &str, data: &T, ttl_minutes: u64) -> io::Result<()> {
        let cached_at = Utc::now();
        let expires_at = session_end(cached_at, ttl_minutes).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("session of {} minutes is out of range", ttl_minutes),
            )
        })?;

        let entry = CacheEntry {
            data,
            cached_at,
            expires_at,
        };
        let json = serde_json::to_string_pretty(&entry)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        fs::create_dir_all(&self.cache_dir)?;
        fs::write(self.cache_path(key), json)
    }

    /// Loads the entry for `key`
    ///
    /// Missing and unparseable files both read as `None`. Entries from an
    /// ended session still come back, flagged with `is_expired`.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<CachedData<T>> {
        let content = fs::read_to_string(self.cache_path(key)).ok()?;
        let entry: CacheEntry<T> = serde_json::from_str(&content).ok()?;

        Some(CachedData {
            data: entry.data,
            cached_at: entry.cached_at,
            is_expired: Utc::now() > entry.expires_at,
        })
    }

    /// Removes a single entry. Missing entries are not an error.
    pub fn remove(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.cache_path(key)) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    /// Removes every cached entry, returning how many were deleted
    pub fn clear(&self) -> io::Result<usize> {
        let entries = match fs::read_dir(&self.cache_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// `start + minutes`, or `None` on overflow
fn session_end(start: DateTime<Utc>, minutes: u64) -> Option<DateTime<Utc>> {
    let minutes = i64::try_from(minutes).ok()?;
    start.checked_add_signed(Duration::try_minutes(minutes)?)
}
