//! Catalog cache storage.
//!
//! The persisted catalog is a process-wide mutable resource, so it sits
//! behind an injected [`CatalogStore`] trait rather than a global file
//! path. Writers are serialized; readers never block on a writer and
//! never observe a torn write (new state is written to a temporary file
//! and atomically renamed into place).
//!
//! Missing, unreadable, or expired state is [`CacheState::Stale`] -
//! never an error. Callers react to `Stale` by fetching fresh data and
//! calling `set`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::models::{Assessment, CacheEnvelope};

/// Result of a cache read.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheState {
    /// Catalog is present and within TTL.
    Fresh(Vec<Assessment>),
    /// Absent, corrupt, or expired - caller must refresh.
    Stale,
}

/// An envelope is fresh strictly within the TTL window; at exactly
/// `now - timestamp == ttl` it is stale.
pub fn is_fresh(timestamp: i64, now: i64, ttl_secs: u64) -> bool {
    now - timestamp < ttl_secs as i64
}

fn epoch_now() -> i64 {
    Utc::now().timestamp()
}

/// Catalog cache store.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// The catalog when fresh, `Stale` otherwise.
    async fn get(&self) -> CacheState;

    /// Replace the persisted catalog wholesale, stamped with the
    /// current time.
    async fn set(&self, assessments: Vec<Assessment>) -> Result<()>;

    /// Remove persisted state so the next `get` is `Stale`.
    async fn invalidate(&self) -> Result<()>;

    /// Raw persisted envelope regardless of freshness.
    async fn load(&self) -> Option<CacheEnvelope>;

    /// Persist an envelope as-is, timestamp included.
    async fn replace(&self, envelope: CacheEnvelope) -> Result<()>;

    /// Rewrite the persisted envelope in place, holding the write lock
    /// across the read and the write so a concurrent `set` can never be
    /// overwritten by a stale pre-read copy. `apply` returns how many
    /// records it changed; the envelope (timestamp untouched) is only
    /// written back when that count is non-zero. Absent state is a
    /// no-op returning 0.
    async fn update(
        &self,
        apply: Box<dyn for<'a> FnOnce(&'a mut CacheEnvelope) -> usize + Send>,
    ) -> Result<usize>;
}

// =============================================================================
// File-backed store
// =============================================================================

/// JSON-file-backed catalog store.
pub struct FileCatalogStore {
    path: PathBuf,
    ttl_secs: u64,
    write_lock: Mutex<()>,
}

impl FileCatalogStore {
    /// Open a store at the given path. The file itself may not exist
    /// yet; the first `set` creates it.
    pub fn open(path: impl Into<PathBuf>, ttl_secs: u64) -> Self {
        Self {
            path: path.into(),
            ttl_secs,
            write_lock: Mutex::new(()),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    async fn read_envelope(path: &Path) -> Option<CacheEnvelope> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No cache file present");
                return None;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read cache file");
                return None;
            }
        };

        match serde_json::from_slice::<CacheEnvelope>(&bytes) {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cache file corrupt, treating as stale");
                None
            }
        }
    }

    /// Write to a temporary file and atomically rename into place.
    async fn write_envelope(&self, envelope: &CacheEnvelope) -> Result<()> {
        let json = serde_json::to_vec(envelope).context("Failed to serialize cache envelope")?;
        let tmp = self.tmp_path();

        tokio::fs::write(&tmp, &json)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to move cache into place at {}", self.path.display()))
    }
}

#[async_trait]
impl CatalogStore for FileCatalogStore {
    async fn get(&self) -> CacheState {
        match Self::read_envelope(&self.path).await {
            Some(envelope) if is_fresh(envelope.timestamp, epoch_now(), self.ttl_secs) => {
                CacheState::Fresh(envelope.assessments)
            }
            Some(_) => {
                debug!("Cache expired");
                CacheState::Stale
            }
            None => CacheState::Stale,
        }
    }

    async fn set(&self, assessments: Vec<Assessment>) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        // Stamped under the lock so concurrent sets commit in timestamp order
        let envelope = CacheEnvelope {
            timestamp: epoch_now(),
            assessments,
        };
        self.write_envelope(&envelope).await
    }

    async fn invalidate(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove {}", self.path.display()))
            }
        }
    }

    async fn load(&self) -> Option<CacheEnvelope> {
        Self::read_envelope(&self.path).await
    }

    async fn replace(&self, envelope: CacheEnvelope) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write_envelope(&envelope).await
    }

    async fn update(
        &self,
        apply: Box<dyn for<'a> FnOnce(&'a mut CacheEnvelope) -> usize + Send>,
    ) -> Result<usize> {
        let _guard = self.write_lock.lock().await;
        let Some(mut envelope) = Self::read_envelope(&self.path).await else {
            return Ok(0);
        };

        let changed = apply(&mut envelope);
        if changed > 0 {
            self.write_envelope(&envelope).await?;
        }
        Ok(changed)
    }
}

// =============================================================================
// In-memory store (tests and development)
// =============================================================================

/// In-memory catalog store. Data is lost on restart; useful for tests.
pub struct MemoryCatalogStore {
    envelope: RwLock<Option<CacheEnvelope>>,
    ttl_secs: u64,
}

impl MemoryCatalogStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            envelope: RwLock::new(None),
            ttl_secs,
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn get(&self) -> CacheState {
        match self.envelope.read().unwrap().as_ref() {
            Some(envelope) if is_fresh(envelope.timestamp, epoch_now(), self.ttl_secs) => {
                CacheState::Fresh(envelope.assessments.clone())
            }
            _ => CacheState::Stale,
        }
    }

    async fn set(&self, assessments: Vec<Assessment>) -> Result<()> {
        let mut slot = self.envelope.write().unwrap();
        *slot = Some(CacheEnvelope {
            timestamp: epoch_now(),
            assessments,
        });
        Ok(())
    }

    async fn invalidate(&self) -> Result<()> {
        *self.envelope.write().unwrap() = None;
        Ok(())
    }

    async fn load(&self) -> Option<CacheEnvelope> {
        self.envelope.read().unwrap().clone()
    }

    async fn replace(&self, envelope: CacheEnvelope) -> Result<()> {
        *self.envelope.write().unwrap() = Some(envelope);
        Ok(())
    }

    async fn update(
        &self,
        apply: Box<dyn for<'a> FnOnce(&'a mut CacheEnvelope) -> usize + Send>,
    ) -> Result<usize> {
        let mut slot = self.envelope.write().unwrap();
        match slot.as_mut() {
            Some(envelope) => Ok(apply(envelope)),
            None => Ok(0),
        }
    }
}
