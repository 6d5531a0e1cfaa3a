//! Single-slot cache for an API root resource.
//!
//! A [`RootCache`] holds at most one [`RootResourceObject`]. Clones share the
//! same slot, so a factory can hand the cache to every client it creates.
//!
//! # Concurrency
//!
//! [`RootCache::get_or_fetch`] runs the fetch at most once: concurrent first
//! callers wait for the running fetch and all receive its result. A failed
//! fetch leaves the slot empty and the next caller tries again.

use crate::error::Result;
use crate::types::RootResourceObject;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Shared, lazily filled slot for a root resource.
#[derive(Debug, Clone, Default)]
pub struct RootCache {
    slot: Arc<OnceCell<Arc<RootResourceObject>>>,
}

impl RootCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached root, if one has been fetched.
    pub fn get(&self) -> Option<Arc<RootResourceObject>> {
        self.slot.get().cloned()
    }

    /// Whether the slot is filled.
    pub fn is_filled(&self) -> bool {
        self.slot.initialized()
    }

    /// Return the cached root, running `fetch` to fill the slot if empty.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<Arc<RootResourceObject>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<RootResourceObject>>,
    {
        if let Some(root) = self.get() {
            tracing::debug!("root resource cache hit");
            return Ok(root);
        }

        let root = self
            .slot
            .get_or_try_init(move || async move {
                tracing::debug!("root resource cache miss, fetching");
                fetch().await.map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(root))
    }
}
