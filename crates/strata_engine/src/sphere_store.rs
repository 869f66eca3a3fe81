//! Sphere configuration store
//!
//! Sphere configs are fetched out-of-band from a collaborator-provided
//! source, cached for the session, and deduplicated so at most one request
//! per sphere is in flight. Callers await [`SphereConfigStore::load`] before
//! the first resolution against a sphere; [`SphereConfigStore::is_loading`]
//! exposes the in-flight flag.

use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex};
use strata_core::{SphereConfig, SphereConfigError};
use tokio::sync::OnceCell;

/// Collaborator-side config fetch. Implementations are free to hit the
/// network, disk, or a fixture map; the store never cares.
pub trait SphereConfigSource: Send + Sync {
    fn fetch(
        &self,
        sphere_id: &str,
    ) -> impl std::future::Future<Output = Result<SphereConfig, SphereConfigError>> + Send;
}

type Entry = Arc<OnceCell<Arc<SphereConfig>>>;

/// Caching, deduplicating front of a [`SphereConfigSource`]
pub struct SphereConfigStore<S> {
    source: S,
    entries: Mutex<FxHashMap<String, Entry>>,
}

impl<S: SphereConfigSource> SphereConfigStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries: Mutex::new(FxHashMap::default()),
        }
    }

    /// Load a sphere config, reusing the cache and any in-flight request.
    ///
    /// Concurrent callers for the same sphere share one fetch. A failed
    /// fetch is not cached; the next call retries.
    pub async fn load(&self, sphere_id: &str) -> Result<Arc<SphereConfig>, SphereConfigError> {
        let entry = self.entry(sphere_id);

        let result = entry
            .get_or_try_init(|| async {
                tracing::debug!(sphere = %sphere_id, "fetching sphere config");
                self.source.fetch(sphere_id).await.map(Arc::new)
            })
            .await
            .cloned();

        if result.is_err() {
            // Drop the failed entry so is_loading() clears and a later call
            // can retry with a fresh cell.
            let mut entries = self.entries.lock().unwrap();
            if entries.get(sphere_id).is_some_and(|e| e.get().is_none()) {
                entries.remove(sphere_id);
            }
        }
        result
    }

    /// Already-loaded config, if any
    pub fn get_cached(&self, sphere_id: &str) -> Option<Arc<SphereConfig>> {
        self.entries
            .lock()
            .unwrap()
            .get(sphere_id)
            .and_then(|e| e.get().cloned())
    }

    /// True while a fetch for this sphere is in flight
    pub fn is_loading(&self, sphere_id: &str) -> bool {
        self.entries
            .lock()
            .unwrap()
            .get(sphere_id)
            .is_some_and(|e| e.get().is_none())
    }

    /// Forget a cached config (e.g. after a sphere settings change)
    pub fn invalidate(&self, sphere_id: &str) {
        self.entries.lock().unwrap().remove(sphere_id);
    }

    /// Forget everything (session teardown)
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    fn entry(&self, sphere_id: &str) -> Entry {
        let mut entries = self.entries.lock().unwrap();
        entries
            .entry(sphere_id.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FixtureSource {
        fetches: AtomicUsize,
    }

    impl FixtureSource {
        fn new() -> Self {
            Self {
                fetches: AtomicUsize::new(0),
            }
        }
    }

    impl SphereConfigSource for FixtureSource {
        async fn fetch(&self, sphere_id: &str) -> Result<SphereConfig, SphereConfigError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            match sphere_id {
                "missing" => Err(SphereConfigError::NotFound {
                    sphere_id: sphere_id.to_string(),
                }),
                _ => Ok(SphereConfig::new(sphere_id)),
            }
        }
    }

    #[tokio::test]
    async fn test_load_caches() {
        let store = SphereConfigStore::new(FixtureSource::new());
        let a = store.load("personal").await.unwrap();
        let b = store.load("personal").await.unwrap();
        assert_eq!(a.sphere_id, "personal");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_loads_are_deduplicated() {
        let store = Arc::new(SphereConfigStore::new(FixtureSource::new()));
        let (a, b) = tokio::join!(store.load("business"), store.load("business"));
        assert!(a.is_ok() && b.is_ok());
        assert_eq!(store.source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_loading_flag() {
        let store = Arc::new(SphereConfigStore::new(FixtureSource::new()));
        assert!(!store.is_loading("personal"));

        let store_clone = Arc::clone(&store);
        let task = tokio::spawn(async move { store_clone.load("personal").await });
        // Yield until the fetch is underway
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(store.is_loading("personal"));

        task.await.unwrap().unwrap();
        assert!(!store.is_loading("personal"));
        assert!(store.get_cached("personal").is_some());
    }

    #[tokio::test]
    async fn test_failed_load_is_retried() {
        let store = SphereConfigStore::new(FixtureSource::new());
        assert!(store.load("missing").await.is_err());
        assert!(!store.is_loading("missing"));
        assert!(store.load("missing").await.is_err());
        assert_eq!(store.source.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_refetches() {
        let store = SphereConfigStore::new(FixtureSource::new());
        store.load("personal").await.unwrap();
        store.invalidate("personal");
        assert!(store.get_cached("personal").is_none());
        store.load("personal").await.unwrap();
        assert_eq!(store.source.fetches.load(Ordering::SeqCst), 2);
    }
}
