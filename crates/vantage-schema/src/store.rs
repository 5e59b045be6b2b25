//! # The Schema Store
//!
//! [`SchemaStore`] resolves resource identifiers to parsed, compiled
//! [`Schema`]s through the host's [`ResourceLoader`], caching each schema
//! for the life of the process. Schemas are build-time assets, so there
//! is no invalidation path: a cached entry is final.
//!
//! ## Single Parse Per Identifier
//!
//! Concurrent first loads of one identifier collapse into a single
//! fetch-and-parse (singleflight). Every caller that arrived while the
//! parse was in flight shares its outcome, success or failure. Failures
//! are shared but not cached: a later `load` for the same identifier
//! starts a fresh fetch, which is how a caller retries after fixing a
//! resource.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use tracing::debug;

use vantage_core::{ResourceError, ResourceId, ResourceLoader};

use crate::error::SchemaError;
use crate::schema::Schema;

/// One cache slot per resource identifier. The `OnceLock` is the
/// singleflight point: the first caller to reach an empty slot runs the
/// fetch-and-parse, everyone else blocks on it and shares the outcome.
type Slot = Arc<OnceLock<Result<Schema, SchemaError>>>;

/// Process-wide cache of parsed schemas, keyed by resource identifier.
///
/// Never returns two distinct [`Schema`] instances for one identifier:
/// every successful `load` of the same id yields handles to the same
/// parsed document (observable via [`Schema::same_instance`]).
pub struct SchemaStore {
    loader: Arc<dyn ResourceLoader>,
    slots: Mutex<HashMap<ResourceId, Slot>>,
}

impl SchemaStore {
    /// Create an empty store backed by the host's resource loader.
    pub fn new(loader: Arc<dyn ResourceLoader>) -> Self {
        Self {
            loader,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Load the schema for a resource identifier, parsing at most once.
    ///
    /// A cache hit returns the existing instance without re-parsing. On a
    /// miss, exactly one caller fetches and parses; concurrent callers
    /// for the same identifier wait and share the result.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ResourceNotFound`] when the loader cannot
    /// resolve the identifier and [`SchemaError::Parse`] when the content
    /// is malformed. Neither outcome is cached.
    pub fn load(&self, id: &ResourceId) -> Result<Schema, SchemaError> {
        let slot = {
            let mut slots = self.slots.lock();
            slots.entry(id.clone()).or_default().clone()
        };

        let outcome = slot.get_or_init(|| self.fetch_and_parse(id));

        if outcome.is_err() {
            // Evict the failed slot so the next load retries. Only the
            // exact slot is removed: a concurrent retry may already have
            // installed a fresh one.
            let mut slots = self.slots.lock();
            if slots.get(id).is_some_and(|current| Arc::ptr_eq(current, &slot)) {
                slots.remove(id);
            }
        }

        outcome.clone()
    }

    /// Whether a schema for this identifier is already cached.
    pub fn cached(&self, id: &ResourceId) -> bool {
        self.slots
            .lock()
            .get(id)
            .is_some_and(|slot| matches!(slot.get(), Some(Ok(_))))
    }

    /// Number of successfully cached schemas.
    pub fn cached_count(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| matches!(slot.get(), Some(Ok(_))))
            .count()
    }

    fn fetch_and_parse(&self, id: &ResourceId) -> Result<Schema, SchemaError> {
        debug!(resource = %id, "loading schema resource");
        let bytes = self.loader.fetch(id).map_err(|e| match e {
            ResourceError::NotFound { resource } => SchemaError::ResourceNotFound {
                resource,
                reason: "identifier does not resolve".to_string(),
            },
            ResourceError::Io { resource, reason } => {
                SchemaError::ResourceNotFound { resource, reason }
            }
        })?;
        let schema = Schema::parse(id.clone(), &bytes)?;
        debug!(resource = %id, "schema parsed and cached");
        Ok(schema)
    }
}

impl std::fmt::Debug for SchemaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaStore")
            .field("cached_count", &self.cached_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use vantage_core::StaticResources;

    const OBJECT_SCHEMA: &[u8] = br#"{"type":"object"}"#;

    /// Wraps a loader and counts how many fetches reach it.
    struct CountingLoader<L> {
        inner: L,
        fetches: AtomicUsize,
    }

    impl<L: ResourceLoader> CountingLoader<L> {
        fn new(inner: L) -> Self {
            Self {
                inner,
                fetches: AtomicUsize::new(0),
            }
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    impl<L: ResourceLoader> ResourceLoader for CountingLoader<L> {
        fn fetch(&self, id: &ResourceId) -> Result<Vec<u8>, ResourceError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch(id)
        }
    }

    /// Fails the first `failures` fetches, then delegates.
    struct FlakyLoader<L> {
        inner: L,
        failures: AtomicUsize,
    }

    impl<L: ResourceLoader> ResourceLoader for FlakyLoader<L> {
        fn fetch(&self, id: &ResourceId) -> Result<Vec<u8>, ResourceError> {
            if self.failures.load(Ordering::SeqCst) > 0 {
                self.failures.fetch_sub(1, Ordering::SeqCst);
                return Err(ResourceError::Io {
                    resource: id.clone(),
                    reason: "bundle still unpacking".to_string(),
                });
            }
            self.inner.fetch(id)
        }
    }

    #[test]
    fn test_load_parses_and_caches() {
        let loader = Arc::new(CountingLoader::new(
            StaticResources::new().with("viewer.props.json", OBJECT_SCHEMA.to_vec()),
        ));
        let store = SchemaStore::new(loader.clone());
        let id = ResourceId::new("viewer.props.json");

        let first = store.load(&id).unwrap();
        let second = store.load(&id).unwrap();

        assert!(first.same_instance(&second));
        assert_eq!(loader.fetch_count(), 1);
        assert!(store.cached(&id));
        assert_eq!(store.cached_count(), 1);
    }

    #[test]
    fn test_distinct_ids_are_distinct_instances() {
        let loader = Arc::new(
            StaticResources::new()
                .with("a.props.json", OBJECT_SCHEMA.to_vec())
                .with("b.props.json", OBJECT_SCHEMA.to_vec()),
        );
        let store = SchemaStore::new(loader);

        let a = store.load(&ResourceId::new("a.props.json")).unwrap();
        let b = store.load(&ResourceId::new("b.props.json")).unwrap();
        assert!(!a.same_instance(&b));
        assert_eq!(store.cached_count(), 2);
    }

    #[test]
    fn test_missing_resource_is_resource_not_found() {
        let store = SchemaStore::new(Arc::new(StaticResources::new()));
        let err = store.load(&ResourceId::new("absent.props.json")).unwrap_err();
        assert!(matches!(err, SchemaError::ResourceNotFound { .. }));
        assert!(!store.cached(&ResourceId::new("absent.props.json")));
    }

    #[test]
    fn test_parse_failure_is_not_cached() {
        let loader = Arc::new(CountingLoader::new(
            StaticResources::new().with("broken.props.json", b"not json".to_vec()),
        ));
        let store = SchemaStore::new(loader.clone());
        let id = ResourceId::new("broken.props.json");

        assert!(matches!(
            store.load(&id).unwrap_err(),
            SchemaError::Parse { .. }
        ));
        assert!(matches!(
            store.load(&id).unwrap_err(),
            SchemaError::Parse { .. }
        ));
        // Each failed load re-fetched; nothing was cached.
        assert_eq!(loader.fetch_count(), 2);
        assert_eq!(store.cached_count(), 0);
    }

    #[test]
    fn test_failed_load_is_retryable_after_fix() {
        let loader = Arc::new(FlakyLoader {
            inner: StaticResources::new().with("late.props.json", OBJECT_SCHEMA.to_vec()),
            failures: AtomicUsize::new(1),
        });
        let store = SchemaStore::new(loader);
        let id = ResourceId::new("late.props.json");

        assert!(store.load(&id).is_err());
        let schema = store.load(&id).unwrap();
        assert!(store.cached(&id));
        assert!(store.load(&id).unwrap().same_instance(&schema));
    }

    #[test]
    fn test_load_from_bundle_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("viewer.props.json"), OBJECT_SCHEMA).unwrap();

        let store = SchemaStore::new(Arc::new(vantage_core::DirResources::new(dir.path())));
        let schema = store.load(&ResourceId::new("viewer.props.json")).unwrap();
        assert_eq!(schema.document()["type"], "object");
    }

    #[test]
    fn test_concurrent_loads_share_one_parse() {
        let loader = Arc::new(CountingLoader::new(
            StaticResources::new().with("shared.props.json", OBJECT_SCHEMA.to_vec()),
        ));
        let store = Arc::new(SchemaStore::new(loader.clone()));
        let id = ResourceId::new("shared.props.json");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let id = id.clone();
                std::thread::spawn(move || store.load(&id).unwrap())
            })
            .collect();

        let schemas: Vec<Schema> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(loader.fetch_count(), 1);
        for schema in &schemas[1..] {
            assert!(schema.same_instance(&schemas[0]));
        }
    }
}
