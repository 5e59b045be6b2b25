//! # The Registry Table
//!
//! [`ComponentRegistry`] maps component ids to their descriptors for one
//! plugin environment. It is an explicit context object handed to
//! registration and lookup code, never an implicit process global, so
//! hosts can scope one per environment and tests can create as many
//! isolated registries as they need.
//!
//! ## Locking Discipline
//!
//! The table sits behind a reader/writer lock. `register` and
//! `unregister` hold the write lock across the whole check-then-mutate
//! sequence, so two concurrent registrations of one id cannot both pass
//! the uniqueness check. Reads take the read lock briefly and return
//! owned snapshots; enumeration never holds the lock across caller
//! iteration.

use indexmap::IndexMap;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::info;

use vantage_core::ComponentId;

use crate::descriptor::ComponentDescriptor;

/// Error from a registry operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A descriptor with this id is already registered. Unregister it
    /// first to replace it.
    #[error("component '{component}' is already registered")]
    DuplicateComponentId {
        /// The id that is already taken.
        component: ComponentId,
    },

    /// No descriptor is registered under this id.
    ///
    /// For `unregister`, callers tearing a module down may treat this as
    /// idempotent success; the registry always signals it.
    #[error("component '{component}' is not registered")]
    NotFound {
        /// The id that was not found.
        component: ComponentId,
    },
}

/// Table of registered component descriptors, keyed by component id.
///
/// Ids are unique per registry (enforced at registration); enumeration
/// follows registration order.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    table: RwLock<IndexMap<ComponentId, ComponentDescriptor>>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under its id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateComponentId`] when a descriptor
    /// with the same id is already registered. The previous entry is
    /// left untouched; re-registering an id requires an explicit
    /// [`ComponentRegistry::unregister`] first.
    pub fn register(&self, descriptor: ComponentDescriptor) -> Result<(), RegistryError> {
        let mut table = self.table.write();
        if table.contains_key(descriptor.id()) {
            return Err(RegistryError::DuplicateComponentId {
                component: descriptor.id().clone(),
            });
        }
        info!(
            component = %descriptor.id(),
            module = %descriptor.module_id(),
            category = descriptor.palette_category(),
            "component registered"
        );
        table.insert(descriptor.id().clone(), descriptor);
        Ok(())
    }

    /// Remove and return the descriptor registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no such entry exists.
    pub fn unregister(&self, id: &ComponentId) -> Result<ComponentDescriptor, RegistryError> {
        let mut table = self.table.write();
        // shift_remove keeps registration order intact for enumeration.
        let descriptor = table
            .shift_remove(id)
            .ok_or_else(|| RegistryError::NotFound {
                component: id.clone(),
            })?;
        info!(component = %id, "component unregistered");
        Ok(descriptor)
    }

    /// Look up the descriptor registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no such entry exists.
    pub fn get(&self, id: &ComponentId) -> Result<ComponentDescriptor, RegistryError> {
        self.table
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                component: id.clone(),
            })
    }

    /// Descriptors in `category`, in registration order. An empty result
    /// is not an error.
    pub fn list_by_category(&self, category: &str) -> Vec<ComponentDescriptor> {
        self.table
            .read()
            .values()
            .filter(|d| d.palette_category() == category)
            .cloned()
            .collect()
    }

    /// All registered descriptors, in registration order.
    pub fn all(&self) -> Vec<ComponentDescriptor> {
        self.table.read().values().cloned().collect()
    }

    /// Whether a descriptor is registered under `id`.
    pub fn contains(&self, id: &ComponentId) -> bool {
        self.table.read().contains_key(id)
    }

    /// Number of registered descriptors.
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    /// Remove every entry. Called at plugin-environment teardown.
    pub fn clear(&self) {
        let mut table = self.table.write();
        let removed = table.len();
        table.clear();
        info!(removed, "registry cleared");
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use vantage_core::ResourceId;
    use vantage_schema::Schema;

    fn descriptor(id: &str) -> ComponentDescriptor {
        let schema =
            Schema::from_value(ResourceId::new("any.props.json"), json!({ "type": "object" }))
                .unwrap();
        ComponentDescriptor::builder()
            .id(id)
            .module_id("rad.components")
            .palette_category("Display")
            .name("Widget")
            .config_schema(schema)
            .build()
            .unwrap()
    }

    proptest! {
        /// Under any interleaving of register/unregister calls the table
        /// never holds two descriptors with the same id, and registering
        /// a live id always fails.
        #[test]
        fn registry_never_holds_duplicate_ids(
            ops in prop::collection::vec((0..4usize, any::<bool>()), 0..48)
        ) {
            let ids = ["rad.a", "rad.b", "rad.c", "rad.d"];
            let registry = ComponentRegistry::new();

            for (idx, is_register) in ops {
                let id = ComponentId::new(ids[idx]);
                if is_register {
                    let was_present = registry.contains(&id);
                    let result = registry.register(descriptor(ids[idx]));
                    prop_assert_eq!(result.is_err(), was_present);
                } else {
                    let was_present = registry.contains(&id);
                    let result = registry.unregister(&id);
                    prop_assert_eq!(result.is_ok(), was_present);
                }

                let all_ids: Vec<String> =
                    registry.all().iter().map(|d| d.id().to_string()).collect();
                let distinct: std::collections::HashSet<&String> = all_ids.iter().collect();
                prop_assert_eq!(distinct.len(), all_ids.len());
            }
        }
    }
}
