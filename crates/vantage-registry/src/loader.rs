//! # Module Batch Registration
//!
//! A plugin assembles one [`ComponentModule`] at initialization time —
//! its module id plus the descriptors of every component it ships — and
//! the host's lifecycle hooks drive [`ComponentModule::register_into`]
//! at load and [`ComponentModule::unregister_from`] at unload.
//!
//! Per-component failures are isolated: a descriptor whose id is already
//! taken is reported in the load report and skipped, and every other
//! component in the module still registers.

use tracing::{info, warn};

use vantage_core::{ComponentId, ModuleId};

use crate::descriptor::ComponentDescriptor;
use crate::registry::{ComponentRegistry, RegistryError};

/// One module's components, batched for lifecycle registration.
#[derive(Debug, Clone)]
pub struct ComponentModule {
    module_id: ModuleId,
    components: Vec<ComponentDescriptor>,
}

impl ComponentModule {
    /// Create an empty module batch.
    pub fn new(module_id: impl Into<ModuleId>) -> Self {
        Self {
            module_id: module_id.into(),
            components: Vec::new(),
        }
    }

    /// Add a component descriptor to the batch.
    pub fn with_component(mut self, descriptor: ComponentDescriptor) -> Self {
        self.components.push(descriptor);
        self
    }

    /// The module's id.
    pub fn module_id(&self) -> &ModuleId {
        &self.module_id
    }

    /// The batched descriptors, in declaration order.
    pub fn components(&self) -> &[ComponentDescriptor] {
        &self.components
    }

    /// Register every component in the batch, isolating failures.
    ///
    /// Components register in declaration order. A component that fails
    /// (its id is already taken) is recorded in the report and skipped;
    /// the rest of the batch still registers.
    pub fn register_into(&self, registry: &ComponentRegistry) -> ModuleLoadReport {
        let mut registered = Vec::new();
        let mut failed = Vec::new();

        for descriptor in &self.components {
            let id = descriptor.id().clone();
            match registry.register(descriptor.clone()) {
                Ok(()) => registered.push(id),
                Err(error) => {
                    warn!(
                        module = %self.module_id,
                        component = %id,
                        %error,
                        "component registration failed, continuing with the rest of the module"
                    );
                    failed.push((id, error));
                }
            }
        }

        info!(
            module = %self.module_id,
            registered = registered.len(),
            failed = failed.len(),
            "module components registered"
        );

        ModuleLoadReport {
            module_id: self.module_id.clone(),
            registered,
            failed,
        }
    }

    /// Unregister every component in the batch.
    ///
    /// Ids that are already gone are collected rather than treated as
    /// failures, so unload is effectively idempotent.
    pub fn unregister_from(&self, registry: &ComponentRegistry) -> ModuleUnloadReport {
        let mut removed = Vec::new();
        let mut missing = Vec::new();

        for descriptor in &self.components {
            let id = descriptor.id().clone();
            match registry.unregister(&id) {
                Ok(_) => removed.push(id),
                Err(RegistryError::NotFound { component }) => missing.push(component),
                Err(error) => {
                    warn!(module = %self.module_id, component = %id, %error, "unregister failed");
                    missing.push(id);
                }
            }
        }

        info!(
            module = %self.module_id,
            removed = removed.len(),
            missing = missing.len(),
            "module components unregistered"
        );

        ModuleUnloadReport {
            module_id: self.module_id.clone(),
            removed,
            missing,
        }
    }
}

/// Outcome of registering one module's batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLoadReport {
    /// The module the batch belongs to.
    pub module_id: ModuleId,
    /// Ids registered successfully, in declaration order.
    pub registered: Vec<ComponentId>,
    /// Components that failed to register, with the reason each one was
    /// rejected.
    pub failed: Vec<(ComponentId, RegistryError)>,
}

impl ModuleLoadReport {
    /// Whether every component in the batch registered.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Outcome of unregistering one module's batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleUnloadReport {
    /// The module the batch belongs to.
    pub module_id: ModuleId,
    /// Ids removed from the registry.
    pub removed: Vec<ComponentId>,
    /// Ids that were already absent when unload ran.
    pub missing: Vec<ComponentId>,
}

impl ModuleUnloadReport {
    /// Whether every component in the batch was still registered.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}
