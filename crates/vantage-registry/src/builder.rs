//! # Descriptor Construction
//!
//! [`DescriptorBuilder`] assembles a [`ComponentDescriptor`] through
//! fluent setters that may be called in any order; all validation runs
//! once, at [`DescriptorBuilder::build`]. The builder is consumed by
//! value on build, so once a descriptor is frozen there is no handle
//! left through which it could be mutated.

use indexmap::IndexMap;
use thiserror::Error;

use vantage_core::{ComponentId, ModuleId};
use vantage_schema::Schema;

use crate::descriptor::{ComponentDescriptor, PaletteEntry, ResourceBundle};
use crate::events::EventDescriptor;

/// Error building a [`ComponentDescriptor`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    /// A required field was never set (or was set to an empty string).
    ///
    /// Fields are checked in a fixed order — `id`, `module_id`,
    /// `palette_category`, `name`, `config_schema` — and the first
    /// missing one is named.
    #[error("descriptor is missing required field '{field}'")]
    IncompleteDescriptor {
        /// Name of the first missing field.
        field: &'static str,
    },

    /// Two declared events share a name.
    #[error("duplicate event '{event}' declared on one component")]
    DuplicateEvent {
        /// The repeated event name.
        event: String,
    },
}

/// Fluent, consuming builder for [`ComponentDescriptor`].
///
/// Every setter takes and returns the builder by value, and `build()`
/// consumes it, so post-build mutation is rejected by the compiler
/// rather than at runtime.
#[derive(Debug, Default)]
pub struct DescriptorBuilder {
    id: Option<ComponentId>,
    module_id: Option<ModuleId>,
    palette_category: Option<String>,
    name: Option<String>,
    default_meta_name: Option<String>,
    palette_entries: Vec<PaletteEntry>,
    config_schema: Option<Schema>,
    events: Vec<EventDescriptor>,
    resources: Option<ResourceBundle>,
}

impl DescriptorBuilder {
    /// Start an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the globally unique component id.
    pub fn id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the id of the owning module.
    pub fn module_id(mut self, module_id: impl Into<ModuleId>) -> Self {
        self.module_id = Some(module_id.into());
        self
    }

    /// Set the palette category the component is listed under.
    pub fn palette_category(mut self, category: impl Into<String>) -> Self {
        self.palette_category = Some(category.into());
        self
    }

    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the default name for newly placed instances.
    pub fn default_meta_name(mut self, meta_name: impl Into<String>) -> Self {
        self.default_meta_name = Some(meta_name.into());
        self
    }

    /// Append one palette entry. Components with no entries are valid;
    /// they register without appearing on the palette.
    pub fn add_palette_entry(mut self, entry: PaletteEntry) -> Self {
        self.palette_entries.push(entry);
        self
    }

    /// Set the configuration schema.
    pub fn config_schema(mut self, schema: Schema) -> Self {
        self.config_schema = Some(schema);
        self
    }

    /// Set the finalized event list. Order is preserved; names must be
    /// pairwise distinct, checked at `build()`.
    pub fn events(mut self, events: Vec<EventDescriptor>) -> Self {
        self.events = events;
        self
    }

    /// Attach the front-end asset bundle reference.
    pub fn resources(mut self, resources: ResourceBundle) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Validate and freeze the descriptor, consuming the builder.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::IncompleteDescriptor`] naming the first
    /// required field that is unset or empty, then
    /// [`BuildError::DuplicateEvent`] naming the first repeated event
    /// name.
    pub fn build(self) -> Result<ComponentDescriptor, BuildError> {
        let id = require(self.id.filter(|v| !v.as_str().is_empty()), "id")?;
        let module_id = require(
            self.module_id.filter(|v| !v.as_str().is_empty()),
            "module_id",
        )?;
        let palette_category = require(
            self.palette_category.filter(|v| !v.is_empty()),
            "palette_category",
        )?;
        let name = require(self.name.filter(|v| !v.is_empty()), "name")?;
        let config_schema = require(self.config_schema, "config_schema")?;

        let mut events = IndexMap::with_capacity(self.events.len());
        for event in self.events {
            if events.contains_key(event.name()) {
                return Err(BuildError::DuplicateEvent {
                    event: event.name().to_string(),
                });
            }
            events.insert(event.name().to_string(), event);
        }

        Ok(ComponentDescriptor {
            id,
            module_id,
            palette_category,
            name,
            default_meta_name: self.default_meta_name.unwrap_or_default(),
            palette_entries: self.palette_entries,
            config_schema,
            events,
            resources: self.resources,
        })
    }
}

fn require<T>(value: Option<T>, field: &'static str) -> Result<T, BuildError> {
    value.ok_or(BuildError::IncompleteDescriptor { field })
}
