//! # Component Descriptors
//!
//! A [`ComponentDescriptor`] is the immutable metadata record for one UI
//! component: its identity, where it appears on the designer palette,
//! the schema its configuration must satisfy, the events it emits, and
//! the front-end assets that implement it. Descriptors are produced by
//! [`crate::DescriptorBuilder`] and stored in a
//! [`crate::ComponentRegistry`]; nothing mutates them afterwards.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use vantage_core::{ComponentId, ModuleId};
use vantage_schema::{Schema, SchemaViolation};

use crate::events::EventDescriptor;

/// One entry on the designer's component palette.
///
/// A component may contribute several entries (variants under different
/// category paths) or none at all, in which case it is registered but
/// not offered for placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Path below the component's palette category; empty means the
    /// category root.
    pub category_path: String,
    /// Label shown on the palette.
    pub label: String,
    /// Tooltip description.
    pub description: String,
    /// Optional icon resource reference.
    pub icon: Option<String>,
}

impl PaletteEntry {
    /// Create an entry with no icon.
    pub fn new(
        category_path: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category_path: category_path.into(),
            label: label.into(),
            description: description.into(),
            icon: None,
        }
    }

    /// Attach an icon resource reference.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Kind of a front-end asset in a resource bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserResourceKind {
    /// A JavaScript bundle.
    Js,
    /// A stylesheet.
    Css,
}

/// One front-end asset the browser must load for the component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserResource {
    /// Asset name, unique within its bundle.
    pub name: String,
    /// Asset kind.
    pub kind: BrowserResourceKind,
    /// Path of the asset below the bundle's mount path.
    pub path: String,
}

/// Reference to the front-end assets implementing one or more components.
///
/// The registry carries this as opaque data for the host's rendering
/// collaborator; it never resolves or fetches the assets itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBundle {
    /// Mount path the host serves the bundle under.
    pub mount_path: String,
    /// Assets in the bundle.
    pub entries: Vec<BrowserResource>,
}

impl ResourceBundle {
    /// Create a bundle served under `mount_path`.
    pub fn new(mount_path: impl Into<String>, entries: Vec<BrowserResource>) -> Self {
        Self {
            mount_path: mount_path.into(),
            entries,
        }
    }
}

/// Immutable metadata record for one UI component.
///
/// All fields are fixed at [`crate::DescriptorBuilder::build`] time.
/// Cloning is cheap where it matters: the configuration schema and event
/// schemas are shared handles.
#[derive(Debug, Clone)]
pub struct ComponentDescriptor {
    pub(crate) id: ComponentId,
    pub(crate) module_id: ModuleId,
    pub(crate) palette_category: String,
    pub(crate) name: String,
    pub(crate) default_meta_name: String,
    pub(crate) palette_entries: Vec<PaletteEntry>,
    pub(crate) config_schema: Schema,
    /// Keyed by event name; insertion preserves declaration order.
    pub(crate) events: IndexMap<String, EventDescriptor>,
    pub(crate) resources: Option<ResourceBundle>,
}

impl ComponentDescriptor {
    /// Start building a descriptor.
    pub fn builder() -> crate::DescriptorBuilder {
        crate::DescriptorBuilder::new()
    }

    /// Globally unique component id, e.g. `rad.display.smartViewer`.
    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    /// Id of the module that owns this component.
    pub fn module_id(&self) -> &ModuleId {
        &self.module_id
    }

    /// Palette category the component is listed under.
    pub fn palette_category(&self) -> &str {
        &self.palette_category
    }

    /// Display name shown in designer tooling.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Default name given to newly placed instances.
    pub fn default_meta_name(&self) -> &str {
        &self.default_meta_name
    }

    /// Palette entries in declaration order; may be empty.
    pub fn palette_entries(&self) -> &[PaletteEntry] {
        &self.palette_entries
    }

    /// Schema the component's configuration document must satisfy.
    pub fn config_schema(&self) -> &Schema {
        &self.config_schema
    }

    /// Declared events in declaration order.
    pub fn events(&self) -> impl Iterator<Item = &EventDescriptor> {
        self.events.values()
    }

    /// Look up a declared event by name.
    pub fn event(&self, name: &str) -> Option<&EventDescriptor> {
        self.events.get(name)
    }

    /// Front-end asset bundle, when the component ships one.
    pub fn resources(&self) -> Option<&ResourceBundle> {
        self.resources.as_ref()
    }

    /// Check a configuration document against the component's schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaViolation`] naming this component and listing
    /// every violation found in the document.
    pub fn validate_config(&self, config: &Value) -> Result<(), SchemaViolation> {
        self.config_schema.validate(config, self.id.as_str())
    }
}
