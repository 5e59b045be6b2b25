//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the identifier namespaces of the component
//! registry. These prevent accidental identifier confusion: you cannot
//! pass a `ResourceId` where a `ComponentId` is expected.
//!
//! Identifiers are dotted-path strings chosen by module authors, e.g.
//! `rad.display.smartViewer` for a component or `radsmartviewer.props.json`
//! for a schema resource. Construction performs no validation; emptiness
//! of the fields a descriptor requires is checked once, at
//! `DescriptorBuilder::build()`, so builders can be assembled in any order.

use serde::{Deserialize, Serialize};

/// Unique identifier for a component, global across one registry.
///
/// Matches the id declared by the component's front-end implementation;
/// the registry enforces uniqueness at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

/// Identifier of the module (plugin) that owns a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

/// Identifier of a bundled resource, resolved by a [`crate::ResourceLoader`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ComponentId {
    /// Wrap a component identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ModuleId {
    /// Wrap a module identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ResourceId {
    /// Wrap a resource identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<&str> for ModuleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
