//! # Resource Loading Capability
//!
//! The registry consumes bundled assets (schema documents, front-end
//! bundles) through the [`ResourceLoader`] trait supplied by the host
//! environment. The trait is deliberately small: resolve an identifier to
//! raw bytes, or say why you cannot. Timeout and retry policy belong to
//! the host's loader implementation, not to this seam.
//!
//! Two loaders are provided:
//!
//! - [`StaticResources`]: an in-memory map, for assets embedded in the
//!   module binary and for tests.
//! - [`DirResources`]: reads `<root>/<id>` from an unpacked bundle
//!   directory, refusing identifiers that escape the root.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::identity::ResourceId;

/// Error resolving a bundled resource.
///
/// `Clone` so a single load failure can be reported to every caller that
/// awaited the same fetch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResourceError {
    /// The identifier does not resolve to any bundled resource.
    #[error("resource not found: '{resource}'")]
    NotFound {
        /// The identifier that failed to resolve.
        resource: ResourceId,
    },

    /// The resource exists but could not be read.
    #[error("error reading resource '{resource}': {reason}")]
    Io {
        /// The identifier whose content could not be read.
        resource: ResourceId,
        /// Reason the read failed.
        reason: String,
    },
}

/// Host-supplied capability that resolves resource identifiers to bytes.
///
/// Implementations must be shareable across threads; the schema store
/// invokes `fetch` from whichever caller thread first requests a resource.
pub trait ResourceLoader: Send + Sync {
    /// Fetch the raw bytes of a bundled resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when the identifier does not
    /// resolve, and [`ResourceError::Io`] when it resolves but cannot be
    /// read.
    fn fetch(&self, id: &ResourceId) -> Result<Vec<u8>, ResourceError>;
}

/// In-memory resource map.
///
/// Used for assets embedded in the module binary and throughout the test
/// suites. Lookup is exact: the full identifier string is the key.
#[derive(Debug, Default)]
pub struct StaticResources {
    entries: HashMap<ResourceId, Vec<u8>>,
}

impl StaticResources {
    /// Create an empty resource map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resource, replacing any previous entry for the same id.
    pub fn insert(&mut self, id: impl Into<ResourceId>, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(id.into(), bytes.into());
    }

    /// Builder-style [`StaticResources::insert`].
    pub fn with(mut self, id: impl Into<ResourceId>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(id, bytes);
        self
    }

    /// Number of resources in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResourceLoader for StaticResources {
    fn fetch(&self, id: &ResourceId) -> Result<Vec<u8>, ResourceError> {
        self.entries
            .get(id)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound {
                resource: id.clone(),
            })
    }
}

/// Directory-backed resource loader.
///
/// Resolves `<root>/<id>`, treating the identifier as a relative path.
/// Identifiers containing parent-directory or absolute components do not
/// resolve: a bundle can only serve files under its own root.
#[derive(Debug)]
pub struct DirResources {
    root: PathBuf,
}

impl DirResources {
    /// Create a loader rooted at an unpacked bundle directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The bundle root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceLoader for DirResources {
    fn fetch(&self, id: &ResourceId) -> Result<Vec<u8>, ResourceError> {
        let rel = Path::new(id.as_str());
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(ResourceError::NotFound {
                resource: id.clone(),
            });
        }

        let path = self.root.join(rel);
        std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ResourceError::NotFound {
                resource: id.clone(),
            },
            _ => ResourceError::Io {
                resource: id.clone(),
                reason: e.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_resources_fetch() {
        let resources = StaticResources::new().with("props.json", br#"{"type":"object"}"#.to_vec());
        let bytes = resources.fetch(&ResourceId::new("props.json")).unwrap();
        assert_eq!(bytes, br#"{"type":"object"}"#);
    }

    #[test]
    fn test_static_resources_missing() {
        let resources = StaticResources::new();
        let err = resources.fetch(&ResourceId::new("absent.json")).unwrap_err();
        assert_eq!(
            err,
            ResourceError::NotFound {
                resource: ResourceId::new("absent.json"),
            }
        );
    }

    #[test]
    fn test_static_resources_replace() {
        let mut resources = StaticResources::new();
        resources.insert("a.json", b"1".to_vec());
        resources.insert("a.json", b"2".to_vec());
        assert_eq!(resources.len(), 1);
        assert_eq!(resources.fetch(&ResourceId::new("a.json")).unwrap(), b"2");
    }

    #[test]
    fn test_dir_resources_fetch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("viewer.props.json"), b"{}").unwrap();

        let loader = DirResources::new(dir.path());
        let bytes = loader.fetch(&ResourceId::new("viewer.props.json")).unwrap();
        assert_eq!(bytes, b"{}");
    }

    #[test]
    fn test_dir_resources_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("schemas")).unwrap();
        std::fs::write(dir.path().join("schemas/a.json"), b"{}").unwrap();

        let loader = DirResources::new(dir.path());
        assert!(loader.fetch(&ResourceId::new("schemas/a.json")).is_ok());
    }

    #[test]
    fn test_dir_resources_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DirResources::new(dir.path());
        let err = loader.fetch(&ResourceId::new("absent.json")).unwrap_err();
        assert!(matches!(err, ResourceError::NotFound { .. }));
    }

    #[test]
    fn test_dir_resources_rejects_parent_traversal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("inside.json"), b"{}").unwrap();

        let loader = DirResources::new(dir.path().join("bundle"));
        let err = loader
            .fetch(&ResourceId::new("../inside.json"))
            .unwrap_err();
        assert!(matches!(err, ResourceError::NotFound { .. }));
    }

    #[test]
    fn test_dir_resources_rejects_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DirResources::new(dir.path());
        let err = loader.fetch(&ResourceId::new("/etc/hostname")).unwrap_err();
        assert!(matches!(err, ResourceError::NotFound { .. }));
    }
}
