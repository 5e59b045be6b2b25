//! # Schema Error Types
//!
//! Errors produced while resolving and parsing schema documents. All
//! variants are `Clone`: a failed load may be observed by several callers
//! that awaited the same in-flight fetch, and each receives the full
//! error.

use thiserror::Error;

use vantage_core::ResourceId;

/// 1-based position of a parse failure inside a schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsePosition {
    /// Line of the failure, starting at 1.
    pub line: usize,
    /// Column of the failure, starting at 1.
    pub column: usize,
}

impl ParsePosition {
    /// Extract the position from a `serde_json` error, if it carries one.
    ///
    /// `serde_json` reports line 0 for errors with no textual location
    /// (for example IO failures); those map to `None`.
    pub(crate) fn from_json_error(err: &serde_json::Error) -> Option<Self> {
        if err.line() == 0 {
            None
        } else {
            Some(Self {
                line: err.line(),
                column: err.column(),
            })
        }
    }
}

impl std::fmt::Display for ParsePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Error resolving or parsing a schema resource.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// The resource identifier did not resolve through the host loader.
    #[error("schema resource not found: '{resource}' ({reason})")]
    ResourceNotFound {
        /// The identifier that failed to resolve.
        resource: ResourceId,
        /// Reason reported by the resource loader.
        reason: String,
    },

    /// The resource resolved but its content is not a usable schema,
    /// either because it is not valid JSON or because the document does
    /// not compile as a schema.
    ///
    /// `reason` is human-readable and already includes the textual
    /// position where one is known; `position` carries it structurally.
    #[error("malformed schema '{resource}': {reason}")]
    Parse {
        /// The resource whose content is malformed.
        resource: ResourceId,
        /// Reason the content could not be parsed or compiled.
        reason: String,
        /// Position of the failure, when the parser reports one.
        position: Option<ParsePosition>,
    },
}

impl SchemaError {
    /// The resource identifier the error refers to.
    pub fn resource(&self) -> &ResourceId {
        match self {
            Self::ResourceNotFound { resource, .. } => resource,
            Self::Parse { resource, .. } => resource,
        }
    }
}
