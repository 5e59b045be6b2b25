//! # Schema Documents
//!
//! A [`Schema`] pairs a parsed JSON Schema document (Draft 2020-12) with
//! its compiled validator. The two constructors match the two ways
//! modules declare schemas: [`Schema::parse`] for bundled resources
//! (usually reached through [`crate::SchemaStore`]) and
//! [`Schema::from_value`] for small schemas assembled in code, such as
//! event payload contracts declared next to their component.
//!
//! ## Reference Resolution
//!
//! Validator compilation never performs network retrieval. A local
//! retriever resolves any external `$ref` URI to a permissive schema that
//! accepts everything, so a dangling reference degrades to "unchecked"
//! rather than a load failure or a network request.

use std::sync::Arc;

use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;

use vantage_core::ResourceId;

use crate::error::{ParsePosition, SchemaError};
use crate::violation::{SchemaViolation, Violation};

/// Local retriever that answers every external `$ref` with a permissive
/// schema.
///
/// This prevents the jsonschema crate from making network requests for
/// draft metaschemas or cross-schema references. Component schemas are
/// self-contained documents; anything they reference externally is
/// treated as unconstrained.
struct PermissiveRetriever;

impl Retrieve for PermissiveRetriever {
    fn retrieve(
        &self,
        _uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Ok(serde_json::json!({}))
    }
}

struct SchemaInner {
    /// Identifier of the resource (or in-code declaration) this schema
    /// came from. Diagnostic only; not used for lookup.
    source: ResourceId,
    /// The parsed schema document as declared.
    document: Value,
    /// Compiled validator for the document.
    validator: Validator,
}

/// An immutable parsed schema document plus its compiled validator.
///
/// A `Schema` value is a cheap handle: clones share one parsed document
/// and one compiled validator. The store's cache-coherence guarantee
/// ("one instance per resource id") is observable through
/// [`Schema::same_instance`].
#[derive(Clone)]
pub struct Schema {
    inner: Arc<SchemaInner>,
}

impl Schema {
    /// Parse raw resource bytes into a schema and compile its validator.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Parse`] when the bytes are not valid JSON
    /// (carrying the 1-based line/column where the parser reports one) or
    /// when the document does not compile as a schema.
    pub fn parse(source: ResourceId, bytes: &[u8]) -> Result<Self, SchemaError> {
        let document: Value =
            serde_json::from_slice(bytes).map_err(|e| SchemaError::Parse {
                resource: source.clone(),
                reason: format!("invalid JSON: {e}"),
                position: ParsePosition::from_json_error(&e),
            })?;
        Self::from_value(source, document)
    }

    /// Build a schema from an in-memory JSON value.
    ///
    /// Used for schemas declared in code rather than loaded from a
    /// bundled resource; `source` names the declaration site for
    /// diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Parse`] (with no position) when the value
    /// does not compile as a schema.
    pub fn from_value(source: ResourceId, document: Value) -> Result<Self, SchemaError> {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        opts.with_retriever(PermissiveRetriever);

        let validator = opts.build(&document).map_err(|e| SchemaError::Parse {
            resource: source.clone(),
            reason: format!("schema does not compile: {e}"),
            position: None,
        })?;

        Ok(Self {
            inner: Arc::new(SchemaInner {
                source,
                document,
                validator,
            }),
        })
    }

    /// Identifier of the resource this schema was parsed from.
    pub fn source(&self) -> &ResourceId {
        &self.inner.source
    }

    /// The parsed schema document.
    pub fn document(&self) -> &Value {
        &self.inner.document
    }

    /// Whether two handles refer to the same parsed schema instance.
    pub fn same_instance(&self, other: &Schema) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Collect every violation of this schema in `instance`.
    ///
    /// Exhaustive: the whole document is checked and all violations are
    /// returned, never just the first. An empty result means conformance.
    pub fn iter_violations(&self, instance: &Value) -> Vec<Violation> {
        self.inner
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect()
    }

    /// Validate `instance` against this schema.
    ///
    /// `subject` names what is being validated (a component id, an event
    /// name) and is carried in the error for reporting.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaViolation`] listing every violation found.
    pub fn validate(&self, instance: &Value, subject: &str) -> Result<(), SchemaViolation> {
        let violations = self.iter_violations(instance);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaViolation {
                subject: subject.to_string(),
                violations: violations.into(),
            })
        }
    }
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("source", &self.inner.source)
            .finish_non_exhaustive()
    }
}
