//! # vantage-schema — Schema Parsing & the Cached Schema Store
//!
//! Provides the schema machinery for the component registry: parsing
//! bundled JSON Schema documents into compiled validators, caching them
//! per resource identifier, and reporting validation violations with
//! structured paths.
//!
//! ## Schema Documents (`schema`)
//!
//! A [`Schema`] pairs a parsed JSON Schema document with its compiled
//! validator. Schemas come from two places, matching how modules declare
//! them: bundled resources ([`Schema::parse`], usually through the store)
//! and in-code construction ([`Schema::from_value`], used for small event
//! schemas declared next to the component). A `Schema` value is a cheap
//! handle; clones share one immutable compiled document.
//!
//! ## The Store (`store`)
//!
//! [`SchemaStore`] loads schemas from the host's resource loader exactly
//! once per identifier. Concurrent first loads of one identifier collapse
//! into a single fetch-and-parse whose outcome all callers share; parse
//! failures are reported to every waiter but are not cached, so a later
//! call retries. Schemas are build-time assets: there is no invalidation.
//!
//! ## Crate Policy
//!
//! - Depends only on `vantage-core` internally.
//! - Validation is exhaustive: every violation in a document is collected
//!   and reported together, never just the first.
//! - Validator compilation never performs network retrieval; external
//!   `$ref` targets resolve to a permissive schema.

pub mod error;
pub mod schema;
pub mod store;
pub mod violation;

pub use error::{ParsePosition, SchemaError};
pub use schema::Schema;
pub use store::SchemaStore;
pub use violation::{SchemaViolation, Violation, Violations};
