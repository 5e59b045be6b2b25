//! # vantage-core — Foundational Types for the Vantage Component Registry
//!
//! This crate is the bedrock of the Vantage workspace. It defines the
//! identifier newtypes shared by every other crate and the capability
//! through which the host environment supplies bundled resources.
//! Every other crate in the workspace depends on `vantage-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `ComponentId`,
//!    `ModuleId`, `ResourceId` are newtypes over strings. No bare strings
//!    for identifiers: you cannot pass a module id where a component id is
//!    expected.
//!
//! 2. **Resource loading is a capability, not a dependency.** The
//!    [`ResourceLoader`] trait is the seam between this workspace and the
//!    host's asset pipeline. Two loaders ship here: an in-memory map for
//!    embedded assets and tests, and a directory-backed loader for
//!    unpacked bundles.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `vantage-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public identifier types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod identity;
pub mod resource;

// Re-export primary types for ergonomic imports.
pub use identity::{ComponentId, ModuleId, ResourceId};
pub use resource::{DirResources, ResourceError, ResourceLoader, StaticResources};
