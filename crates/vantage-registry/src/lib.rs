//! # vantage-registry — The Component Descriptor Registry
//!
//! The registration surface of the Vantage platform. A module (plugin)
//! describes each of its UI components with an immutable
//! [`ComponentDescriptor`] — identity, palette placement, configuration
//! schema, event contracts, front-end resources — and registers it with a
//! [`ComponentRegistry`] at load time. The designer enumerates the
//! registry to populate its palette; the gateway consults it to validate
//! configuration documents and event payloads at runtime.
//!
//! ## Building Descriptors (`builder`)
//!
//! [`DescriptorBuilder`] assembles a descriptor field by field, in any
//! order, and validates completeness once at [`DescriptorBuilder::build`].
//! The builder is consumed by value on build, so a frozen descriptor can
//! never be mutated through its builder afterwards.
//!
//! ## The Registry (`registry`)
//!
//! [`ComponentRegistry`] is an explicit context object, never a process
//! global: hosts create one per plugin environment and tests create as
//! many isolated registries as they need. Component ids are unique per
//! registry; enumeration follows registration order.
//!
//! ## Module Lifecycle (`loader`)
//!
//! [`ComponentModule`] batches one module's descriptors for registration
//! at plugin load and removal at plugin unload. Per-component failures
//! are isolated: one bad descriptor never blocks the rest of the module.
//!
//! ## Crate Policy
//!
//! - Descriptors are immutable after `build()`; registries hand out
//!   cheap owned handles, never references into the table.
//! - Payload and configuration validation is exhaustive: every violation
//!   in a document is reported together.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod builder;
pub mod descriptor;
pub mod events;
pub mod loader;
pub mod registry;

pub use builder::{BuildError, DescriptorBuilder};
pub use descriptor::{
    BrowserResource, BrowserResourceKind, ComponentDescriptor, PaletteEntry, ResourceBundle,
};
pub use events::EventDescriptor;
pub use loader::{ComponentModule, ModuleLoadReport, ModuleUnloadReport};
pub use registry::{ComponentRegistry, RegistryError};
