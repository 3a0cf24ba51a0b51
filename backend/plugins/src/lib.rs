//! Plugin layer: descriptors, discovery, registries and slot resolution.
//!
//! Plugin modules register descriptors with the `register_*!` macros. The
//! registries collect them per category, the [`SlotResolver`] turns a slot
//! name into components, and a [`SlotBinding`] holds those components for a
//! rendering surface.

pub mod binding;
pub mod descriptor;
pub mod discovery;
pub mod factory;
pub mod providers;
pub mod registry;
pub mod routes;
pub mod slots;
pub mod source;
pub mod store;

#[doc(hidden)]
pub use inventory;

pub use binding::{BindingSnapshot, BindingState, SlotBinding, use_plugin_components};
pub use descriptor::{Descriptor, DescriptorSummary, PluginDescriptor, ProviderDescriptor, RouteDef};
pub use factory::{ComponentFactory, LazyComponent, lazy, ready};
pub use providers::{ProviderSetup, resolve_setup};
pub use registry::{
    ExtensionRegistry, ProviderRegistry, Registry, data_providers, extensions, init_registries,
    storage_providers,
};
pub use routes::{PluginRoute, PluginTab, collect_routes, plugin_tabs};
pub use slots::{FactoryFailure, FactoryOutcome, ResolvedComponent, SlotResolver};
pub use source::{SlotSource, StoreBackedSource};
pub use store::{JsonFileStore, MemoryStore, PluginStateStore, StoreError, UnavailableStore};
