//! Plugin discovery.
//!
//! Every plugin module registers its descriptor constructor with one of the
//! `register_*!` macros. The linker gathers those submissions into one table
//! per category; discovery walks the tables and builds the descriptors.
//!
//! Table order is whatever the linker produced. It is not stable across
//! builds, only the set of ids is.

use std::collections::HashSet;
use tracing::{debug, error, info, warn};

use pacer_core::PluginCategory;

use crate::descriptor::{Descriptor, PluginDescriptor, ProviderDescriptor};

/// A registered extension plugin module.
pub struct ExtensionEntry {
    pub module: &'static str,
    pub descriptor: fn() -> PluginDescriptor,
}

/// A registered data-source provider module.
pub struct DataProviderEntry {
    pub module: &'static str,
    pub descriptor: fn() -> ProviderDescriptor,
}

/// A registered storage provider module.
pub struct StorageProviderEntry {
    pub module: &'static str,
    pub descriptor: fn() -> ProviderDescriptor,
}

inventory::collect!(ExtensionEntry);
inventory::collect!(DataProviderEntry);
inventory::collect!(StorageProviderEntry);

/// Register an extension plugin: `register_extension!(descriptor);`
#[macro_export]
macro_rules! register_extension {
    ($ctor:path) => {
        $crate::inventory::submit! {
            $crate::discovery::ExtensionEntry {
                module: module_path!(),
                descriptor: $ctor,
            }
        }
    };
}

/// Register a data-source provider: `register_data_provider!(descriptor);`
#[macro_export]
macro_rules! register_data_provider {
    ($ctor:path) => {
        $crate::inventory::submit! {
            $crate::discovery::DataProviderEntry {
                module: module_path!(),
                descriptor: $ctor,
            }
        }
    };
}

/// Register a storage provider: `register_storage_provider!(descriptor);`
#[macro_export]
macro_rules! register_storage_provider {
    ($ctor:path) => {
        $crate::inventory::submit! {
            $crate::discovery::StorageProviderEntry {
                module: module_path!(),
                descriptor: $ctor,
            }
        }
    };
}

/// Build every registered extension descriptor, in table order.
pub fn discover_extensions() -> Vec<PluginDescriptor> {
    let found = inventory::iter::<ExtensionEntry>
        .into_iter()
        .map(|entry| {
            debug!(module = entry.module, "Discovered extension module");
            (entry.descriptor)()
        });
    keep_well_formed(PluginCategory::Extension, found)
}

/// Build every registered data-source provider descriptor.
pub fn discover_data_providers() -> Vec<ProviderDescriptor> {
    let found = inventory::iter::<DataProviderEntry>
        .into_iter()
        .map(|entry| {
            debug!(module = entry.module, "Discovered data provider module");
            (entry.descriptor)()
        });
    keep_well_formed(PluginCategory::DataProvider, found)
}

/// Build every registered storage provider descriptor.
pub fn discover_storage_providers() -> Vec<ProviderDescriptor> {
    let found = inventory::iter::<StorageProviderEntry>
        .into_iter()
        .map(|entry| {
            debug!(module = entry.module, "Discovered storage provider module");
            (entry.descriptor)()
        });
    keep_well_formed(PluginCategory::StorageProvider, found)
}

/// Drop descriptors that fail validation or repeat an earlier id.
///
/// The bundled catalog is checked by its own tests, so at runtime this only
/// guards against a broken third-party module taking the registry down.
pub(crate) fn keep_well_formed<D: Descriptor>(
    category: PluginCategory,
    found: impl IntoIterator<Item = D>,
) -> Vec<D> {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    for descriptor in found {
        if let Err(e) = descriptor.validate() {
            error!(%category, error = %e, "Skipping malformed descriptor");
            continue;
        }
        if !seen.insert(descriptor.id().clone()) {
            warn!(%category, id = %descriptor.id(), "Skipping duplicate plugin id");
            continue;
        }
        kept.push(descriptor);
    }
    info!(%category, count = kept.len(), "Plugin discovery complete");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_well_formed_skips_duplicates_and_invalid() {
        let found = vec![
            PluginDescriptor::new("maps", "Maps"),
            PluginDescriptor::new("", "Nameless"),
            PluginDescriptor::new("maps", "Maps again"),
            PluginDescriptor::new("records", "Records"),
        ];
        let kept = keep_well_formed(PluginCategory::Extension, found);
        let ids: Vec<&str> = kept.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["maps", "records"]);
        assert_eq!(kept[0].label, "Maps");
    }
}
