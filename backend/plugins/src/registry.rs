/// Plugin registries, one per category.
///
/// A registry is built once from the discovered descriptors and never
/// mutated afterwards. The process-wide registries are created on first use
/// and the same instance is handed out for the rest of the process.
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

use pacer_core::{PacerError, PluginCategory, PluginId};

use crate::descriptor::{Descriptor, PluginDescriptor, ProviderDescriptor};
use crate::discovery;

pub struct Registry<D> {
    category: PluginCategory,
    entries: Vec<D>,
    index: HashMap<PluginId, usize>,
}

pub type ExtensionRegistry = Registry<PluginDescriptor>;
pub type ProviderRegistry = Registry<ProviderDescriptor>;

impl<D: Descriptor> Registry<D> {
    /// Build a registry from an explicit list, rejecting malformed entries
    /// and duplicate ids.
    pub fn from_descriptors(category: PluginCategory, entries: Vec<D>) -> Result<Self, PacerError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, descriptor) in entries.iter().enumerate() {
            descriptor.validate()?;
            if index.insert(descriptor.id().clone(), position).is_some() {
                return Err(PacerError::DuplicatePlugin {
                    category: category.to_string(),
                    id: descriptor.id().to_string(),
                });
            }
        }
        Ok(Self {
            category,
            entries,
            index,
        })
    }

    /// Registry over an already filtered discovery result.
    fn from_discovered(category: PluginCategory, entries: Vec<D>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(position, d)| (d.id().clone(), position))
            .collect();
        Self {
            category,
            entries,
            index,
        }
    }

    pub fn category(&self) -> PluginCategory {
        self.category
    }

    /// All descriptors, in discovery order.
    pub fn descriptors(&self) -> &[D] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, D> {
        self.entries.iter()
    }

    pub fn get(&self, id: &str) -> Option<&D> {
        self.index.get(id).map(|&position| &self.entries[position])
    }

    pub fn require(&self, id: &str) -> Result<&D, PacerError> {
        self.get(id)
            .ok_or_else(|| PacerError::UnknownPlugin(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn ids(&self) -> Vec<&PluginId> {
        self.entries.iter().map(Descriptor::id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, D> IntoIterator for &'a Registry<D> {
    type Item = &'a D;
    type IntoIter = std::slice::Iter<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

static EXTENSIONS: Lazy<Arc<ExtensionRegistry>> = Lazy::new(|| {
    Arc::new(Registry::from_discovered(
        PluginCategory::Extension,
        discovery::discover_extensions(),
    ))
});

static DATA_PROVIDERS: Lazy<Arc<ProviderRegistry>> = Lazy::new(|| {
    Arc::new(Registry::from_discovered(
        PluginCategory::DataProvider,
        discovery::discover_data_providers(),
    ))
});

static STORAGE_PROVIDERS: Lazy<Arc<ProviderRegistry>> = Lazy::new(|| {
    Arc::new(Registry::from_discovered(
        PluginCategory::StorageProvider,
        discovery::discover_storage_providers(),
    ))
});

/// The process-wide extension registry.
pub fn extensions() -> &'static Arc<ExtensionRegistry> {
    &EXTENSIONS
}

/// The process-wide data-source provider registry.
pub fn data_providers() -> &'static Arc<ProviderRegistry> {
    &DATA_PROVIDERS
}

/// The process-wide storage provider registry.
pub fn storage_providers() -> &'static Arc<ProviderRegistry> {
    &STORAGE_PROVIDERS
}

/// Run discovery for all three categories now rather than on first query.
pub fn init_registries() {
    Lazy::force(&EXTENSIONS);
    Lazy::force(&DATA_PROVIDERS);
    Lazy::force(&STORAGE_PROVIDERS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::ready;
    use pacer_core::Renderable;

    fn provider(id: &str) -> ProviderDescriptor {
        ProviderDescriptor::new(
            id,
            id.to_uppercase(),
            ready("Setup", Renderable::Form { title: "Setup".into(), fields: vec![] }),
        )
    }

    #[test]
    fn test_from_descriptors_keeps_order_and_indexes() {
        let registry = Registry::from_descriptors(
            PluginCategory::StorageProvider,
            vec![provider("webdav"), provider("local")],
        )
        .unwrap();

        let ids: Vec<&str> = registry.ids().into_iter().map(PluginId::as_str).collect();
        assert_eq!(ids, vec!["webdav", "local"]);
        assert_eq!(registry.get("local").unwrap().label, "LOCAL");
        assert!(registry.get("dropbox").is_none());
        assert!(matches!(
            registry.require("dropbox"),
            Err(PacerError::UnknownPlugin(_))
        ));
        assert_eq!(registry.category(), PluginCategory::StorageProvider);
    }

    #[test]
    fn test_from_descriptors_rejects_duplicates() {
        let result = Registry::from_descriptors(
            PluginCategory::DataProvider,
            vec![provider("gpx"), provider("gpx")],
        );
        match result {
            Err(PacerError::DuplicatePlugin { category, id }) => {
                assert_eq!(category, "data provider");
                assert_eq!(id, "gpx");
            }
            _ => panic!("expected duplicate error"),
        }
    }

    #[test]
    fn test_from_descriptors_rejects_invalid() {
        let result = Registry::from_descriptors(
            PluginCategory::Extension,
            vec![PluginDescriptor::new("", "Nameless")],
        );
        assert!(matches!(result, Err(PacerError::InvalidDescriptor { .. })));
    }

    #[test]
    fn test_global_registries_are_reference_stable() {
        init_registries();
        assert!(std::ptr::eq(extensions(), extensions()));
        assert!(Arc::ptr_eq(data_providers(), data_providers()));
        assert!(std::ptr::eq(
            storage_providers().descriptors(),
            storage_providers().descriptors()
        ));
    }
}
