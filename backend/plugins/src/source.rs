//! Slot sources: the lookup a consumption hook calls to fill its slot.
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use pacer_core::{PacerError, SlotName};

use crate::descriptor::PluginDescriptor;
use crate::slots::{ResolvedComponent, SlotResolver};
use crate::store::PluginStateStore;

/// `resolve(slot) -> components`, possibly backed by storage that can fail.
#[async_trait]
pub trait SlotSource: Send + Sync {
    async fn plugin_views_for_slot(
        &self,
        slot: &SlotName,
    ) -> Result<Vec<ResolvedComponent>, PacerError>;
}

/// Plain resolution over the registry; never fails.
#[async_trait]
impl SlotSource for SlotResolver {
    async fn plugin_views_for_slot(
        &self,
        slot: &SlotName,
    ) -> Result<Vec<ResolvedComponent>, PacerError> {
        Ok(self.resolve(slot).await)
    }
}

/// Resolution restricted to the plugins the user has enabled.
///
/// Store errors are returned as-is; deciding what an unavailable store means
/// for the UI is the caller's business.
#[derive(Clone)]
pub struct StoreBackedSource {
    resolver: SlotResolver,
    store: Arc<dyn PluginStateStore>,
}

impl StoreBackedSource {
    pub fn new(resolver: SlotResolver, store: Arc<dyn PluginStateStore>) -> Self {
        Self { resolver, store }
    }
}

#[async_trait]
impl SlotSource for StoreBackedSource {
    async fn plugin_views_for_slot(
        &self,
        slot: &SlotName,
    ) -> Result<Vec<ResolvedComponent>, PacerError> {
        let overrides = self.store.enabled_overrides().await?;
        debug!(
            slot = %slot,
            store = self.store.name(),
            overrides = overrides.len(),
            "Loaded plugin state"
        );
        let enabled = |d: &PluginDescriptor| {
            overrides.get(&d.id).copied().unwrap_or(true)
        };
        Ok(self.resolver.resolve_where(slot, enabled).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::ready;
    use crate::registry::Registry;
    use crate::store::{MemoryStore, UnavailableStore};
    use pacer_core::{PluginCategory, PluginId, Renderable};

    fn resolver() -> SlotResolver {
        let registry = Registry::from_descriptors(
            PluginCategory::Extension,
            vec![
                PluginDescriptor::new("maps", "Maps")
                    .with_slot("activity.top", ready("RouteMap", Renderable::panel("Map", &[]))),
                PluginDescriptor::new("records", "Records")
                    .with_slot("activity.top", ready("Best", Renderable::panel("Best", &[]))),
            ],
        )
        .unwrap();
        SlotResolver::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_resolver_as_source() {
        let views = resolver()
            .plugin_views_for_slot(&"activity.top".into())
            .await
            .unwrap();
        assert_eq!(views.len(), 2);
    }

    #[tokio::test]
    async fn test_disabled_plugins_are_skipped() {
        let store = MemoryStore::with_overrides([(PluginId::from("maps"), false)]);
        let source = StoreBackedSource::new(resolver(), Arc::new(store));
        let views = source
            .plugin_views_for_slot(&"activity.top".into())
            .await
            .unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].plugin_id.as_str(), "records");
    }

    #[tokio::test]
    async fn test_unavailable_store_bubbles_up() {
        let source = StoreBackedSource::new(resolver(), Arc::new(UnavailableStore::default()));
        let err = source
            .plugin_views_for_slot(&"activity.top".into())
            .await
            .unwrap_err();
        assert!(err.is_store_unavailable());
    }
}
