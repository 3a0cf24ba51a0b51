/// Slot resolution: turn a slot name into the components plugins put there.
///
/// Contributions are gathered in registry order, then in each plugin's own
/// declaration order, and that order is kept in the result. All factories of
/// one call run concurrently on the caller's task. A failing or panicking
/// factory is dropped from the result without affecting its neighbours.
use futures::FutureExt;
use futures::future::join_all;
use serde::Serialize;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, warn};

use pacer_core::{PluginId, Renderable, SlotName};
use pacer_logging::{PluginEvent, PluginEventLogger};

use crate::descriptor::PluginDescriptor;
use crate::factory::LazyComponent;
use crate::registry::{self, ExtensionRegistry};

/// A component built for a slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedComponent {
    pub plugin_id: PluginId,
    pub slot: SlotName,
    /// Position of the factory within its plugin's list for this slot.
    pub index: usize,
    pub factory: String,
    pub unit: Renderable,
}

/// A factory that failed to build.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactoryFailure {
    pub plugin_id: PluginId,
    pub slot: SlotName,
    pub index: usize,
    pub factory: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FactoryOutcome {
    Resolved(ResolvedComponent),
    Failed(FactoryFailure),
}

impl FactoryOutcome {
    pub fn into_component(self) -> Option<ResolvedComponent> {
        match self {
            Self::Resolved(component) => Some(component),
            Self::Failed(_) => None,
        }
    }
}

/// One pending contribution: which plugin, which position, which factory.
struct Contribution<'a> {
    plugin_id: &'a PluginId,
    index: usize,
    factory: &'a LazyComponent,
}

#[derive(Clone)]
pub struct SlotResolver {
    registry: Arc<ExtensionRegistry>,
}

impl SlotResolver {
    pub fn new(registry: Arc<ExtensionRegistry>) -> Self {
        Self { registry }
    }

    /// Resolver over the process-wide extension registry.
    pub fn global() -> Self {
        Self::new(Arc::clone(registry::extensions()))
    }

    pub fn registry(&self) -> &ExtensionRegistry {
        &self.registry
    }

    /// Number of factories contributed to `slot`, without running any.
    pub fn contribution_count(&self, slot: &SlotName) -> usize {
        self.contributions(slot, |_| true).len()
    }

    fn contributions<F>(&self, slot: &SlotName, include: F) -> Vec<Contribution<'_>>
    where
        F: Fn(&PluginDescriptor) -> bool,
    {
        self.registry
            .iter()
            .filter(|descriptor| include(*descriptor))
            .flat_map(|descriptor| {
                descriptor
                    .factories_for(slot.as_str())
                    .iter()
                    .enumerate()
                    .map(move |(index, factory)| Contribution {
                        plugin_id: &descriptor.id,
                        index,
                        factory,
                    })
            })
            .collect()
    }

    /// Run every factory contributed to `slot` by plugins accepted by
    /// `include`, returning one outcome per factory in slot order.
    pub async fn resolve_outcomes_where<F>(
        &self,
        slot: &SlotName,
        include: F,
    ) -> Vec<FactoryOutcome>
    where
        F: Fn(&PluginDescriptor) -> bool,
    {
        let pending = self
            .contributions(slot, include)
            .into_iter()
            .map(|contribution| async move {
                let factory = contribution.factory.name().to_string();
                let built = AssertUnwindSafe(contribution.factory.load())
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|panic| {
                        Err(anyhow::anyhow!("factory panicked: {}", panic_message(&*panic)))
                    });
                match built {
                    Ok(unit) => FactoryOutcome::Resolved(ResolvedComponent {
                        plugin_id: contribution.plugin_id.clone(),
                        slot: slot.clone(),
                        index: contribution.index,
                        factory,
                        unit,
                    }),
                    Err(e) => FactoryOutcome::Failed(FactoryFailure {
                        plugin_id: contribution.plugin_id.clone(),
                        slot: slot.clone(),
                        index: contribution.index,
                        factory,
                        error: format!("{e:#}"),
                    }),
                }
            });

        let outcomes = join_all(pending).await;

        let failed = outcomes
            .iter()
            .filter(|o| matches!(o, FactoryOutcome::Failed(_)))
            .count();
        for outcome in &outcomes {
            if let FactoryOutcome::Failed(failure) = outcome {
                warn!(
                    plugin = %failure.plugin_id,
                    slot = %failure.slot,
                    factory = %failure.factory,
                    error = %failure.error,
                    "Component factory failed; skipping"
                );
                PluginEventLogger::log_event(PluginEvent::FactoryFailed {
                    plugin_id: failure.plugin_id.to_string(),
                    slot: failure.slot.to_string(),
                    factory: failure.factory.clone(),
                    error_msg: failure.error.clone(),
                });
            }
        }
        debug!(slot = %slot, resolved = outcomes.len() - failed, failed, "Slot resolved");
        PluginEventLogger::log_event(PluginEvent::SlotResolved {
            slot: slot.to_string(),
            resolved: outcomes.len() - failed,
            failed,
        });

        outcomes
    }

    /// Every outcome for `slot`, including failures.
    pub async fn resolve_outcomes(&self, slot: &SlotName) -> Vec<FactoryOutcome> {
        self.resolve_outcomes_where(slot, |_| true).await
    }

    /// Components for `slot` from plugins accepted by `include`.
    pub async fn resolve_where<F>(&self, slot: &SlotName, include: F) -> Vec<ResolvedComponent>
    where
        F: Fn(&PluginDescriptor) -> bool,
    {
        self.resolve_outcomes_where(slot, include)
            .await
            .into_iter()
            .filter_map(FactoryOutcome::into_component)
            .collect()
    }

    /// Components for `slot`. An unknown slot yields an empty list.
    pub async fn resolve(&self, slot: &SlotName) -> Vec<ResolvedComponent> {
        self.resolve_where(slot, |_| true).await
    }
}

/// Text of a caught panic payload.
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{lazy, ready};
    use crate::registry::Registry;
    use pacer_core::PluginCategory;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn panel(name: &str) -> LazyComponent {
        ready(name, Renderable::panel(name, &[]))
    }

    fn resolver(descriptors: Vec<PluginDescriptor>) -> SlotResolver {
        let registry = Registry::from_descriptors(PluginCategory::Extension, descriptors).unwrap();
        SlotResolver::new(Arc::new(registry))
    }

    fn factories(components: &[ResolvedComponent]) -> Vec<&str> {
        components.iter().map(|c| c.factory.as_str()).collect()
    }

    #[tokio::test]
    async fn test_two_plugins_one_factory_each() {
        let resolver = resolver(vec![
            PluginDescriptor::new("maps", "Maps").with_slot("activity.top", panel("RouteMap")),
            PluginDescriptor::new("records", "Records").with_slot("activity.top", panel("Best")),
        ]);

        let resolved = resolver.resolve(&"activity.top".into()).await;
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].plugin_id.as_str(), "maps");
        assert_eq!(resolved[1].plugin_id.as_str(), "records");
        assert!(resolved.iter().all(|c| c.slot.as_str() == "activity.top"));
    }

    #[tokio::test]
    async fn test_unknown_slot_is_empty() {
        let resolver = resolver(vec![
            PluginDescriptor::new("maps", "Maps").with_slot("activity.top", panel("RouteMap")),
        ]);
        assert!(resolver.resolve(&"nonexistent.slot".into()).await.is_empty());
        assert_eq!(resolver.contribution_count(&"nonexistent.slot".into()), 0);
    }

    #[tokio::test]
    async fn test_empty_slot_mapping_contributes_nothing() {
        let resolver = resolver(vec![
            PluginDescriptor::new("quiet", "Quiet").with_empty_slots(),
            PluginDescriptor::new("absent", "Absent"),
            PluginDescriptor::new("maps", "Maps").with_slot("activity.top", panel("RouteMap")),
        ]);

        for slot in ["activity.top", "myactivities.top", "navigation.main"] {
            let resolved = resolver.resolve(&slot.into()).await;
            assert!(resolved.iter().all(|c| c.plugin_id.as_str() == "maps"));
        }
    }

    #[tokio::test]
    async fn test_descriptor_then_declaration_order() {
        // The slower factory comes first; completion order must not leak out.
        let slow = lazy("Slow", || async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(Renderable::panel("Slow", &[]))
        });
        let resolver = resolver(vec![
            PluginDescriptor::new("a", "A")
                .with_slot("activity.top", slow)
                .with_slot("activity.top", panel("A2")),
            PluginDescriptor::new("b", "B").with_slot("navigation.main", panel("Elsewhere")),
            PluginDescriptor::new("c", "C")
                .with_slot("activity.top", panel("C1"))
                .with_slot("activity.top", panel("C2"))
                .with_slot("activity.top", panel("C3")),
        ]);

        let resolved = resolver.resolve(&"activity.top".into()).await;
        assert_eq!(factories(&resolved), vec!["Slow", "A2", "C1", "C2", "C3"]);
        let indexes: Vec<usize> = resolved.iter().map(|c| c.index).collect();
        assert_eq!(indexes, vec![0, 1, 0, 1, 2]);
        assert_eq!(resolver.contribution_count(&"activity.top".into()), 5);
    }

    #[tokio::test]
    async fn test_failing_factory_is_isolated() {
        let broken = lazy("Broken", || async {
            Err::<Renderable, _>(anyhow::anyhow!("chart asset missing"))
        });
        let resolver = resolver(vec![
            PluginDescriptor::new("a", "A")
                .with_slot("activity.top", panel("Before"))
                .with_slot("activity.top", broken),
            PluginDescriptor::new("b", "B").with_slot("activity.top", panel("After")),
        ]);

        let resolved = resolver.resolve(&"activity.top".into()).await;
        assert_eq!(factories(&resolved), vec!["Before", "After"]);

        let outcomes = resolver.resolve_outcomes(&"activity.top".into()).await;
        assert_eq!(outcomes.len(), 3);
        match &outcomes[1] {
            FactoryOutcome::Failed(failure) => {
                assert_eq!(failure.plugin_id.as_str(), "a");
                assert_eq!(failure.index, 1);
                assert!(failure.error.contains("chart asset missing"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_panicking_factory_is_isolated() {
        let exploding = lazy("Exploding", || async {
            let zones: Vec<u32> = Vec::new();
            Ok(Renderable::panel(format!("zone {}", zones[3]), &[]))
        });
        let resolver = resolver(vec![
            PluginDescriptor::new("a", "A").with_slot("activity.top", exploding),
            PluginDescriptor::new("b", "B").with_slot("activity.top", panel("Survivor")),
        ]);

        let outcomes = resolver.resolve_outcomes(&"activity.top".into()).await;
        match &outcomes[0] {
            FactoryOutcome::Failed(failure) => {
                assert_eq!(failure.factory, "Exploding");
                assert!(failure.error.contains("factory panicked"));
                assert!(failure.error.contains("index out of bounds"));
            }
            other => panic!("expected failure, got {other:?}"),
        }

        let resolved = resolver.resolve(&"activity.top".into()).await;
        assert_eq!(factories(&resolved), vec!["Survivor"]);
    }

    #[tokio::test]
    async fn test_every_call_builds_fresh_units() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let counted = lazy("Counted", move || {
            let counter = Arc::clone(&counter);
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                Ok(Renderable::panel(format!("call {n}"), &[]))
            }
        });
        let resolver =
            resolver(vec![PluginDescriptor::new("a", "A").with_slot("activity.top", counted)]);

        let first = resolver.resolve(&"activity.top".into()).await;
        let second = resolver.resolve(&"activity.top".into()).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_ne!(first[0].unit, second[0].unit);
    }

    #[tokio::test]
    async fn test_resolve_where_filters_plugins() {
        let resolver = resolver(vec![
            PluginDescriptor::new("maps", "Maps").with_slot("activity.top", panel("RouteMap")),
            PluginDescriptor::new("records", "Records").with_slot("activity.top", panel("Best")),
        ]);
        let resolved = resolver
            .resolve_where(&"activity.top".into(), |d| d.id.as_str() != "maps")
            .await;
        assert_eq!(factories(&resolved), vec!["Best"]);
    }
}
