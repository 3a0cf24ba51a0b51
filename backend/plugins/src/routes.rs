/// Routes and settings tabs contributed by extension plugins.
use serde::Serialize;
use std::collections::HashSet;
use tracing::warn;

use pacer_core::PluginId;

use crate::descriptor::RouteDef;
use crate::registry::ExtensionRegistry;

/// A route together with the plugin that declared it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginRoute {
    pub plugin_id: PluginId,
    #[serde(flatten)]
    pub route: RouteDef,
}

/// A settings tab a plugin asks the host to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginTab {
    pub plugin_id: PluginId,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub metadata: serde_json::Value,
}

impl PluginTab {
    /// Sort key from the metadata's `order` field; tabs without one go last.
    fn order(&self) -> i64 {
        self.metadata
            .get("order")
            .and_then(serde_json::Value::as_i64)
            .unwrap_or(i64::MAX)
    }
}

/// Flatten every plugin's routes in registry order.
///
/// Two plugins claiming the same path is a plugin bug; the first one keeps it.
pub fn collect_routes(registry: &ExtensionRegistry) -> Vec<PluginRoute> {
    let mut claimed: HashSet<&str> = HashSet::new();
    let mut routes = Vec::new();
    for descriptor in registry {
        for route in &descriptor.routes {
            if !claimed.insert(route.path.as_str()) {
                warn!(
                    plugin = %descriptor.id,
                    path = %route.path,
                    "Route path already claimed by another plugin; ignoring"
                );
                continue;
            }
            routes.push(PluginRoute {
                plugin_id: descriptor.id.clone(),
                route: route.clone(),
            });
        }
    }
    routes
}

/// Plugins carrying tab metadata, ordered by `order` then label.
pub fn plugin_tabs(registry: &ExtensionRegistry) -> Vec<PluginTab> {
    let mut tabs: Vec<PluginTab> = registry
        .iter()
        .filter_map(|descriptor| {
            descriptor.tab_metadata.as_ref().map(|metadata| PluginTab {
                plugin_id: descriptor.id.clone(),
                label: descriptor.label.clone(),
                icon: descriptor.icon.clone(),
                metadata: metadata.clone(),
            })
        })
        .collect();
    tabs.sort_by(|a, b| a.order().cmp(&b.order()).then_with(|| a.label.cmp(&b.label)));
    tabs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::PluginDescriptor;
    use crate::registry::Registry;
    use pacer_core::PluginCategory;
    use serde_json::json;

    fn registry(descriptors: Vec<PluginDescriptor>) -> ExtensionRegistry {
        Registry::from_descriptors(PluginCategory::Extension, descriptors).unwrap()
    }

    #[test]
    fn test_collect_routes_first_claim_wins() {
        let registry = registry(vec![
            PluginDescriptor::new("maps", "Maps")
                .with_route(RouteDef::new("/maps", "maps", "MapsPage"))
                .with_route(RouteDef::new("/maps/:id", "map-detail", "MapDetailPage")),
            PluginDescriptor::new("heatmap", "Heatmap")
                .with_route(RouteDef::new("/maps", "heatmap", "HeatmapPage")),
            PluginDescriptor::new("records", "Records")
                .with_route(RouteDef::new("/records", "records", "RecordsPage")),
        ]);

        let routes = collect_routes(&registry);
        let paths: Vec<(&str, &str)> = routes
            .iter()
            .map(|r| (r.plugin_id.as_str(), r.route.path.as_str()))
            .collect();
        assert_eq!(
            paths,
            vec![("maps", "/maps"), ("maps", "/maps/:id"), ("records", "/records")]
        );
    }

    #[test]
    fn test_route_serializes_flat() {
        let route = PluginRoute {
            plugin_id: "maps".into(),
            route: RouteDef::new("/maps", "maps", "MapsPage"),
        };
        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json["plugin_id"], "maps");
        assert_eq!(json["path"], "/maps");
    }

    #[test]
    fn test_plugin_tabs_ordering() {
        let registry = registry(vec![
            PluginDescriptor::new("zones", "Zones").with_tab_metadata(json!({ "order": 2 })),
            PluginDescriptor::new("plain", "Plain"),
            PluginDescriptor::new("records", "Records").with_tab_metadata(json!({})),
            PluginDescriptor::new("maps", "Maps").with_tab_metadata(json!({ "order": 1 })),
            PluginDescriptor::new("gear", "Gear").with_tab_metadata(json!({ "title": "Gear" })),
        ]);

        let labels: Vec<String> = plugin_tabs(&registry).into_iter().map(|t| t.label).collect();
        assert_eq!(labels, vec!["Maps", "Zones", "Gear", "Records"]);
    }
}
