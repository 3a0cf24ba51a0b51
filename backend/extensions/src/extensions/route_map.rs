//! Map of the recorded GPS track above an activity.
use pacer_core::{ChartKind, Renderable};
use pacer_plugins::{PluginDescriptor, RouteDef, lazy, ready, register_extension};

pub const ID: &str = "route-map";

pub fn descriptor() -> PluginDescriptor {
    PluginDescriptor::new(ID, "Route map")
        .with_icon("map")
        .with_description("Shows the GPS track of an activity on a map.")
        .with_slot(
            "activity.top",
            lazy("RouteMap", || async {
                Ok(Renderable::Chart {
                    title: "Route".into(),
                    metric: "position".into(),
                    unit: None,
                    chart: ChartKind::Map,
                })
            }),
        )
        .with_slot(
            "navigation.main",
            ready("RouteMapLink", Renderable::link("Maps", "/maps", Some("map"))),
        )
        .with_route(RouteDef::new("/maps", "maps", "MapsPage"))
}

register_extension!(descriptor);
