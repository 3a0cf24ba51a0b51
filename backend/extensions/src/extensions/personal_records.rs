//! Personal bests, on the activity page and in the activity list.
use pacer_core::Renderable;
use pacer_plugins::{PluginDescriptor, RouteDef, ready, register_extension};
use serde_json::json;

pub const ID: &str = "personal-records";

pub fn descriptor() -> PluginDescriptor {
    PluginDescriptor::new(ID, "Personal records")
        .with_icon("trophy")
        .with_description("Highlights personal bests for standard distances.")
        .with_slot(
            "activity.top",
            ready(
                "ActivityRecords",
                Renderable::panel("Records set", &["Fastest 5 km", "Longest climb"]),
            ),
        )
        .with_slot(
            "myactivities.top",
            ready(
                "RecentRecords",
                Renderable::panel("Recent records", &["5 km", "10 km", "Half marathon"]),
            ),
        )
        .with_slot(
            "navigation.main",
            ready("RecordsLink", Renderable::link("Records", "/records", Some("trophy"))),
        )
        .with_route(RouteDef::new("/records", "records", "RecordsPage"))
        .with_tab_metadata(json!({ "title": "Records", "order": 1 }))
}

register_extension!(descriptor);
