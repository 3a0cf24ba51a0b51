//! Gear tracking. Lives on its own page and settings tab, fills no slot.
use pacer_plugins::{PluginDescriptor, RouteDef, register_extension};
use serde_json::json;

pub const ID: &str = "gear";

pub fn descriptor() -> PluginDescriptor {
    PluginDescriptor::new(ID, "Gear")
        .with_icon("shoe")
        .with_description("Tracks mileage per pair of shoes and bike.")
        .with_empty_slots()
        .with_route(RouteDef::new("/gear", "gear", "GearPage"))
        .with_tab_metadata(json!({ "title": "Gear" }))
}

register_extension!(descriptor);
