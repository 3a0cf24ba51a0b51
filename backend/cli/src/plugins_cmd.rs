//! Extension plugin commands: listing, routes, tabs and enablement.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;

use pacer_core::{PacerError, PluginId};
use pacer_plugins::{
    collect_routes, extensions, plugin_tabs, DescriptorSummary, ExtensionRegistry, PluginStateStore,
};

use crate::terminal_output::{note_success, note_warn, paint, render_table, DIM, GREEN, RED};

pub async fn list(store: &dyn PluginStateStore, json: bool) -> Result<()> {
    let registry = extensions();
    let overrides = match store.enabled_overrides().await {
        Ok(overrides) => Some(overrides),
        Err(e) => {
            note_warn(&format!("Enablement unknown: {e}"));
            None
        }
    };

    if json {
        let listing = listings(registry, overrides.as_ref());
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }
    let table = rows(registry, overrides.as_ref());
    print!(
        "{}",
        render_table(&["ID", "Label", "Slots", "Routes", "Enabled"], &table)
    );
    Ok(())
}

/// One plugin in `pacer plugins --json`. `enabled` is absent when the store
/// could not be read.
#[derive(Debug, Serialize)]
struct PluginListing {
    #[serde(flatten)]
    summary: DescriptorSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    enabled: Option<bool>,
}

fn listings(
    registry: &ExtensionRegistry,
    overrides: Option<&HashMap<PluginId, bool>>,
) -> Vec<PluginListing> {
    registry
        .iter()
        .map(|d| PluginListing {
            summary: DescriptorSummary::from(d),
            enabled: overrides.map(|o| o.get(&d.id).copied().unwrap_or(true)),
        })
        .collect()
}

fn rows(
    registry: &ExtensionRegistry,
    overrides: Option<&HashMap<PluginId, bool>>,
) -> Vec<Vec<String>> {
    registry
        .iter()
        .map(|d| {
            let slots: Vec<&str> = d.slot_names().into_iter().map(|s| s.as_str()).collect();
            let routes: Vec<&str> = d.routes.iter().map(|r| r.path.as_str()).collect();
            let enabled = match overrides {
                Some(o) if o.get(&d.id).copied().unwrap_or(true) => paint(GREEN, "yes"),
                Some(_) => paint(RED, "no"),
                None => paint(DIM, "?"),
            };
            vec![
                d.id.to_string(),
                d.label.clone(),
                slots.join(", "),
                routes.join(", "),
                enabled,
            ]
        })
        .collect()
}

pub fn routes() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&collect_routes(extensions()))?);
    Ok(())
}

pub fn tabs() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&plugin_tabs(extensions()))?);
    Ok(())
}

/// Record an enable/disable choice for an extension plugin.
pub async fn set_enabled(store: &dyn PluginStateStore, id: &str, enabled: bool) -> Result<()> {
    let descriptor = extensions().require(id)?;
    store
        .set_enabled(&descriptor.id, enabled)
        .await
        .map_err(PacerError::from)?;
    note_success(&format!(
        "{} {}",
        if enabled { "Enabled" } else { "Disabled" },
        descriptor.label
    ));
    Ok(())
}
