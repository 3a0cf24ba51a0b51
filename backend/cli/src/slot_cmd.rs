//! `pacer slot`: resolve one slot the way a rendering surface would.

use anyhow::Result;
use serde_json::json;
use std::sync::Arc;

use pacer_core::SlotName;
use pacer_plugins::{
    use_plugin_components, BindingState, PluginStateStore, SlotResolver, StoreBackedSource,
};

use crate::terminal_output::note_warn;

pub async fn run(name: String, all: bool, store: Arc<dyn PluginStateStore>) -> Result<()> {
    let slot = SlotName::from(name);
    let resolver = SlotResolver::global();

    if all {
        // Every factory outcome, failures included, ignoring enablement.
        let outcomes = resolver.resolve_outcomes(&slot).await;
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
        return Ok(());
    }

    let source = Arc::new(StoreBackedSource::new(resolver, store));
    let binding = Arc::new(use_plugin_components(slot, source));
    binding.mount().await?;
    let snapshot = binding.settled().await;

    if snapshot.state == BindingState::EmptyOnFailure {
        note_warn(&format!(
            "Slot '{}' rendered empty: plugin state store unreadable",
            binding.slot()
        ));
    }
    let out = json!({
        "slot": binding.slot(),
        "state": snapshot.state,
        "components": &*snapshot.components,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);

    if let Ok(binding) = Arc::try_unwrap(binding) {
        binding.unmount();
    }
    Ok(())
}
