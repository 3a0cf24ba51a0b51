//! Data and storage provider commands.

use anyhow::{anyhow, Result};
use std::collections::BTreeMap;

use pacer_core::FieldKind;
use pacer_plugins::{data_providers, resolve_setup, storage_providers, ProviderDescriptor};

use crate::terminal_output::{note_success, render_table};

pub fn list() -> Result<()> {
    let rows: Vec<Vec<String>> = [data_providers(), storage_providers()]
        .into_iter()
        .flat_map(|registry| {
            registry.iter().map(move |p| {
                vec![
                    p.id.to_string(),
                    p.label.clone(),
                    registry.category().to_string(),
                    p.setup_component.name().to_string(),
                ]
            })
        })
        .collect();
    print!("{}", render_table(&["ID", "Label", "Category", "Setup"], &rows));
    Ok(())
}

fn find(id: &str) -> Result<&'static ProviderDescriptor> {
    data_providers()
        .get(id)
        .or_else(|| storage_providers().get(id))
        .ok_or_else(|| anyhow!("Unknown provider '{id}'"))
}

/// Print a provider's setup form, or check `settings` against it.
pub async fn setup(id: &str, settings: Vec<(String, String)>) -> Result<()> {
    let provider = find(id)?;
    let form = resolve_setup(provider).await?;

    if settings.is_empty() {
        println!("{}", serde_json::to_string_pretty(&form)?);
        return Ok(());
    }

    let settings: BTreeMap<String, String> = settings.into_iter().collect();
    form.apply(&settings)?;
    let shown: Vec<String> = form
        .fields
        .iter()
        .filter(|f| settings.contains_key(&f.key))
        .map(|f| match f.kind {
            FieldKind::Secret => format!("{}=***", f.key),
            _ => format!("{}={}", f.key, settings[&f.key]),
        })
        .collect();
    note_success(&format!("{} settings accepted: {}", provider.label, shown.join(", ")));
    Ok(())
}

/// Parse a `key=value` pair from the command line.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("url=https://dav.example.org/a=b").unwrap(),
            ("url".to_string(), "https://dav.example.org/a=b".to_string())
        );
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
    }
}
