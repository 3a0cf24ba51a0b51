/// Provider setup: build the configuration form of a data or storage provider.
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use pacer_core::{FieldKind, FormField, PacerError, PluginId, Renderable};
use pacer_logging::{PluginEvent, PluginEventLogger};

use crate::descriptor::ProviderDescriptor;

const SECRET_MASK: &str = "***";

/// The setup form of one provider, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderSetup {
    pub provider_id: PluginId,
    pub title: String,
    pub fields: Vec<FormField>,
}

impl ProviderSetup {
    /// Keys of the fields a user must fill in.
    pub fn required_keys(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.key.as_str())
            .collect()
    }

    /// Check user-supplied settings against the form and return them as JSON.
    ///
    /// Unknown keys are rejected, as are missing or blank required fields.
    pub fn apply(
        &self,
        settings: &BTreeMap<String, String>,
    ) -> Result<serde_json::Value, PacerError> {
        if let Some(unknown) = settings
            .keys()
            .find(|key| !self.fields.iter().any(|f| &f.key == *key))
        {
            return Err(PacerError::ConfigError(format!(
                "provider '{}' has no setting '{}'",
                self.provider_id, unknown
            )));
        }
        let missing: Vec<&str> = self
            .required_keys()
            .into_iter()
            .filter(|key| settings.get(*key).is_none_or(|v| v.trim().is_empty()))
            .collect();
        if !missing.is_empty() {
            return Err(PacerError::ConfigError(format!(
                "provider '{}' is missing required settings: {}",
                self.provider_id,
                missing.join(", ")
            )));
        }

        let value = serde_json::to_value(settings)
            .map_err(|e| PacerError::ConfigError(e.to_string()))?;
        PluginEventLogger::log_event(PluginEvent::ProviderConfigured {
            provider_id: self.provider_id.to_string(),
            settings_json: self.masked(settings).to_string(),
        });
        Ok(value)
    }

    /// The settings with every secret field's value replaced.
    fn masked(&self, settings: &BTreeMap<String, String>) -> serde_json::Value {
        settings
            .iter()
            .map(|(key, value)| {
                let secret = self
                    .fields
                    .iter()
                    .any(|f| &f.key == key && f.kind == FieldKind::Secret);
                let shown = if secret { SECRET_MASK } else { value.as_str() };
                (key.clone(), serde_json::Value::from(shown))
            })
            .collect::<serde_json::Map<_, _>>()
            .into()
    }
}

/// Run the provider's setup factory. It must produce a form.
pub async fn resolve_setup(provider: &ProviderDescriptor) -> Result<ProviderSetup, PacerError> {
    let factory = &provider.setup_component;
    let unit = factory
        .load()
        .await
        .map_err(|e| PacerError::FactoryFailed {
            plugin: provider.id.to_string(),
            factory: factory.name().to_string(),
            message: format!("{e:#}"),
        })?;

    match unit {
        Renderable::Form { title, fields } => {
            debug!(provider = %provider.id, fields = fields.len(), "Resolved provider setup");
            Ok(ProviderSetup {
                provider_id: provider.id.clone(),
                title,
                fields,
            })
        }
        other => Err(PacerError::invalid(
            provider.id.as_str(),
            format!("setup component resolved to a {} instead of a form", other.kind()),
        )),
    }
}
