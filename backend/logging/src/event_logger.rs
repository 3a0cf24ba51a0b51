//! Plugin Event Logger
//!
//! Typed events about slot resolution and provider setup, emitted on the
//! `plugin_events` target so they can be filtered or routed separately.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum PluginEvent {
    SlotResolved {
        slot: String,
        resolved: usize,
        failed: usize,
    },
    FactoryFailed {
        plugin_id: String,
        slot: String,
        factory: String,
        error_msg: String,
    },
    StoreUnavailable {
        slot: String,
        error_msg: String,
    },
    ProviderConfigured {
        provider_id: String,
        settings_json: String,
    },
}

#[derive(Debug, Serialize)]
pub struct PluginEventEntry {
    pub timestamp: DateTime<Utc>,
    pub event: PluginEvent,
}

impl PluginEventEntry {
    pub fn new(mut event: PluginEvent) -> Self {
        match &mut event {
            PluginEvent::FactoryFailed { error_msg, .. }
            | PluginEvent::StoreUnavailable { error_msg, .. } => {
                *error_msg = redact_sensitive_data(error_msg);
            }
            PluginEvent::ProviderConfigured { settings_json, .. } => {
                *settings_json = redact_sensitive_data(settings_json);
            }
            PluginEvent::SlotResolved { .. } => {}
        }
        Self {
            timestamp: Utc::now(),
            event,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self.event))
    }
}

pub struct PluginEventLogger;

impl PluginEventLogger {
    /// Redacts and emits a plugin event through `tracing`.
    pub fn log_event(event: PluginEvent) -> PluginEventEntry {
        let entry = PluginEventEntry::new(event);
        info!(target: "plugin_events", event = %entry.to_json(), "Plugin event");
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_settings_are_redacted() {
        let entry = PluginEventLogger::log_event(PluginEvent::ProviderConfigured {
            provider_id: "webdav".into(),
            settings_json: r#"{"url":"https://me:pw@dav.example.org","password":"pw"}"#.into(),
        });
        let json = entry.to_json();
        assert!(!json.contains(":pw@"));
        assert!(json.contains("\"type\":\"ProviderConfigured\""));
    }

    #[test]
    fn test_passphrase_with_spaces_is_redacted_whole() {
        let entry = PluginEventEntry::new(PluginEvent::ProviderConfigured {
            provider_id: "webdav".into(),
            settings_json: r#"{"password":"correct horse, battery staple","url":"https://dav.example.org"}"#
                .into(),
        });
        let json = entry.to_json();
        assert!(!json.contains("horse"));
        assert!(!json.contains("staple"));
        assert!(json.contains("dav.example.org"));
    }

    #[test]
    fn test_slot_resolved_passthrough() {
        let entry = PluginEventEntry::new(PluginEvent::SlotResolved {
            slot: "activity.top".into(),
            resolved: 2,
            failed: 0,
        });
        let value: serde_json::Value = serde_json::from_str(&entry.to_json()).unwrap();
        assert_eq!(value["event"]["slot"], "activity.top");
        assert_eq!(value["event"]["resolved"], 2);
    }
}
