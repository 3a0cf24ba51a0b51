//! Environment overrides for config values.
//!
//! | variable | overrides |
//! |---|---|
//! | `PACER_LOG_LEVEL` | `logging.level` |
//! | `PACER_LOG_DIR` | `logging.dir` |
//! | `PACER_STORE_BACKEND` | `store.backend` (`file`, `memory`, `none`) |
//! | `PACER_STORE_PATH` | `store.path` |
//! | `PACER_DISABLED_PLUGINS` | `plugins.disabled` (comma separated) |

use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::schema::{LoggingConfig, PacerConfig, PluginsConfig, StoreBackend, StoreConfig};

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: PacerConfig) -> Result<PacerConfig> {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Apply overrides from a provided map (useful for testing).
pub fn apply_env_overrides_with(
    mut config: PacerConfig,
    env: &HashMap<String, String>,
) -> Result<PacerConfig> {
    let get = |key: &str| env.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

    if let Some(level) = get("PACER_LOG_LEVEL") {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(level.to_string());
    }
    if let Some(dir) = get("PACER_LOG_DIR") {
        config.logging.get_or_insert_with(LoggingConfig::default).dir = Some(PathBuf::from(dir));
    }
    if let Some(backend) = get("PACER_STORE_BACKEND") {
        let backend: StoreBackend = backend
            .parse()
            .map_err(|e: String| anyhow!("PACER_STORE_BACKEND: {e}"))?;
        config.store.get_or_insert_with(StoreConfig::default).backend = Some(backend);
    }
    if let Some(path) = get("PACER_STORE_PATH") {
        config.store.get_or_insert_with(StoreConfig::default).path = Some(PathBuf::from(path));
    }
    if let Some(list) = get("PACER_DISABLED_PLUGINS") {
        config.plugins.get_or_insert_with(PluginsConfig::default).disabled = list
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn overrides_store_and_logging() {
        let env = env(&[
            ("PACER_STORE_BACKEND", "none"),
            ("PACER_LOG_LEVEL", "debug"),
            ("PACER_DISABLED_PLUGINS", "gear, route-map,,"),
        ]);
        let config = apply_env_overrides_with(PacerConfig::default(), &env).unwrap();
        assert_eq!(config.store_backend(), StoreBackend::None);
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.disabled_plugins(), ["gear".to_string(), "route-map".to_string()]);
    }

    #[test]
    fn blank_values_are_ignored() {
        let env = env(&[("PACER_STORE_PATH", "   ")]);
        let config = apply_env_overrides_with(PacerConfig::default(), &env).unwrap();
        assert!(config.store.is_none());
    }

    #[test]
    fn error_on_unknown_backend() {
        let env = env(&[("PACER_STORE_BACKEND", "indexeddb")]);
        let err = apply_env_overrides_with(PacerConfig::default(), &env).unwrap_err();
        assert!(err.to_string().contains("PACER_STORE_BACKEND"));
    }
}
