use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tracing::{info, warn};

use pacer_config::{PacerConfig, StoreBackend};
use pacer_core::PluginId;
use pacer_plugins::{JsonFileStore, MemoryStore, PluginStateStore, StoreError, UnavailableStore};

fn resolve_path(path: Option<&Path>) -> PathBuf {
    match path {
        Some(path) => path.to_path_buf(),
        None => pacer_config::config_file_path(&pacer_config::config_dir()),
    }
}

/// Load the config from `path`, or from the default location when unset.
pub async fn load(path: Option<&Path>) -> Result<PacerConfig> {
    pacer_config::load_and_prepare(&resolve_path(path)).await
}

/// Write a starter config with every default spelled out.
pub async fn init(path: Option<&Path>, force: bool) -> Result<PathBuf> {
    let path = resolve_path(path);
    if path.exists() && !force {
        bail!("{} already exists; pass --force to overwrite it", path.display());
    }
    let config_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let config = pacer_config::apply_all_defaults(PacerConfig::default(), config_dir);
    pacer_config::write_config(&config, &path).await?;
    Ok(path)
}

/// Build the plugin state store the config asks for.
///
/// Plugins listed under `plugins.disabled` stay off whatever the store says.
pub fn build_store(config: &PacerConfig) -> Arc<dyn PluginStateStore> {
    let inner: Arc<dyn PluginStateStore> = match (config.store_backend(), config.store_path()) {
        (StoreBackend::File, Some(path)) => Arc::new(JsonFileStore::new(path.clone())),
        (StoreBackend::File, None) => Arc::new(UnavailableStore::new("file store has no path")),
        (StoreBackend::Memory, _) => Arc::new(MemoryStore::new()),
        (StoreBackend::None, _) => Arc::new(UnavailableStore::default()),
    };
    info!(store = inner.name(), "Plugin state store ready");

    let pinned_off: HashSet<PluginId> = config
        .disabled_plugins()
        .iter()
        .map(|id| PluginId::from(id.as_str()))
        .collect();
    if pinned_off.is_empty() {
        inner
    } else {
        Arc::new(PinnedStore { inner, pinned_off })
    }
}

/// Layers the config's disabled list over another store.
struct PinnedStore {
    inner: Arc<dyn PluginStateStore>,
    pinned_off: HashSet<PluginId>,
}

#[async_trait]
impl PluginStateStore for PinnedStore {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn enabled_overrides(&self) -> Result<HashMap<PluginId, bool>, StoreError> {
        let mut overrides = self.inner.enabled_overrides().await?;
        for id in &self.pinned_off {
            overrides.insert(id.clone(), false);
        }
        Ok(overrides)
    }

    async fn set_enabled(&self, id: &PluginId, enabled: bool) -> Result<(), StoreError> {
        if enabled && self.pinned_off.contains(id) {
            warn!(
                plugin = %id,
                "Plugin is disabled in the config file; it stays off until removed there"
            );
        }
        self.inner.set_enabled(id, enabled).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacer_config::{PluginsConfig, StoreConfig};

    fn config(backend: StoreBackend, disabled: &[&str]) -> PacerConfig {
        PacerConfig {
            store: Some(StoreConfig {
                backend: Some(backend),
                path: None,
            }),
            plugins: Some(PluginsConfig {
                disabled: disabled.iter().map(|s| s.to_string()).collect(),
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        assert_eq!(init(Some(path.as_path()), false).await.unwrap(), path);
        let loaded = pacer_config::load_config(&path).await.unwrap();
        assert_eq!(loaded.store_backend(), StoreBackend::File);
        assert_eq!(
            loaded.store_path().cloned(),
            Some(dir.path().join("plugins.json"))
        );

        let err = init(Some(path.as_path()), false).await.unwrap_err();
        assert!(err.to_string().contains("--force"));

        init(Some(path.as_path()), true).await.unwrap();
        assert!(path.with_extension("yaml.bak.1").exists());
    }

    #[tokio::test]
    async fn test_config_disabled_wins_over_store() {
        let store = build_store(&config(StoreBackend::Memory, &["gear"]));
        store.set_enabled(&PluginId::from("gear"), true).await.unwrap();
        store.set_enabled(&PluginId::from("route-map"), false).await.unwrap();

        let overrides = store.enabled_overrides().await.unwrap();
        assert_eq!(overrides.get("gear"), Some(&false));
        assert_eq!(overrides.get("route-map"), Some(&false));
        assert!(store.is_enabled(&PluginId::from("weekly-summary")).await.unwrap());
    }

    #[tokio::test]
    async fn test_no_backend_is_unavailable() {
        let store = build_store(&config(StoreBackend::None, &["gear"]));
        let err = store.enabled_overrides().await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_file_backend_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plugins.json");
        let mut cfg = config(StoreBackend::File, &[]);
        cfg.store = Some(StoreConfig {
            backend: Some(StoreBackend::File),
            path: Some(path.clone()),
        });

        build_store(&cfg)
            .set_enabled(&PluginId::from("gear"), false)
            .await
            .unwrap();
        let reopened = build_store(&cfg);
        assert!(!reopened.is_enabled(&PluginId::from("gear")).await.unwrap());
        assert!(path.exists());
    }
}
