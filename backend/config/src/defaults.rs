//! Config defaults: applies default values to parsed config.

use std::path::Path;

use crate::schema::{LoggingConfig, PacerConfig, StoreBackend, StoreConfig};

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File name of the plugin state store inside the config directory.
pub const STORE_FILE_NAME: &str = "plugins.json";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: PacerConfig, config_dir: &Path) -> PacerConfig {
    let config = apply_logging_defaults(config);
    apply_store_defaults(config, config_dir)
}

fn apply_logging_defaults(mut config: PacerConfig) -> PacerConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    config
}

/// File-backed stores default to `<config dir>/plugins.json`.
fn apply_store_defaults(mut config: PacerConfig, config_dir: &Path) -> PacerConfig {
    let store = config.store.get_or_insert_with(StoreConfig::default);
    let backend = *store.backend.get_or_insert(StoreBackend::File);
    if backend == StoreBackend::File && store.path.is_none() {
        store.path = Some(config_dir.join(STORE_FILE_NAME));
    }
    config
}
