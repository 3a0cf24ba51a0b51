//! Pacer runtime configuration management.
//!
//! Provides:
//! - Typed config schema (logging, plugin state store, disabled plugins)
//! - YAML read/write with atomic backup rotation
//! - `PACER_*` environment overrides
//! - Default value application
//! - Validation with errors and warnings

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, apply_env_overrides_with};
pub use io::{config_dir, config_file_path, load_config, write_config};
pub use schema::{LoggingConfig, PacerConfig, PluginsConfig, StoreBackend, StoreConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use std::path::Path;

/// Load, apply env overrides, apply defaults and validate a config file.
///
/// This is the main entry point for loading a config at runtime. Validation
/// warnings are logged; validation errors fail the load.
pub async fn load_and_prepare(path: &Path) -> Result<PacerConfig> {
    let config = load_config(path).await?;
    let config = apply_env_overrides(config).context("Invalid environment override")?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let config = apply_all_defaults(config, base_dir);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if let Some(first) = report.errors.into_iter().next() {
        return Err(first.into());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_and_prepare_defaults_store_next_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(&path, "plugins:\n  disabled: [gear]\n").unwrap();

        let config = load_and_prepare(&path).await.unwrap();
        assert_eq!(config.store_backend(), StoreBackend::File);
        assert_eq!(
            config.store_path().map(|p| p.as_path()),
            Some(dir.path().join(defaults::STORE_FILE_NAME).as_path())
        );
        assert_eq!(config.disabled_plugins(), ["gear".to_string()]);
    }
}
