//! Config validation: checks with user-friendly error messages.

use crate::schema::{PacerConfig, StoreBackend};
use std::collections::HashSet;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &PacerConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_logging(config, &mut report);
    validate_store(config, &mut report);
    validate_plugins(config, &mut report);
    report
}

fn validate_logging(config: &PacerConfig, report: &mut ValidationReport) {
    let Some(level) = config.logging.as_ref().and_then(|l| l.level.as_deref()) else {
        return;
    };
    // Full filter directives ("pacer_plugins=debug") are allowed too.
    if !level.contains('=') && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        report.warn("logging.level", format!("Unknown log level '{level}'"));
    }
}

fn validate_store(config: &PacerConfig, report: &mut ValidationReport) {
    match config.store_backend() {
        StoreBackend::File if config.store_path().is_none() => {
            report.error("store.path", "File store requires a path");
        }
        StoreBackend::Memory | StoreBackend::None if config.store_path().is_some() => {
            report.warn("store.path", "Path is ignored by the selected store backend");
        }
        StoreBackend::None => {
            report.warn("store.backend", "No store: plugin enable/disable choices cannot be saved");
        }
        _ => {}
    }
}

fn validate_plugins(config: &PacerConfig, report: &mut ValidationReport) {
    let mut seen = HashSet::new();
    for id in config.disabled_plugins() {
        if id.trim().is_empty() {
            report.error("plugins.disabled", "Plugin id cannot be empty");
        } else if !seen.insert(id.as_str()) {
            report.warn("plugins.disabled", format!("Plugin '{id}' listed twice"));
        }
    }
}
