//! Structured logging for Pacer.
//!
//! Handles subscriber setup (console + rolling JSON file), typed plugin events
//! and scrubbing of provider credentials before anything reaches a log.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{PluginEvent, PluginEventEntry, PluginEventLogger};
pub use logger::{LOG_FILE_PREFIX, init_logger};
pub use redact::redact_sensitive_data;
