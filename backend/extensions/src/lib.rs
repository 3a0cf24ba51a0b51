//! Plugins bundled with Pacer.
//!
//! Layout follows the plugin categories: `extensions/` for slot extensions,
//! `data_providers/` and `storage_providers/` for providers. Adding a plugin
//! means adding a module that calls the matching `register_*!` macro; the
//! registries in `pacer-plugins` pick it up without further wiring.
//!
//! Binaries that want these plugins must link the crate, e.g. with
//! `use pacer_extensions as _;`.

pub mod data_providers;
pub mod extensions;
pub mod storage_providers;
