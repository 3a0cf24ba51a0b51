//! Storage providers: where activities are kept.

pub mod local_folder;
pub mod webdav;
