pub mod error;
pub mod render;
pub mod types;

pub use error::PacerError;
pub use render::{ChartKind, FieldKind, FormField, Renderable};
pub use types::{PluginCategory, PluginId, SlotName};
