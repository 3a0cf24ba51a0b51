use pacer_core::{FieldKind, FormField, Renderable};
use pacer_plugins::{ProviderDescriptor, ready, register_storage_provider};

pub const ID: &str = "local-folder";

pub fn descriptor() -> ProviderDescriptor {
    ProviderDescriptor::new(
        ID,
        "Local folder",
        ready(
            "LocalFolderSetup",
            Renderable::Form {
                title: "Store activities in a folder".into(),
                fields: vec![FormField::new("path", "Folder", FieldKind::Text).required()],
            },
        ),
    )
    .with_icon("folder")
}

register_storage_provider!(descriptor);
