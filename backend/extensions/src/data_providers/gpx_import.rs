use pacer_core::{FieldKind, FormField, Renderable};
use pacer_plugins::{ProviderDescriptor, ready, register_data_provider};

pub const ID: &str = "gpx-import";

pub fn descriptor() -> ProviderDescriptor {
    ProviderDescriptor::new(
        ID,
        "GPX / FIT files",
        ready(
            "GpxImportSetup",
            Renderable::Form {
                title: "Import activity files".into(),
                fields: vec![
                    FormField::new("files", "Activity files", FieldKind::File).required(),
                    FormField::new("dedupe", "Skip already imported", FieldKind::Toggle),
                ],
            },
        ),
    )
    .with_icon("upload")
}

register_data_provider!(descriptor);
