//! WebDAV storage (Nextcloud, ownCloud and friends).
use pacer_core::{FieldKind, FormField, Renderable};
use pacer_plugins::{ProviderDescriptor, lazy, register_storage_provider};

pub const ID: &str = "webdav";

pub fn descriptor() -> ProviderDescriptor {
    ProviderDescriptor::new(
        ID,
        "WebDAV",
        lazy("WebDavSetup", || async {
            Ok(Renderable::Form {
                title: "Connect a WebDAV server".into(),
                fields: vec![
                    FormField::new("url", "Server URL", FieldKind::Url).required(),
                    FormField::new("username", "Username", FieldKind::Text).required(),
                    FormField::new("password", "Password", FieldKind::Secret).required(),
                    FormField::new("folder", "Remote folder", FieldKind::Text),
                ],
            })
        }),
    )
    .with_icon("cloud")
}

register_storage_provider!(descriptor);
