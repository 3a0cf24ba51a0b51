//! Strava sync. Needs an API application registered by the user.
use pacer_core::{FieldKind, FormField, Renderable};
use pacer_plugins::{ProviderDescriptor, lazy, register_data_provider};

pub const ID: &str = "strava";

pub fn descriptor() -> ProviderDescriptor {
    ProviderDescriptor::new(
        ID,
        "Strava",
        lazy("StravaSetup", || async {
            Ok(Renderable::Form {
                title: "Connect Strava".into(),
                fields: vec![
                    FormField::new("client_id", "Client ID", FieldKind::Text).required(),
                    FormField::new("client_secret", "Client secret", FieldKind::Secret).required(),
                    FormField::new(
                        "include_private",
                        "Import private activities",
                        FieldKind::Toggle,
                    ),
                ],
            })
        }),
    )
    .with_icon("strava")
}

register_data_provider!(descriptor);
