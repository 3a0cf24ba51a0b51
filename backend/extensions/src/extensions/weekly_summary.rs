//! Weekly distance and time above the activity list.
use pacer_core::{ChartKind, Renderable};
use pacer_plugins::{PluginDescriptor, lazy, register_extension};

pub const ID: &str = "weekly-summary";

pub fn descriptor() -> PluginDescriptor {
    PluginDescriptor::new(ID, "Weekly summary")
        .with_icon("calendar")
        .with_slot(
            "myactivities.top",
            lazy("WeeklyDistance", || async {
                Ok(Renderable::Chart {
                    title: "Distance per week".into(),
                    metric: "distance".into(),
                    unit: Some("km".into()),
                    chart: ChartKind::Bar,
                })
            }),
        )
}

register_extension!(descriptor);
