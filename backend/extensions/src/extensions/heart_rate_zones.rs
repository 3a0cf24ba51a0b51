//! Time spent per heart rate zone.
use anyhow::ensure;
use serde_json::json;

use pacer_core::{ChartKind, Renderable};
use pacer_plugins::{PluginDescriptor, lazy, register_extension};

pub const ID: &str = "heart-rate-zones";

/// Max heart rate assumed until the athlete enters their own.
const DEFAULT_MAX_HR: u32 = 190;

/// Upper bound of each zone as a share of max heart rate.
const ZONE_CEILINGS: [u32; 5] = [60, 70, 80, 90, 100];

/// Zone boundaries in bpm for a given max heart rate.
pub fn zone_bounds(max_hr: u32) -> anyhow::Result<Vec<(u32, u32)>> {
    ensure!(max_hr >= 100, "max heart rate {max_hr} is implausible");
    let mut floor = max_hr / 2;
    Ok(ZONE_CEILINGS
        .iter()
        .map(|pct| {
            let ceiling = max_hr * pct / 100;
            let zone = (floor, ceiling);
            floor = ceiling + 1;
            zone
        })
        .collect())
}

async fn zones_panel() -> anyhow::Result<Renderable> {
    let lines: Vec<String> = zone_bounds(DEFAULT_MAX_HR)?
        .into_iter()
        .enumerate()
        .map(|(i, (low, high))| format!("Z{}: {low}-{high} bpm", i + 1))
        .collect();
    Ok(Renderable::Panel {
        title: "Heart rate zones".into(),
        lines,
    })
}

pub fn descriptor() -> PluginDescriptor {
    PluginDescriptor::new(ID, "Heart rate zones")
        .with_icon("heart")
        .with_description("Splits an activity's heart rate into training zones.")
        .with_slot(
            "activity.top",
            lazy("HeartRateChart", || async {
                Ok(Renderable::Chart {
                    title: "Heart rate".into(),
                    metric: "heart_rate".into(),
                    unit: Some("bpm".into()),
                    chart: ChartKind::Bar,
                })
            }),
        )
        .with_slot("activity.top", lazy("HeartRateZones", zones_panel))
        .with_tab_metadata(json!({ "title": "Zones", "order": 2 }))
}

register_extension!(descriptor);
