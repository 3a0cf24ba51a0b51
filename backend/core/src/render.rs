//! Renderable units.
//!
//! A component factory resolves to exactly one [`Renderable`]. The variants
//! are the capabilities a host surface knows how to draw; plugins compose
//! them instead of shipping arbitrary UI code.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Renderable {
    /// A titled block of text lines.
    Panel { title: String, lines: Vec<String> },
    /// A chart over one activity metric.
    Chart {
        title: String,
        metric: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
        chart: ChartKind,
    },
    /// A navigation entry pointing at a route.
    Link {
        label: String,
        to: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    },
    /// A configuration form, used by provider setup components.
    Form { title: String, fields: Vec<FormField> },
}

impl Renderable {
    pub fn panel(title: impl Into<String>, lines: &[&str]) -> Self {
        Self::Panel {
            title: title.into(),
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    pub fn link(label: impl Into<String>, to: impl Into<String>, icon: Option<&str>) -> Self {
        Self::Link {
            label: label.into(),
            to: to.into(),
            icon: icon.map(str::to_string),
        }
    }

    /// Short name of the variant, as used in the `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Panel { .. } => "panel",
            Self::Chart { .. } => "chart",
            Self::Link { .. } => "link",
            Self::Form { .. } => "form",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Map,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

impl FormField {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Url,
    Secret,
    Toggle,
    File,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderable_tagged_json() {
        let link = Renderable::link("Activities", "/activities", Some("list"));
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["kind"], "link");
        assert_eq!(json["to"], "/activities");
        assert_eq!(link.kind(), "link");
    }

    #[test]
    fn test_chart_omits_missing_unit() {
        let chart = Renderable::Chart {
            title: "Pace".into(),
            metric: "pace".into(),
            unit: None,
            chart: ChartKind::Line,
        };
        let json = serde_json::to_value(&chart).unwrap();
        assert!(json.get("unit").is_none());
        assert_eq!(json["chart"], "line");
    }
}
