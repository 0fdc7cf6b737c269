//! Chart specifications and the per-canvas chart registry.
//!
//! A `ChartSpec` mirrors the `{type, data, options}` object a chart
//! constructor takes, so it can be rendered by the terminal front-end or
//! serialized for a browser charting library unchanged.
//!
//! - `builders`: turn stats payload slices into chart specs
//! - `registry`: keeps at most one live chart per canvas

pub mod builders;
pub mod registry;

pub use builders::{
    activity_chart, schedules_chart, task_completion_chart, TASK_COMPLETION_PLACEHOLDER,
};
pub use registry::{ChartHandle, ChartInstance, ChartRegistry};

use serde::Serialize;

/// Named drawing surface a chart is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Canvas {
    Activity,
    Schedules,
    TasksCompletion,
}

impl Canvas {
    pub const ALL: [Canvas; 3] = [Canvas::Activity, Canvas::Schedules, Canvas::TasksCompletion];

    /// Element identifier of the canvas in the dashboard view contract
    pub fn element_id(&self) -> &'static str {
        match self {
            Canvas::Activity => "activity-chart",
            Canvas::Schedules => "schedules-chart",
            Canvas::TasksCompletion => "tasks-completion-chart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Doughnut,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Either one color for the whole series or one per data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorSet {
    Single(String),
    PerPoint(Vec<String>),
}

impl ColorSet {
    /// Color for the data point at `index`
    pub fn at(&self, index: usize) -> Option<&str> {
        match self {
            ColorSet::Single(c) => Some(c.as_str()),
            ColorSet::PerPoint(colors) => colors.get(index).map(|c| c.as_str()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ColorSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
    pub plugins: Plugins,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: false,
            scales: None,
            plugins: Plugins::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scales {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Axis>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub begin_at_zero: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
}

impl Title {
    pub fn shown(text: &str) -> Self {
        Self {
            display: true,
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Plugins {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    pub legend: Legend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Right,
    Bottom,
    Left,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<LegendPosition>,
}

impl Legend {
    pub fn at(position: LegendPosition) -> Self {
        Self {
            display: None,
            position: Some(position),
        }
    }

    pub fn hidden() -> Self {
        Self {
            display: Some(false),
            position: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.display.unwrap_or(true)
    }
}
