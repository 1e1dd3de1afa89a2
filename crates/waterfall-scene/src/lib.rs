//! Render-agnostic draw instructions for the waterfall chart.
//!
//! A [`Scene`] is the complete output of one render pass: either a
//! placeholder message or a fully laid out chart. Every coordinate is
//! already resolved, so a renderer only has to turn nodes into elements
//! (DOM, SVG text, test doubles) without any scale math of its own.
//!
//! Coordinates of axes, bars and labels are relative to the plot origin
//! ([`ChartScene::origin`]), which is the top-left corner of the area left
//! after margins.

use serde::{Deserialize, Serialize};

pub mod svg;

/// Result of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scene {
    /// Nothing to draw. Only the message is shown, no svg is created.
    Placeholder { message: String, padding: f64 },
    Chart(ChartScene),
}

impl Scene {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Scene::Placeholder { .. })
    }

    pub fn as_chart(&self) -> Option<&ChartScene> {
        match self {
            Scene::Chart(chart) => Some(chart),
            Scene::Placeholder { .. } => None,
        }
    }
}

/// A point in scene units (CSS pixels once drawn).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartScene {
    /// Full drawing size, used as the svg `viewBox`.
    pub width: f64,
    pub height: f64,
    /// Top-left corner of the plot area inside the svg.
    pub origin: Point,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub bars: Vec<Bar>,
    pub labels: Vec<Label>,
    /// Distance between the pointer and the tooltip's top-left corner.
    pub tooltip_offset: f64,
}

impl ChartScene {
    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }

    /// Where the tooltip goes for a pointer at `(client_x, client_y)`.
    pub fn tooltip_position(&self, client_x: f64, client_y: f64) -> Point {
        Point::new(client_x + self.tooltip_offset, client_y + self.tooltip_offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orient {
    Bottom,
    Left,
}

/// One axis: a domain path plus ticks along it.
///
/// Tick offsets run along the axis (x for `Bottom`, y for `Left`). The
/// tick line and label geometry follow from [`Orient`] and the tick sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub orient: Orient,
    /// Translation of the axis group relative to the plot origin.
    pub translate: Point,
    /// Covered range along the axis, in plot units.
    pub range: (f64, f64),
    pub tick_size_inner: f64,
    pub tick_size_outer: f64,
    pub tick_padding: f64,
    pub ticks: Vec<Tick>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub offset: f64,
    pub label: String,
}

impl Axis {
    pub fn css_class(&self) -> &'static str {
        match self.orient {
            Orient::Bottom => "x-axis",
            Orient::Left => "y-axis",
        }
    }

    /// Path data of the axis line including the outer ticks.
    pub fn domain_path(&self) -> String {
        let (r0, r1) = self.range;
        let outer = self.tick_size_outer;
        match self.orient {
            Orient::Bottom => format!("M{r0},{outer}V0H{r1}V{outer}"),
            Orient::Left => format!("M{},{r0}H0V{r1}H{}", -outer, -outer),
        }
    }

    /// Transform of a single tick group.
    pub fn tick_transform(&self, tick: &Tick) -> String {
        match self.orient {
            Orient::Bottom => format!("translate({},0)", tick.offset),
            Orient::Left => format!("translate(0,{})", tick.offset),
        }
    }

    /// End point of a tick line, starting at the tick group origin.
    pub fn tick_line_end(&self) -> Point {
        match self.orient {
            Orient::Bottom => Point::new(0.0, self.tick_size_inner),
            Orient::Left => Point::new(-self.tick_size_inner, 0.0),
        }
    }

    /// Position of a tick label inside its tick group.
    pub fn label_position(&self) -> Point {
        let spacing = self.tick_size_inner.max(0.0) + self.tick_padding;
        match self.orient {
            Orient::Bottom => Point::new(0.0, spacing),
            Orient::Left => Point::new(-spacing, 0.0),
        }
    }

    pub fn label_dy(&self) -> &'static str {
        match self.orient {
            Orient::Bottom => "0.71em",
            Orient::Left => "0.32em",
        }
    }

    pub fn text_anchor(&self) -> &'static str {
        match self.orient {
            Orient::Bottom => "middle",
            Orient::Left => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarClass {
    Positive,
    Negative,
    Total,
}

impl BarClass {
    pub fn css_class(self) -> &'static str {
        match self {
            BarClass::Positive => "bar positive",
            BarClass::Negative => "bar negative",
            BarClass::Total => "bar total",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub zone: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub class: BarClass,
    pub tooltip: Tooltip,
}

/// Hover content of a bar. Both lines are plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tooltip {
    /// Shown in bold on the first line.
    pub title: String,
    pub body: String,
}

/// Value label drawn above a bar, centred horizontally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

impl Label {
    pub const CSS_CLASS: &'static str = "label";
    pub const TEXT_ANCHOR: &'static str = "middle";
}
