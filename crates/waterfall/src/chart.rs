//! Scene builder: adapted rows plus container size in, draw instructions
//! out.
//!
//! This is a pure function of its inputs. It never touches a host or a
//! drawing surface, so every geometric property can be checked directly
//! on the returned [`Scene`].

use serde::Serialize;
use waterfall_scene::{Axis, Bar, ChartScene, Label, Orient, Point, Scene, Tick, Tooltip};

use super::adapter::Adapted;
use super::error::Diagnostic;
use super::format::format_delta;
use super::layout::{Item, TOTAL_LABEL, cumulate, value_extent};
use super::scale::{BandScale, LinearScale};

/// Space around the plot area, leaving room for axis labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

pub const MARGIN: Margin = Margin { top: 20.0, right: 24.0, bottom: 64.0, left: 64.0 };
pub const DEFAULT_WIDTH: f64 = 800.0;
pub const DEFAULT_HEIGHT: f64 = 400.0;
pub const BAND_PADDING: f64 = 0.35;
pub const Y_TICK_COUNT: usize = 6;
pub const NICE_TICK_COUNT: usize = 10;
pub const LABEL_OFFSET: f64 = 6.0;
pub const TOOLTIP_OFFSET: f64 = 12.0;
pub const TICK_SIZE: f64 = 6.0;
pub const TICK_PADDING: f64 = 3.0;
pub const NO_DATA_MESSAGE: &str = "Aucune donnée.";
pub const PLACEHOLDER_PADDING: f64 = 16.0;
/// Prefix of a regular bar's tooltip value.
pub const DELTA_PREFIX: &str = "Δ ";

/// Size reported by the drawing container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Replaces each zero (or unusable) dimension with its default.
    pub fn resolve(self) -> (Viewport, Option<Diagnostic>) {
        let usable = |value: f64| value.is_finite() && value > 0.0;
        let resolved = Viewport {
            width: if usable(self.width) { self.width } else { DEFAULT_WIDTH },
            height: if usable(self.height) { self.height } else { DEFAULT_HEIGHT },
        };
        let diagnostic = (resolved != self).then_some(Diagnostic::LayoutDegenerate {
            width: self.width,
            height: self.height,
        });
        (resolved, diagnostic)
    }
}

/// Summary of one render, for logs and callers.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RenderReport {
    /// Items drawn, the total included. Zero for the placeholder.
    pub item_count: usize,
    /// Niced value domain of the vertical scale.
    pub domain: Option<(f64, f64)>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub scene: Scene,
    pub items: Vec<Item>,
    pub report: RenderReport,
}

pub fn placeholder() -> Scene {
    Scene::Placeholder {
        message: NO_DATA_MESSAGE.to_string(),
        padding: PLACEHOLDER_PADDING,
    }
}

/// Builds the full scene for one render.
pub fn build_scene(adapted: &Adapted, container: Viewport) -> Rendered {
    let mut diagnostics = adapted.diagnostics();
    let pairs = match adapted {
        Adapted::NoData => {
            log::debug!("no data, drawing placeholder");
            return Rendered {
                scene: placeholder(),
                items: Vec::new(),
                report: RenderReport { item_count: 0, domain: None, diagnostics },
            };
        }
        Adapted::Rows { pairs, .. } => pairs,
    };

    let items = cumulate(pairs);
    let (size, degenerate) = container.resolve();
    if let Some(diagnostic) = degenerate {
        log::warn!("{diagnostic}");
        diagnostics.push(diagnostic);
    }

    let inner_width = (size.width - MARGIN.left - MARGIN.right).max(0.0);
    let inner_height = (size.height - MARGIN.top - MARGIN.bottom).max(0.0);

    let x = BandScale::new(items.iter().map(|item| item.zone.as_str()), (0.0, inner_width), BAND_PADDING);
    let y = value_scale(&items, inner_height);
    log::debug!(
        "drawing {} items in {}x{}, domain {:?}",
        items.len(),
        size.width,
        size.height,
        y.domain()
    );

    let chart = ChartScene {
        width: size.width,
        height: size.height,
        origin: Point::new(MARGIN.left, MARGIN.top),
        x_axis: zone_axis(&x, &y),
        y_axis: value_axis(&y),
        bars: items.iter().filter_map(|item| bar(item, &x, &y)).collect(),
        labels: items.iter().filter_map(|item| label(item, &x, &y)).collect(),
        tooltip_offset: TOOLTIP_OFFSET,
    };

    Rendered {
        scene: Scene::Chart(chart),
        report: RenderReport {
            item_count: items.len(),
            domain: Some(y.domain()),
            diagnostics,
        },
        items,
    }
}

/// Vertical scale over all cumulative bounds, always including zero.
pub fn value_scale(items: &[Item], inner_height: f64) -> LinearScale {
    let (low, high) = value_extent(items);
    let (low, high) = (low.min(0.0), high.max(0.0));
    // All-zero data still gets a usable unit range.
    let domain = if low == high { (0.0, 1.0) } else { (low, high) };
    LinearScale::new(domain, (inner_height, 0.0)).nice(NICE_TICK_COUNT)
}

fn zone_axis(x: &BandScale, y: &LinearScale) -> Axis {
    let ticks = x
        .domain()
        .iter()
        .filter_map(|zone| {
            x.center(zone).map(|offset| Tick { offset, label: zone.clone() })
        })
        .collect();
    Axis {
        orient: Orient::Bottom,
        translate: Point::new(0.0, y.map(0.0)),
        range: x.range(),
        tick_size_inner: TICK_SIZE,
        tick_size_outer: 0.0,
        tick_padding: TICK_PADDING,
        ticks,
    }
}

fn value_axis(y: &LinearScale) -> Axis {
    let format = y.tick_format(Y_TICK_COUNT);
    let ticks = y
        .ticks(Y_TICK_COUNT)
        .into_iter()
        .map(|value| Tick { offset: y.map(value), label: format(value) })
        .collect();
    Axis {
        orient: Orient::Left,
        translate: Point::default(),
        range: y.range(),
        tick_size_inner: TICK_SIZE,
        tick_size_outer: TICK_SIZE,
        tick_padding: TICK_PADDING,
        ticks,
    }
}

fn bar(item: &Item, x: &BandScale, y: &LinearScale) -> Option<Bar> {
    Some(Bar {
        zone: item.zone.clone(),
        x: x.position(&item.zone)?,
        y: y.map(item.top()),
        width: x.bandwidth(),
        height: (y.map(item.y0) - y.map(item.y1)).abs(),
        class: item.bar_class(),
        tooltip: tooltip(item),
    })
}

fn label(item: &Item, x: &BandScale, y: &LinearScale) -> Option<Label> {
    Some(Label {
        x: x.center(&item.zone)?,
        y: y.map(item.top()) - LABEL_OFFSET,
        text: format_delta(item.delta),
    })
}

pub fn tooltip(item: &Item) -> Tooltip {
    if item.total {
        Tooltip {
            title: TOTAL_LABEL.to_string(),
            body: format_delta(item.delta),
        }
    } else {
        Tooltip {
            title: item.zone.clone(),
            body: format!("{DELTA_PREFIX}{}", format_delta(item.delta)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::ZoneDelta;

    fn rows(pairs: &[(&str, f64)]) -> Adapted {
        Adapted::Rows {
            pairs: pairs.iter().map(|(zone, delta)| ZoneDelta::new(*zone, *delta)).collect(),
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn zero_size_falls_back_per_dimension() {
        let (size, diagnostic) = Viewport::new(0.0, 0.0).resolve();
        assert_eq!(size, Viewport::new(DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert!(matches!(diagnostic, Some(Diagnostic::LayoutDegenerate { .. })));

        let (size, _) = Viewport::new(640.0, 0.0).resolve();
        assert_eq!(size, Viewport::new(640.0, DEFAULT_HEIGHT));

        let (size, diagnostic) = Viewport::new(640.0, 480.0).resolve();
        assert_eq!(size, Viewport::new(640.0, 480.0));
        assert!(diagnostic.is_none());
    }

    #[test]
    fn no_data_is_a_placeholder() {
        let rendered = build_scene(&Adapted::NoData, Viewport::new(800.0, 400.0));
        assert_eq!(rendered.scene, placeholder());
        assert!(rendered.items.is_empty());
        assert_eq!(rendered.report.item_count, 0);
        assert_eq!(rendered.report.diagnostics, vec![Diagnostic::MissingData]);
    }

    #[test]
    fn plot_area_is_container_minus_margins() {
        let rendered = build_scene(&rows(&[("A", 10.0)]), Viewport::new(800.0, 400.0));
        let chart = rendered.scene.as_chart().unwrap();
        assert_eq!(chart.view_box(), "0 0 800 400");
        assert_eq!(chart.origin, Point::new(64.0, 20.0));
        assert_eq!(chart.x_axis.range, (0.0, 712.0));
        assert_eq!(chart.y_axis.range, (316.0, 0.0));
    }

    #[test]
    fn x_axis_sits_on_zero() {
        let rendered = build_scene(&rows(&[("A", 50.0), ("B", -100.0)]), Viewport::new(800.0, 400.0));
        let chart = rendered.scene.as_chart().unwrap();
        // Domain -50..50, so zero sits half way down the plot.
        assert_eq!(rendered.report.domain, Some((-50.0, 50.0)));
        assert_eq!(chart.x_axis.translate, Point::new(0.0, 158.0));
        assert_eq!(chart.x_axis.tick_size_outer, 0.0);
        let labels: Vec<_> = chart.x_axis.ticks.iter().map(|tick| tick.label.as_str()).collect();
        assert_eq!(labels, ["A", "B", "Total"]);
    }

    #[test]
    fn y_axis_has_round_ticks() {
        let rendered = build_scene(&rows(&[("A", 100.0)]), Viewport::new(800.0, 400.0));
        let chart = rendered.scene.as_chart().unwrap();
        let labels: Vec<_> = chart.y_axis.ticks.iter().map(|tick| tick.label.as_str()).collect();
        assert_eq!(labels, ["0", "20", "40", "60", "80", "100"]);
        assert_eq!(chart.y_axis.ticks[0].offset, 316.0);
        assert_eq!(chart.y_axis.ticks[5].offset, 0.0);
    }

    #[test]
    fn bars_span_their_bounds() {
        let rendered = build_scene(&rows(&[("Up", 100.0), ("Down", -40.0)]), Viewport::new(800.0, 400.0));
        let chart = rendered.scene.as_chart().unwrap();
        // Domain 0..100 over 316px.
        let up = &chart.bars[0];
        assert_eq!(up.y, 0.0);
        assert!((up.height - 316.0).abs() < 1e-9);
        let down = &chart.bars[1];
        assert!((down.y - 0.0).abs() < 1e-9);
        assert!((down.height - 126.4).abs() < 1e-9);
        let total = &chart.bars[2];
        assert!((total.y - 126.4).abs() < 1e-9);
        assert!((total.height - 189.6).abs() < 1e-9);
    }

    #[test]
    fn labels_float_above_bars() {
        let rendered = build_scene(&rows(&[("A", 1234.0), ("B", -7.0)]), Viewport::new(800.0, 400.0));
        let chart = rendered.scene.as_chart().unwrap();
        for (bar, label) in chart.bars.iter().zip(&chart.labels) {
            assert!((label.y - (bar.y - LABEL_OFFSET)).abs() < 1e-9);
            assert!((label.x - (bar.x + bar.width / 2.0)).abs() < 1e-9);
        }
        let texts: Vec<_> = chart.labels.iter().map(|label| label.text.as_str()).collect();
        assert_eq!(texts, ["1,234", "-7", "1,227"]);
    }

    #[test]
    fn tooltips_name_zone_or_total() {
        let rendered = build_scene(&rows(&[("North", 1500.0)]), Viewport::new(800.0, 400.0));
        let chart = rendered.scene.as_chart().unwrap();
        assert_eq!(
            chart.bars[0].tooltip,
            Tooltip { title: "North".into(), body: "Δ 1,500".into() }
        );
        assert_eq!(
            chart.bars[1].tooltip,
            Tooltip { title: "Total".into(), body: "1,500".into() }
        );
        assert_eq!(chart.tooltip_position(100.0, 50.0), Point::new(112.0, 62.0));
    }

    #[test]
    fn degenerate_container_still_draws() {
        let rendered = build_scene(&rows(&[("A", 5.0)]), Viewport::default());
        let chart = rendered.scene.as_chart().unwrap();
        assert_eq!((chart.width, chart.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert!(
            rendered
                .report
                .diagnostics
                .iter()
                .any(|diagnostic| matches!(diagnostic, Diagnostic::LayoutDegenerate { .. }))
        );
    }

    #[test]
    fn tiny_container_never_yields_negative_sizes() {
        let rendered = build_scene(&rows(&[("A", 5.0)]), Viewport::new(40.0, 30.0));
        let chart = rendered.scene.as_chart().unwrap();
        assert!(chart.bars.iter().all(|bar| bar.width >= 0.0 && bar.height >= 0.0));
    }
}
