//! Serializes a [`Scene`] to standalone markup.
//!
//! Produces the same element tree the DOM renderer builds, as text. The
//! chart becomes an `<svg>` document; the placeholder becomes a padded
//! `<div>` (no svg is created for it).

use std::fmt::Write;

use super::{Axis, ChartScene, Label, Scene};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

pub fn to_markup(scene: &Scene) -> String {
    match scene {
        Scene::Placeholder { message, padding } => format!(
            "<div style=\"padding:{padding}px\">{}</div>\n",
            escape_text(message)
        ),
        Scene::Chart(chart) => to_svg(chart),
    }
}

pub fn to_svg(chart: &ChartScene) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_svg(&mut out, chart);
    out
}

fn write_svg(out: &mut String, chart: &ChartScene) -> std::fmt::Result {
    writeln!(out, "<svg xmlns=\"{SVG_NS}\" viewBox=\"{}\">", chart.view_box())?;
    writeln!(
        out,
        "  <g transform=\"translate({},{})\">",
        chart.origin.x, chart.origin.y
    )?;
    write_axis(out, &chart.x_axis)?;
    write_axis(out, &chart.y_axis)?;
    for bar in &chart.bars {
        writeln!(
            out,
            "    <rect class=\"{}\" x=\"{}\" width=\"{}\" y=\"{}\" height=\"{}\"><title>{}\n{}</title></rect>",
            bar.class.css_class(),
            bar.x,
            bar.width,
            bar.y,
            bar.height,
            escape_text(&bar.tooltip.title),
            escape_text(&bar.tooltip.body),
        )?;
    }
    for label in &chart.labels {
        writeln!(
            out,
            "    <text class=\"{}\" x=\"{}\" y=\"{}\" text-anchor=\"{}\">{}</text>",
            Label::CSS_CLASS,
            label.x,
            label.y,
            Label::TEXT_ANCHOR,
            escape_text(&label.text),
        )?;
    }
    writeln!(out, "  </g>")?;
    writeln!(out, "</svg>")
}

fn write_axis(out: &mut String, axis: &Axis) -> std::fmt::Result {
    writeln!(
        out,
        "    <g class=\"{}\" transform=\"translate({},{})\" fill=\"none\" font-size=\"10\" font-family=\"sans-serif\" text-anchor=\"{}\">",
        axis.css_class(),
        axis.translate.x,
        axis.translate.y,
        axis.text_anchor(),
    )?;
    writeln!(
        out,
        "      <path class=\"domain\" stroke=\"currentColor\" d=\"{}\"></path>",
        axis.domain_path()
    )?;
    let line_end = axis.tick_line_end();
    let label_at = axis.label_position();
    for tick in &axis.ticks {
        writeln!(
            out,
            "      <g class=\"tick\" opacity=\"1\" transform=\"{}\"><line stroke=\"currentColor\" x2=\"{}\" y2=\"{}\"></line><text fill=\"currentColor\" x=\"{}\" y=\"{}\" dy=\"{}\">{}</text></g>",
            axis.tick_transform(tick),
            line_end.x,
            line_end.y,
            label_at.x,
            label_at.y,
            axis.label_dy(),
            escape_text(&tick.label),
        )?;
    }
    writeln!(out, "    </g>")
}

/// Escapes text content and attribute values.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
