//! Browser [`Surface`] for waterfall scenes.
//!
//! [`DomSurface`] owns the chart container and the floating tooltip
//! element. Every draw builds a fresh `<svg>` tree (or the placeholder
//! `<div>`) under the container; [`Surface::clear`] drops it together with
//! the hover listeners of the previous render.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use waterfall::{Surface, Viewport};
use waterfall_scene::{Axis, Bar, ChartScene, Label, Point, Scene, Tooltip};
use web_sys::{Document, Element, HtmlElement, MouseEvent};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

type Listener = Closure<dyn FnMut(MouseEvent)>;

pub struct DomSurface {
    document: Document,
    container: Element,
    tooltip: HtmlElement,
    listeners: Vec<Listener>,
}

impl DomSurface {
    pub fn new(container: Element, tooltip: HtmlElement) -> Result<Self, JsValue> {
        let document = container
            .owner_document()
            .ok_or_else(|| JsValue::from_str("container has no owner document"))?;
        Ok(Self {
            document,
            container,
            tooltip,
            listeners: Vec::new(),
        })
    }

    /// Looks both elements up by id in the current document.
    pub fn from_ids(container_id: &str, tooltip_id: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| JsValue::from_str(&format!("element #{container_id} not found")))?;
        let tooltip = document
            .get_element_by_id(tooltip_id)
            .ok_or_else(|| JsValue::from_str(&format!("element #{tooltip_id} not found")))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| JsValue::from_str("tooltip is not an HTML element"))?;
        Self::new(container, tooltip)
    }

    pub fn container(&self) -> &Element {
        &self.container
    }

    pub fn tooltip(&self) -> &HtmlElement {
        &self.tooltip
    }

    fn try_draw(&mut self, scene: &Scene) -> Result<(), JsValue> {
        match scene {
            Scene::Placeholder { message, padding } => {
                let div = self.document.create_element("div")?.unchecked_into::<HtmlElement>();
                div.style().set_property("padding", &format!("{padding}px"))?;
                div.set_text_content(Some(message));
                self.container.append_child(&div)?;
            }
            Scene::Chart(chart) => self.draw_chart(chart)?,
        }
        Ok(())
    }

    fn draw_chart(&mut self, chart: &ChartScene) -> Result<(), JsValue> {
        let svg = self.svg("svg")?;
        svg.set_attribute("viewBox", &chart.view_box())?;
        let plot = self.svg("g")?;
        plot.set_attribute(
            "transform",
            &format!("translate({},{})", chart.origin.x, chart.origin.y),
        )?;
        svg.append_child(&plot)?;

        plot.append_child(&self.axis(&chart.x_axis)?)?;
        plot.append_child(&self.axis(&chart.y_axis)?)?;

        // Pointer offset applied to every tooltip of this render.
        let offset = chart.tooltip_position(0.0, 0.0);
        for bar in &chart.bars {
            let rect = self.bar(bar)?;
            self.attach_tooltip(&rect, &bar.tooltip, offset)?;
            plot.append_child(&rect)?;
        }
        for label in &chart.labels {
            plot.append_child(&self.label(label)?)?;
        }

        self.container.append_child(&svg)?;
        Ok(())
    }

    fn svg(&self, tag: &str) -> Result<Element, JsValue> {
        self.document.create_element_ns(Some(SVG_NS), tag)
    }

    fn axis(&self, axis: &Axis) -> Result<Element, JsValue> {
        let group = self.svg("g")?;
        set_attributes(
            &group,
            &[
                ("class", axis.css_class()),
                (
                    "transform",
                    &format!("translate({},{})", axis.translate.x, axis.translate.y),
                ),
                ("fill", "none"),
                ("font-size", "10"),
                ("font-family", "sans-serif"),
                ("text-anchor", axis.text_anchor()),
            ],
        )?;

        let domain = self.svg("path")?;
        set_attributes(
            &domain,
            &[
                ("class", "domain"),
                ("stroke", "currentColor"),
                ("d", &axis.domain_path()),
            ],
        )?;
        group.append_child(&domain)?;

        let line_end = axis.tick_line_end();
        let label_at = axis.label_position();
        for tick in &axis.ticks {
            let tick_group = self.svg("g")?;
            set_attributes(
                &tick_group,
                &[
                    ("class", "tick"),
                    ("opacity", "1"),
                    ("transform", &axis.tick_transform(tick)),
                ],
            )?;
            let line = self.svg("line")?;
            set_attributes(
                &line,
                &[
                    ("stroke", "currentColor"),
                    ("x2", &line_end.x.to_string()),
                    ("y2", &line_end.y.to_string()),
                ],
            )?;
            let text = self.svg("text")?;
            set_attributes(
                &text,
                &[
                    ("fill", "currentColor"),
                    ("x", &label_at.x.to_string()),
                    ("y", &label_at.y.to_string()),
                    ("dy", axis.label_dy()),
                ],
            )?;
            text.set_text_content(Some(&tick.label));
            tick_group.append_child(&line)?;
            tick_group.append_child(&text)?;
            group.append_child(&tick_group)?;
        }
        Ok(group)
    }

    fn bar(&self, bar: &Bar) -> Result<Element, JsValue> {
        let rect = self.svg("rect")?;
        set_attributes(
            &rect,
            &[
                ("class", bar.class.css_class()),
                ("x", &bar.x.to_string()),
                ("width", &bar.width.to_string()),
                ("y", &bar.y.to_string()),
                ("height", &bar.height.to_string()),
            ],
        )?;
        Ok(rect)
    }

    fn label(&self, label: &Label) -> Result<Element, JsValue> {
        let text = self.svg("text")?;
        set_attributes(
            &text,
            &[
                ("class", Label::CSS_CLASS),
                ("x", &label.x.to_string()),
                ("y", &label.y.to_string()),
                ("text-anchor", Label::TEXT_ANCHOR),
            ],
        )?;
        text.set_text_content(Some(&label.text));
        Ok(text)
    }

    fn attach_tooltip(
        &mut self,
        rect: &Element,
        content: &Tooltip,
        offset: Point,
    ) -> Result<(), JsValue> {
        let document = self.document.clone();
        let tooltip = self.tooltip.clone();
        let content = content.clone();
        let on_move = Listener::wrap(Box::new(move |event: MouseEvent| {
            let at = Point::new(
                f64::from(event.client_x()) + offset.x,
                f64::from(event.client_y()) + offset.y,
            );
            if let Err(error) = show_tooltip(&document, &tooltip, &content, at) {
                zoon::eprintln!("waterfall: failed to show tooltip: {error:?}");
            }
        }));
        rect.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        self.listeners.push(on_move);

        let tooltip = self.tooltip.clone();
        let on_leave = Listener::wrap(Box::new(move |_event: MouseEvent| {
            if let Err(error) = hide_tooltip(&tooltip) {
                zoon::eprintln!("waterfall: failed to hide tooltip: {error:?}");
            }
        }));
        rect.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;
        self.listeners.push(on_leave);
        Ok(())
    }
}

impl Surface for DomSurface {
    fn size(&self) -> Viewport {
        Viewport::new(
            f64::from(self.container.client_width()),
            f64::from(self.container.client_height()),
        )
    }

    fn clear(&mut self) {
        // Detached rects never fire again, so their listeners can go too.
        self.container.set_text_content(None);
        self.listeners.clear();
        if let Err(error) = hide_tooltip(&self.tooltip) {
            zoon::eprintln!("waterfall: failed to hide tooltip: {error:?}");
        }
    }

    fn draw(&mut self, scene: &Scene) {
        if let Err(error) = self.try_draw(scene) {
            zoon::eprintln!("waterfall: drawing failed: {error:?}");
        }
    }
}

fn set_attributes(element: &Element, attributes: &[(&str, &str)]) -> Result<(), JsValue> {
    for (name, value) in attributes {
        element.set_attribute(name, value)?;
    }
    Ok(())
}

/// Fills the tooltip with a bold title, a line break and the body, all as
/// text nodes.
fn show_tooltip(
    document: &Document,
    tooltip: &HtmlElement,
    content: &Tooltip,
    at: Point,
) -> Result<(), JsValue> {
    let style = tooltip.style();
    style.set_property("opacity", "1")?;
    style.set_property("left", &format!("{}px", at.x))?;
    style.set_property("top", &format!("{}px", at.y))?;

    tooltip.set_text_content(None);
    let title = document.create_element("b")?;
    title.set_text_content(Some(&content.title));
    tooltip.append_child(&title)?;
    tooltip.append_child(&document.create_element("br")?)?;
    tooltip.append_child(&document.create_text_node(&content.body))?;
    Ok(())
}

fn hide_tooltip(tooltip: &HtmlElement) -> Result<(), JsValue> {
    tooltip.style().set_property("opacity", "0")
}
