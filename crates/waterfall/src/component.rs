//! Chart component and the capabilities it is wired to.
//!
//! The component owns its drawing [`Surface`] and turns every host payload
//! into one full redraw: adapt, lay out, build the scene, clear, draw.
//! Nothing is kept between renders except the surface itself.

use std::cell::RefCell;
use std::rc::Rc;

use waterfall_scene::Scene;

use super::adapter::adapt;
use super::chart::{RenderReport, Viewport, build_scene};
use super::table::HostData;

/// Where a scene ends up: a DOM container, an SVG buffer, a test double.
pub trait Surface {
    /// Current container size; zero when the host has not laid it out.
    fn size(&self) -> Viewport;

    /// Removes everything drawn by earlier renders.
    fn clear(&mut self);

    fn draw(&mut self, scene: &Scene);
}

/// Callback invoked with each full payload delivered by the host.
pub type DataCallback = Box<dyn FnMut(HostData)>;

/// The host's data-change notification.
pub trait DataSource {
    /// Registers `on_data`. Every later notification calls it with a
    /// complete, self-contained payload.
    fn subscribe(&mut self, on_data: DataCallback);
}

pub struct WaterfallChart<S> {
    surface: S,
    render_count: u64,
}

impl<S: Surface> WaterfallChart<S> {
    pub fn new(surface: S) -> Self {
        Self { surface, render_count: 0 }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Fully redraws the chart from `data`. The surface is measured after
    /// it has been cleared, so earlier output never affects the layout.
    pub fn on_data(&mut self, data: &HostData) -> RenderReport {
        let adapted = adapt(data.default_table());
        self.surface.clear();
        let rendered = build_scene(&adapted, self.surface.size());
        self.surface.draw(&rendered.scene);
        self.render_count += 1;
        log::debug!(
            "render #{}: {} items, {} diagnostics",
            self.render_count,
            rendered.report.item_count,
            rendered.report.diagnostics.len()
        );
        rendered.report
    }
}

/// Subscribes `chart` to `source`, once. Payloads arriving while a render
/// is still running are dropped.
pub fn connect<S>(chart: Rc<RefCell<WaterfallChart<S>>>, source: &mut dyn DataSource)
where
    S: Surface + 'static,
{
    source.subscribe(Box::new(move |data: HostData| match chart.try_borrow_mut() {
        Ok(mut chart) => {
            chart.on_data(&data);
        }
        Err(_) => log::warn!("payload arrived during a render, skipped"),
    }));
}
