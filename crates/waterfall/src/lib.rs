//! Waterfall chart core.
//!
//! Host rows go through the [`adapter`] into `(zone, delta)` pairs, the
//! [`layout`] stacks them into cumulative items with a closing total, and
//! [`chart`] turns the items into a [`Scene`] using the band and linear
//! [`scale`]s. The [`component`] module ties this to a drawing surface and
//! a host data source.

pub mod adapter;
pub mod chart;
pub mod component;
pub mod error;
pub mod format;
pub mod layout;
pub mod scale;
pub mod table;

pub use adapter::{Adapted, EMPTY_ZONE, ZoneDelta, adapt};
pub use chart::{RenderReport, Rendered, Viewport, build_scene};
pub use component::{DataCallback, DataSource, Surface, WaterfallChart, connect};
pub use error::{ChartError, Diagnostic, Field};
pub use format::format_delta;
pub use layout::{Item, TOTAL_LABEL, cumulate};
pub use table::{HostData, HostRow, parse_document};

pub use waterfall_scene as scene;
pub use waterfall_scene::Scene;
