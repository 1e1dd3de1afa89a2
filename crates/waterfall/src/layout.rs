//! Cumulative waterfall layout.
//!
//! Each pair becomes an [`Item`] spanning the running total before and
//! after its delta; a synthetic total item spanning `0..sum` closes the
//! list.

use serde::Serialize;
use waterfall_scene::BarClass;

use super::adapter::ZoneDelta;

/// Zone label of the synthetic total item.
pub const TOTAL_LABEL: &str = "Total";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub zone: String,
    pub delta: f64,
    /// Running total before this item.
    pub y0: f64,
    /// Running total after this item.
    pub y1: f64,
    pub total: bool,
}

impl Item {
    /// Higher end of the bar.
    pub fn top(&self) -> f64 {
        self.y0.max(self.y1)
    }

    pub fn bottom(&self) -> f64 {
        self.y0.min(self.y1)
    }

    /// Zero deltas draw as positive.
    pub fn bar_class(&self) -> BarClass {
        if self.total {
            BarClass::Total
        } else if self.delta >= 0.0 {
            BarClass::Positive
        } else {
            BarClass::Negative
        }
    }
}

/// Runs the cumulative sum over `pairs` and appends the total item.
pub fn cumulate(pairs: &[ZoneDelta]) -> Vec<Item> {
    let mut running = 0.0;
    let mut items: Vec<Item> = pairs
        .iter()
        .map(|pair| {
            let y0 = running;
            running += pair.delta;
            Item {
                zone: pair.zone.clone(),
                delta: pair.delta,
                y0,
                y1: running,
                total: false,
            }
        })
        .collect();
    items.push(Item {
        zone: TOTAL_LABEL.to_string(),
        delta: running,
        y0: 0.0,
        y1: running,
        total: true,
    });
    items
}

/// Lowest and highest cumulative bound over all items.
pub fn value_extent(items: &[Item]) -> (f64, f64) {
    items.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), item| {
        (low.min(item.bottom()), high.max(item.top()))
    })
}
