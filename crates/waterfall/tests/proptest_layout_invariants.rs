//! Property-based invariant tests for the cumulative layout and scene.
//!
//! 1. Item count is row count + 1 and the last item is the total
//! 2. Each item spans exactly its delta
//! 3. Consecutive items chain: y0 of one is y1 of the previous
//! 4. The total spans 0..sum of all deltas
//! 5. The value domain always contains zero
//! 6. Bars have non-negative size and stay inside the plot area
//! 7. Host values of any finite magnitude yield finite geometry

use proptest::prelude::*;
use serde_json::json;
use waterfall::chart::value_scale;
use waterfall::{
    Adapted, HostData, HostRow, Viewport, ZoneDelta, adapt, build_scene, cumulate,
};

fn arb_pairs() -> impl Strategy<Value = Vec<ZoneDelta>> {
    prop::collection::vec(("[A-Z][a-z]{0,6}", -1.0e6f64..1.0e6), 0..40).prop_map(|rows| {
        rows.into_iter()
            .map(|(zone, delta)| ZoneDelta::new(zone, delta))
            .collect()
    })
}

proptest! {
    #[test]
    fn one_item_per_row_plus_total(pairs in arb_pairs()) {
        let items = cumulate(&pairs);
        prop_assert_eq!(items.len(), pairs.len() + 1);
        let last = items.last().unwrap();
        prop_assert!(last.total);
        prop_assert!(items[..pairs.len()].iter().all(|item| !item.total));
    }

    #[test]
    fn items_span_their_delta_and_chain(pairs in arb_pairs()) {
        let items = cumulate(&pairs);
        let regular = &items[..pairs.len()];
        for (index, item) in regular.iter().enumerate() {
            prop_assert_eq!(item.y1, item.y0 + item.delta);
            if index == 0 {
                prop_assert_eq!(item.y0, 0.0);
            } else {
                prop_assert_eq!(item.y0, regular[index - 1].y1);
            }
        }
    }

    #[test]
    fn total_spans_the_sum(pairs in arb_pairs()) {
        let items = cumulate(&pairs);
        let sum = pairs.iter().fold(0.0, |acc, pair| acc + pair.delta);
        let total = items.last().unwrap();
        prop_assert_eq!(total.y0, 0.0);
        prop_assert_eq!(total.y1, sum);
        prop_assert_eq!(total.delta, sum);
    }

    #[test]
    fn domain_contains_zero(pairs in arb_pairs()) {
        let items = cumulate(&pairs);
        let (low, high) = value_scale(&items, 316.0).domain();
        prop_assert!(low <= 0.0 && 0.0 <= high, "domain {}..{}", low, high);
        prop_assert!(low < high);
    }

    #[test]
    fn bars_fit_the_plot(pairs in arb_pairs(), width in 0.0f64..2000.0, height in 0.0f64..1200.0) {
        let pair_count = pairs.len();
        let adapted = Adapted::Rows { pairs, diagnostics: Vec::new() };
        let rendered = build_scene(&adapted, Viewport::new(width, height));
        let chart = rendered.scene.as_chart().unwrap();
        prop_assert_eq!(chart.bars.len(), pair_count + 1);
        prop_assert_eq!(chart.labels.len(), pair_count + 1);
        let (plot_bottom, _) = chart.y_axis.range;
        for bar in &chart.bars {
            prop_assert!(bar.width >= 0.0 && bar.height >= 0.0);
            prop_assert!(bar.y >= -1e-6 && bar.y + bar.height <= plot_bottom + 1e-6);
        }
    }

    #[test]
    fn huge_values_yield_finite_geometry(deltas in prop::collection::vec(-1.0e308f64..1.0e308, 1..12)) {
        let rows = deltas
            .iter()
            .map(|delta| HostRow::new(vec![json!("Z")], vec![json!(delta)]))
            .collect();
        let data = HostData::from_rows(rows);
        let rendered = build_scene(&adapt(data.default_table()), Viewport::new(800.0, 400.0));
        let (low, high) = rendered.report.domain.unwrap();
        prop_assert!(low.is_finite() && high.is_finite());
        let chart = rendered.scene.as_chart().unwrap();
        for bar in &chart.bars {
            prop_assert!(bar.y.is_finite() && bar.height.is_finite());
        }
        for label in &chart.labels {
            prop_assert!(label.y.is_finite());
        }
    }
}
