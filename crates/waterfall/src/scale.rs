//! Band and linear scales.
//!
//! The band scale spreads zone labels across the plot width with uniform
//! padding. The linear scale maps cumulative values onto the plot height
//! and knows how to round its domain outward ("nice") and pick round tick
//! values. Tick values are always 1, 2 or 5 times a power of ten.

use std::collections::HashMap;

use super::format::{format_grouped, precision_fixed};

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Half-up rounding, so negative halves move toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// First index, last index and increment of the ticks covering
/// `start..=stop`. A negative increment `-k` means a step of `1/k`, which
/// keeps fractional ticks exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (i1, i2, increment) = if power < 0.0 {
        let inverse = 10_f64.powf(-power) / factor;
        let mut i1 = round_half_up(start * inverse);
        let mut i2 = round_half_up(stop * inverse);
        if i1 / inverse < start {
            i1 += 1.0;
        }
        if i2 / inverse > stop {
            i2 -= 1.0;
        }
        (i1, i2, -inverse)
    } else {
        let increment = 10_f64.powf(power) * factor;
        let mut i1 = round_half_up(start / increment);
        let mut i2 = round_half_up(stop / increment);
        if i1 * increment < start {
            i1 += 1.0;
        }
        if i2 * increment > stop {
            i2 -= 1.0;
        }
        (i1, i2, increment)
    };
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, increment)
}

/// Round tick values between `start` and `stop`, roughly `count` of them.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (low, high) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, increment) = tick_spec(low, high, count as f64);
    // Also rejects NaN bounds.
    if !(i2 >= i1) {
        return Vec::new();
    }
    let n = (i2 - i1 + 1.0) as usize;
    (0..n)
        .map(|i| {
            let index = if reverse { i2 - i as f64 } else { i1 + i as f64 };
            if increment < 0.0 {
                index / -increment
            } else {
                index * increment
            }
        })
        .collect()
}

/// Raw tick increment; negative values encode inverse steps.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).2
}

/// Signed distance between adjacent ticks.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let reverse = stop < start;
    let increment = if reverse {
        tick_increment(stop, start, count)
    } else {
        tick_increment(start, stop, count)
    };
    let step = if increment < 0.0 { 1.0 / -increment } else { increment };
    if reverse { -step } else { step }
}

/// Continuous scale from a value domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Extends the domain outward to multiples of the tick increment for
    /// `count` ticks. Repeats until the increment settles; a domain that
    /// never settles is left unchanged.
    pub fn nice(mut self, count: usize) -> Self {
        let (d0, d1) = self.domain;
        let reversed = d1 < d0;
        let (mut start, mut stop) = if reversed { (d1, d0) } else { (d0, d1) };
        let mut previous: Option<f64> = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if previous == Some(step) {
                self.domain = if reversed { (stop, start) } else { (start, stop) };
                return self;
            } else if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous = Some(step);
        }
        self
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span != 0.0 { (value - d0) / span } else { 0.5 };
        r0 * (1.0 - t) + r1 * t
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Label formatter for the ticks produced by [`LinearScale::ticks`]
    /// with the same `count`.
    pub fn tick_format(&self, count: usize) -> impl Fn(f64) -> String + use<> {
        let decimals = precision_fixed(tick_step(self.domain.0, self.domain.1, count));
        move |value| format_grouped(value, decimals)
    }
}

/// Categorical scale mapping labels to evenly spaced bands.
///
/// Inner and outer padding are both `padding` (a fraction of the step),
/// and the bands are centred in the range. Repeated labels share the
/// band of their first occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    index: HashMap<String, usize>,
    range: (f64, f64),
    positions: Vec<f64>,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    const ALIGN: f64 = 0.5;

    pub fn new<I, S>(labels: I, range: (f64, f64), padding: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut domain = Vec::new();
        let mut index = HashMap::new();
        for label in labels {
            let label = label.into();
            if !index.contains_key(&label) {
                index.insert(label.clone(), domain.len());
                domain.push(label);
            }
        }

        let n = domain.len() as f64;
        let (r0, r1) = range;
        let reverse = r1 < r0;
        let (mut start, stop) = if reverse { (r1, r0) } else { (r0, r1) };
        let step = (stop - start) / (n - padding + padding * 2.0).max(1.0);
        start += (stop - start - step * (n - padding)) * Self::ALIGN;
        let bandwidth = step * (1.0 - padding);
        let mut positions: Vec<f64> = (0..domain.len()).map(|i| start + step * i as f64).collect();
        if reverse {
            positions.reverse();
        }

        Self { domain, index, range, positions, step, bandwidth }
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Left edge of the band, `None` for labels outside the domain.
    pub fn position(&self, label: &str) -> Option<f64> {
        self.index.get(label).map(|&i| self.positions[i])
    }

    /// Centre of the band.
    pub fn center(&self, label: &str) -> Option<f64> {
        self.position(label).map(|x| x + self.bandwidth / 2.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}
