//! Empirical outcome tracking for the histogram chart.

use serde::{Deserialize, Serialize};

use crate::engine::LaneSample;
use crate::error::{Error, Result};
use crate::range::Range;
use crate::stats::{Stats, Welford};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccumulatorState {
    Empty,
    Accumulating,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub bin_start: f64,
    pub bin_end: f64,
    pub count: usize,
    pub frequency: f64,
}

/// Raw drawn values plus per-lane counts since the last reset.
#[derive(Clone, Debug)]
pub struct HistogramAccumulator {
    raw_values: Vec<f64>,
    lane_counts: Vec<u64>,
    running: Welford,
}

impl HistogramAccumulator {
    pub fn new(num_lanes: usize) -> Self {
        Self {
            raw_values: Vec::new(),
            lane_counts: vec![0; num_lanes],
            running: Welford::new(),
        }
    }

    pub fn reset(&mut self, num_lanes: usize) {
        self.raw_values.clear();
        self.lane_counts.clear();
        self.lane_counts.resize(num_lanes, 0);
        self.running = Welford::new();
    }

    /// Record an accepted draw. `lane_index` must be below the lane count given to the
    /// last `new`/`reset`; the engine only records lanes it assigned itself.
    pub fn record(&mut self, sample: &LaneSample) {
        debug_assert!(
            sample.lane_index < self.lane_counts.len(),
            "lane {} out of range for {} lanes",
            sample.lane_index,
            self.lane_counts.len()
        );
        self.raw_values.push(sample.raw_value);
        self.running.push(sample.raw_value);
        if let Some(count) = self.lane_counts.get_mut(sample.lane_index) {
            *count += 1;
        }
    }

    pub fn state(&self) -> AccumulatorState {
        if self.raw_values.is_empty() {
            AccumulatorState::Empty
        } else {
            AccumulatorState::Accumulating
        }
    }

    pub fn total(&self) -> usize {
        self.raw_values.len()
    }

    pub fn raw_values(&self) -> &[f64] {
        &self.raw_values
    }

    pub fn lane_counts(&self) -> &[u64] {
        &self.lane_counts
    }

    pub fn num_lanes(&self) -> usize {
        self.lane_counts.len()
    }

    /// Mean and population standard deviation of everything recorded.
    pub fn stats(&self) -> Stats {
        self.running.stats()
    }

    /// Rebin the raw values into `num_bins` equal-width bins over the display window.
    ///
    /// This is deliberately independent of lane assignment: bins are half-open
    /// `[start, end)` with the last one closed, and values outside the window are
    /// clamped into the outer bins so every recorded value is counted.
    pub fn bins(&self, num_bins: usize, range: &Range) -> Result<Vec<HistogramBin>> {
        if num_bins == 0 {
            return Err(Error::config("histogram needs at least one bin"));
        }
        if !range.is_renderable() {
            return Err(Error::Range {
                display_min: range.display_min,
                display_max: range.display_max,
            });
        }

        let thresholds = thresholds(num_bins, range);
        let mut counts = vec![0usize; num_bins];
        // interior edges only; a value's bin is the number of interior edges <= it
        let interior = &thresholds[1..num_bins];
        for &v in &self.raw_values {
            let idx = interior.partition_point(|&edge| edge <= v);
            counts[idx.min(num_bins - 1)] += 1;
        }

        let total = self.raw_values.len();
        Ok(counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                bin_start: thresholds[i],
                bin_end: thresholds[i + 1],
                count,
                frequency: if total > 0 {
                    count as f64 / total as f64
                } else {
                    0.0
                },
            })
            .collect())
    }
}

/// `num_bins + 1` edges; the last is pinned to `display_max` to absorb drift.
fn thresholds(num_bins: usize, range: &Range) -> Vec<f64> {
    let step = range.display_width() / num_bins as f64;
    let mut edges: Vec<f64> = (0..=num_bins)
        .map(|i| range.display_min + i as f64 * step)
        .collect();
    edges[num_bins] = range.display_max;
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(lane_index: usize, raw_value: f64) -> LaneSample {
        LaneSample {
            lane_index,
            raw_value,
            accepted: true,
        }
    }

    fn window(min: f64, max: f64) -> Range {
        Range {
            min,
            max,
            display_min: min,
            display_max: max,
        }
    }

    #[test]
    fn record_moves_from_empty_to_accumulating() {
        let mut acc = HistogramAccumulator::new(5);
        assert_eq!(acc.state(), AccumulatorState::Empty);
        acc.record(&sample(2, 0.4));
        acc.record(&sample(2, 0.5));
        assert_eq!(acc.state(), AccumulatorState::Accumulating);
        assert_eq!(acc.lane_counts(), &[0, 0, 2, 0, 0]);
        assert_eq!(acc.total(), 2);

        acc.reset(3);
        assert_eq!(acc.state(), AccumulatorState::Empty);
        assert_eq!(acc.lane_counts(), &[0, 0, 0]);
        assert_eq!(acc.stats(), Stats::default());
    }

    #[test]
    fn bin_counts_sum_to_total_and_last_edge_is_exact() {
        let mut acc = HistogramAccumulator::new(7);
        let values = [-5.0, 0.0, 0.1, 0.3, 0.33, 0.7, 0.99, 1.0, 12.0];
        for (i, v) in values.iter().enumerate() {
            acc.record(&sample(i % 7, *v));
        }
        // 0.1 * 7 does not land exactly on 0.7 in floating point
        let range = window(0.0, 0.7);
        let bins = acc.bins(7, &range).unwrap();
        assert_eq!(bins.len(), 7);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_eq!(bins.last().unwrap().bin_end, range.display_max);
        assert_eq!(bins[0].bin_start, range.display_min);
    }

    #[test]
    fn bins_are_half_open_with_closed_last_bin() {
        let mut acc = HistogramAccumulator::new(4);
        for v in [0.0, 1.0, 2.0, 3.0, 4.0] {
            acc.record(&sample(0, v));
        }
        let bins = acc.bins(4, &window(0.0, 4.0)).unwrap();
        let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 2]);
        assert!((bins[3].frequency - 0.4).abs() < 1e-12);
    }

    #[test]
    fn empty_accumulator_yields_zero_frequencies() {
        let acc = HistogramAccumulator::new(3);
        let bins = acc.bins(3, &window(-1.0, 1.0)).unwrap();
        assert!(bins.iter().all(|b| b.count == 0 && b.frequency == 0.0));
    }

    #[test]
    fn degenerate_window_is_a_range_error() {
        let acc = HistogramAccumulator::new(3);
        assert!(matches!(
            acc.bins(3, &window(2.0, 2.0)),
            Err(Error::Range { .. })
        ));
        assert!(matches!(
            acc.bins(3, &window(0.0, f64::INFINITY)),
            Err(Error::Range { .. })
        ));
        assert!(matches!(
            acc.bins(0, &window(0.0, 1.0)),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    #[cfg(debug_assertions)]
    fn recording_an_unknown_lane_is_caught() {
        let mut acc = HistogramAccumulator::new(3);
        acc.record(&sample(3, 0.5));
    }

    #[test]
    fn running_stats_match_recorded_values() {
        let mut acc = HistogramAccumulator::new(2);
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            acc.record(&sample(0, v));
        }
        let s = acc.stats();
        assert!((s.mean - 3.0).abs() < 1e-12);
        assert!((s.std_dev - 2.0f64.sqrt()).abs() < 1e-12);
    }
}
