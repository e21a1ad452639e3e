//! The engine owns everything derived from the active configuration: the generator,
//! the memo tables, the histogram accumulator and the seeded RNG. All mutation goes
//! through `configure`/`apply`, the draw methods and `reset`.

use std::rc::Rc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::cache::{CacheKey, EngineCache};
use crate::config;
use crate::density::{generate_curve, pdf_at_lane, CurvePoint};
use crate::distribution::{DistributionConfig, SimulationConfig};
use crate::error::{Error, Result};
use crate::histogram::{HistogramAccumulator, HistogramBin};
use crate::lanes::{assign_lane, lane_to_value};
use crate::range::{theoretical_range, Range};
use crate::sampling::Sampler;
use crate::stats::{theoretical_stats, Stats};

/// Outcome of one draw. `lane_index` is meaningless when `accepted` is false.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaneSample {
    pub lane_index: usize,
    pub raw_value: f64,
    pub accepted: bool,
}

/// One bar of the theoretical per-lane chart.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaneBar {
    pub lane: usize,
    pub value: f64,
    pub weight: f64,
}

pub struct Engine {
    config: SimulationConfig,
    active: DistributionConfig,
    key: CacheKey,
    sampler: Sampler,
    cache: EngineCache,
    histogram: HistogramAccumulator,
    rng: ChaCha8Rng,
}

impl Engine {
    pub fn new(config: SimulationConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let active = config.active_config();
        let key = CacheKey::for_config(&active)?;
        let sampler = Sampler::new(&active)?;
        tracing::debug!(distribution = active.kind().tag(), lanes = config.num_lanes, seed, "engine created");
        Ok(Self {
            histogram: HistogramAccumulator::new(config.num_lanes),
            config,
            active,
            key,
            sampler,
            cache: EngineCache::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Make `dist` the active distribution with `num_lanes` lanes. The stored
    /// parameters of the other families are kept.
    pub fn configure(&mut self, dist: DistributionConfig, num_lanes: usize) -> Result<()> {
        let mut next = self.config.clone();
        next.active = dist.kind();
        next.num_lanes = num_lanes;
        next.params.set(dist);
        self.apply(next)
    }

    /// Replace the whole simulation config. Nothing changes if validation fails.
    ///
    /// Any change to the active family, its parameters or the lane count clears the
    /// cache and resets the histogram. Edits to inactive families only update the
    /// stored parameters.
    pub fn apply(&mut self, next: SimulationConfig) -> Result<()> {
        next.validate()?;
        let active = next.active_config();
        if active == self.active && next.num_lanes == self.config.num_lanes {
            self.config = next;
            return Ok(());
        }

        let key = CacheKey::for_config(&active)?;
        let sampler = Sampler::new(&active)?;

        self.config = next;
        self.active = active;
        self.key = key;
        self.sampler = sampler;
        self.cache.clear();
        self.histogram.reset(self.config.num_lanes);
        tracing::debug!(
            distribution = self.active.kind().tag(),
            lanes = self.config.num_lanes,
            params = %self.key.fingerprint,
            "engine reconfigured; cache and histogram cleared"
        );
        Ok(())
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn distribution(&self) -> &DistributionConfig {
        &self.active
    }

    pub fn num_lanes(&self) -> usize {
        self.config.num_lanes
    }

    /// One sample and lane assignment without retrying. Accepted draws are recorded.
    pub fn draw_once(&mut self) -> Result<LaneSample> {
        let raw_value = self.sampler.sample(&mut self.rng);
        let lane = assign_lane(raw_value, &self.active, self.config.num_lanes, &mut self.rng)?;
        let sample = LaneSample {
            lane_index: lane.unwrap_or(0),
            raw_value,
            accepted: lane.is_some(),
        };
        if sample.accepted {
            self.histogram.record(&sample);
        }
        Ok(sample)
    }

    /// Draw until a value lands in a lane, giving up after a bounded number of tries.
    pub fn draw_lane(&mut self) -> Result<LaneSample> {
        for _ in 0..config::MAX_REDRAWS {
            let sample = self.draw_once()?;
            if sample.accepted {
                return Ok(sample);
            }
        }
        tracing::warn!(
            distribution = self.active.kind().tag(),
            attempts = config::MAX_REDRAWS,
            "every draw fell outside the lanes"
        );
        Err(Error::Sampling {
            attempts: config::MAX_REDRAWS,
        })
    }

    pub fn range(&mut self) -> Range {
        let active = self.active;
        self.cache.range(&self.key, || theoretical_range(&active))
    }

    pub fn stats(&mut self) -> Stats {
        let active = self.active;
        self.cache.stats(&self.key, || theoretical_stats(&active))
    }

    pub fn curve(&mut self, num_points: usize) -> Result<Rc<[CurvePoint]>> {
        let range = self.range();
        let active = self.active;
        self.cache
            .curve(&self.key, num_points, || generate_curve(&range, num_points, &active))
    }

    /// Unnormalized density at the lane's representative value.
    pub fn lane_weight(&mut self, lane: usize) -> Result<f64> {
        let num_lanes = self.checked_lane(lane)?;
        let active = self.active;
        self.cache
            .lane_weight(&self.key, lane, num_lanes, || pdf_at_lane(lane, num_lanes, &active))
    }

    pub fn lane_value(&mut self, lane: usize) -> Result<f64> {
        let num_lanes = self.checked_lane(lane)?;
        let active = self.active;
        Ok(self
            .cache
            .lane_value(&self.key, lane, num_lanes, || lane_to_value(lane, num_lanes, &active)))
    }

    /// Lanes whose value is inside the display window, with weights summing to 1.
    pub fn theoretical_bars(&mut self) -> Result<Vec<LaneBar>> {
        let range = self.range();
        let mut bars = Vec::with_capacity(self.config.num_lanes);
        for lane in 0..self.config.num_lanes {
            let value = self.lane_value(lane)?;
            if range.contains_display(value) {
                bars.push(LaneBar {
                    lane,
                    value,
                    weight: self.lane_weight(lane)?,
                });
            }
        }
        let total: f64 = bars.iter().map(|b| b.weight).sum();
        if total > 0.0 {
            for bar in &mut bars {
                bar.weight /= total;
            }
        }
        Ok(bars)
    }

    pub fn empirical_stats(&self) -> Stats {
        self.histogram.stats()
    }

    pub fn histogram_bins(&mut self, num_bins: usize) -> Result<Vec<HistogramBin>> {
        let range = self.range();
        self.histogram.bins(num_bins, &range)
    }

    pub fn histogram(&self) -> &HistogramAccumulator {
        &self.histogram
    }

    pub fn cache(&self) -> &EngineCache {
        &self.cache
    }

    /// Forget every recorded draw and every memoized value.
    pub fn reset(&mut self) {
        self.histogram.reset(self.config.num_lanes);
        self.cache.clear();
        tracing::debug!("engine reset");
    }

    fn checked_lane(&self, lane: usize) -> Result<usize> {
        let num_lanes = self.config.num_lanes;
        if lane >= num_lanes {
            return Err(Error::config(format!(
                "lane {lane} out of range for {num_lanes} lanes"
            )));
        }
        Ok(num_lanes)
    }
}
