//! Memo tables for derived quantities of the active parameter set.
//!
//! Entries are written once per key and read many times. The engine clears every
//! table whenever it is reconfigured, so a stale entry can never be served.

use std::collections::HashMap;
use std::rc::Rc;

use crate::density::CurvePoint;
use crate::distribution::{DistributionConfig, DistributionKind};
use crate::error::Result;
use crate::range::Range;
use crate::stats::Stats;

/// `(distribution tag, parameter fingerprint)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub kind: DistributionKind,
    pub fingerprint: String,
}

impl CacheKey {
    pub fn for_config(dist: &DistributionConfig) -> Result<Self> {
        Ok(Self {
            kind: dist.kind(),
            fingerprint: dist.fingerprint()?,
        })
    }
}

/// Per-lane tables are additionally keyed by lane index and lane count.
type LaneKey = (CacheKey, usize, usize);

#[derive(Debug, Default)]
pub struct EngineCache {
    ranges: HashMap<CacheKey, Range>,
    stats: HashMap<CacheKey, Stats>,
    curves: HashMap<(CacheKey, usize), Rc<[CurvePoint]>>,
    lane_weights: HashMap<LaneKey, f64>,
    lane_values: HashMap<LaneKey, f64>,
    hits: u64,
    misses: u64,
}

impl EngineCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn range(&mut self, key: &CacheKey, compute: impl FnOnce() -> Range) -> Range {
        if let Some(r) = self.ranges.get(key) {
            self.hits += 1;
            return *r;
        }
        self.misses += 1;
        let r = compute();
        self.ranges.insert(key.clone(), r);
        r
    }

    pub fn stats(&mut self, key: &CacheKey, compute: impl FnOnce() -> Stats) -> Stats {
        if let Some(s) = self.stats.get(key) {
            self.hits += 1;
            return *s;
        }
        self.misses += 1;
        let s = compute();
        self.stats.insert(key.clone(), s);
        s
    }

    pub fn curve(
        &mut self,
        key: &CacheKey,
        num_points: usize,
        compute: impl FnOnce() -> Result<Vec<CurvePoint>>,
    ) -> Result<Rc<[CurvePoint]>> {
        let curve_key = (key.clone(), num_points);
        if let Some(c) = self.curves.get(&curve_key) {
            self.hits += 1;
            return Ok(Rc::clone(c));
        }
        self.misses += 1;
        let curve: Rc<[CurvePoint]> = compute()?.into();
        self.curves.insert(curve_key, Rc::clone(&curve));
        Ok(curve)
    }

    pub fn lane_weight(
        &mut self,
        key: &CacheKey,
        lane: usize,
        num_lanes: usize,
        compute: impl FnOnce() -> Result<f64>,
    ) -> Result<f64> {
        let lane_key = (key.clone(), lane, num_lanes);
        if let Some(w) = self.lane_weights.get(&lane_key) {
            self.hits += 1;
            return Ok(*w);
        }
        self.misses += 1;
        let w = compute()?;
        self.lane_weights.insert(lane_key, w);
        Ok(w)
    }

    pub fn lane_value(
        &mut self,
        key: &CacheKey,
        lane: usize,
        num_lanes: usize,
        compute: impl FnOnce() -> f64,
    ) -> f64 {
        let lane_key = (key.clone(), lane, num_lanes);
        if let Some(v) = self.lane_values.get(&lane_key) {
            self.hits += 1;
            return *v;
        }
        self.misses += 1;
        let v = compute();
        self.lane_values.insert(lane_key, v);
        v
    }

    /// Drop every entry. Counters survive so diagnostics span reconfigurations.
    pub fn clear(&mut self) {
        self.ranges.clear();
        self.stats.clear();
        self.curves.clear();
        self.lane_weights.clear();
        self.lane_values.clear();
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
            + self.stats.len()
            + self.curves.len()
            + self.lane_weights.len()
            + self.lane_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
