//! Closed-form and streaming statistics for chart labels and sigma markers.

use serde::{Deserialize, Serialize};

use crate::distribution::DistributionConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
}

impl Stats {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    /// `mean + k * std_dev`.
    pub fn sigma(&self, k: f64) -> f64 {
        self.mean + k * self.std_dev
    }
}

/// Welford accumulator. Reports population variance (`m2 / count`).
#[derive(Clone, Copy, Debug, Default)]
pub struct Welford {
    count: u64,
    mean: f64,
    m2: f64,
}

impl Welford {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        if self.count > 1 {
            self.m2 / self.count as f64
        } else {
            0.0
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn stats(&self) -> Stats {
        Stats::new(self.mean, self.std_dev())
    }
}

/// Single-pass mean and population standard deviation. `{0, 0}` for no values.
pub fn streaming_stats(values: &[f64]) -> Stats {
    let mut acc = Welford::new();
    for &v in values {
        acc.push(v);
    }
    acc.stats()
}

// Student's t has no finite variance for dof <= 2; the chart still needs a width.
const STUDENT_T_WIDE_STD_DEV: f64 = 10.0;
const STUDENT_T_CAUCHY_STD_DEV: f64 = 100.0;

/// Closed-form mean and standard deviation for a family.
pub fn theoretical_stats(dist: &DistributionConfig) -> Stats {
    match *dist {
        DistributionConfig::Normal(p) => Stats::new(p.mean, p.std_dev),
        DistributionConfig::Uniform(p) => {
            let width = p.max - p.min;
            Stats::new((p.min + p.max) / 2.0, (width * width / 12.0).sqrt())
        }
        DistributionConfig::Poisson(p) => Stats::new(p.lambda, p.lambda.sqrt()),
        DistributionConfig::Gamma(p) => {
            Stats::new(p.alpha * p.beta, (p.alpha * p.beta * p.beta).sqrt())
        }
        DistributionConfig::Binomial(p) => {
            let n = p.n as f64;
            Stats::new(n * p.p, (n * p.p * (1.0 - p.p)).sqrt())
        }
        DistributionConfig::Exponential(p) => {
            let mean = 1.0 / p.rate;
            Stats::new(mean, mean)
        }
        DistributionConfig::StudentT(p) => {
            let std_dev = if p.dof > 2.0 {
                (p.dof / (p.dof - 2.0)).sqrt()
            } else if p.dof > 1.0 {
                STUDENT_T_WIDE_STD_DEV
            } else {
                STUDENT_T_CAUCHY_STD_DEV
            };
            Stats::new(0.0, std_dev)
        }
    }
}
