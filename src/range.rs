use serde::{Deserialize, Serialize};

use crate::distribution::DistributionConfig;
use crate::lanes::student_t_width;
use crate::stats::theoretical_stats;

/// Theoretical support window (`min`/`max`) and the window actually drawn.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
    pub display_min: f64,
    pub display_max: f64,
}

impl Range {
    pub fn symmetric(center: f64, half_width: f64) -> Self {
        Self {
            min: center - half_width,
            max: center + half_width,
            display_min: center - half_width,
            display_max: center + half_width,
        }
    }

    pub fn display_width(&self) -> f64 {
        self.display_max - self.display_min
    }

    pub fn contains_display(&self, x: f64) -> bool {
        x >= self.display_min && x <= self.display_max
    }

    /// A display window that can be split into bins.
    pub fn is_renderable(&self) -> bool {
        self.display_min.is_finite()
            && self.display_max.is_finite()
            && self.display_min < self.display_max
    }
}

/// Support and display windows for a family: generally `mean ± k·sigma` clipped to support.
pub fn theoretical_range(dist: &DistributionConfig) -> Range {
    let s = theoretical_stats(dist);
    match *dist {
        DistributionConfig::Normal(_) | DistributionConfig::Uniform(_) => {
            Range::symmetric(s.mean, 4.0 * s.std_dev)
        }
        DistributionConfig::Exponential(_) | DistributionConfig::Gamma(_) => Range {
            min: 0.0,
            max: s.sigma(4.0),
            display_min: 0.0,
            display_max: s.sigma(3.0),
        },
        DistributionConfig::Poisson(_) => Range {
            min: s.sigma(-4.0).max(0.0),
            max: s.sigma(4.0),
            display_min: s.sigma(-3.0).max(0.0),
            display_max: s.sigma(3.0),
        },
        DistributionConfig::Binomial(p) => {
            let n = p.n as f64;
            Range {
                min: s.sigma(-4.0).max(0.0),
                max: s.sigma(4.0).min(n),
                display_min: s.sigma(-3.0).max(0.0),
                display_max: s.sigma(3.0).min(n),
            }
        }
        DistributionConfig::StudentT(p) => Range::symmetric(0.0, student_t_width(p.dof) / 2.0),
    }
}
