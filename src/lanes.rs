//! Mapping between raw sample values and discrete lanes.
//!
//! Every family has its own scale between its support and the fixed lane count.
//! `assign_lane` places a drawn value; `lane_to_value` gives the representative value
//! used for axis labels and the theoretical bar chart. The two are not exact inverses
//! where assignment is nonlinear or rejection-based, but `lane_to_value` is monotonic
//! in the lane index.

use rand::Rng;
use statrs::distribution::{ContinuousCDF, Gamma};

use crate::distribution::{DistributionConfig, GammaParams};
use crate::error::Result;
use crate::stats::theoretical_stats;

/// Lane count the normal mapping spreads over one standard deviation: `N / 8`.
const NORMAL_LANES_PER_SIGMA_DIVISOR: f64 = 8.0;
const POISSON_SPAN_LAMBDAS: f64 = 3.0;
const EXPONENTIAL_SPAN_MEANS: f64 = 5.0;

/// Visible width of the student-t window; heavier tails get more room.
pub fn student_t_width(dof: f64) -> f64 {
    if dof < 5.0 {
        10.0
    } else {
        6.0
    }
}

/// Right edge of the gamma lane scale, chosen by shape regime.
pub fn gamma_scale_factor(params: &GammaParams) -> f64 {
    let s = theoretical_stats(&DistributionConfig::Gamma(*params));
    if params.alpha <= 1.0 {
        s.sigma(4.0)
    } else if params.alpha <= 3.0 {
        s.sigma(3.0)
    } else {
        4.0 * s.mean
    }
}

/// Index of the middle lane. Fractional for even lane counts.
pub fn center_lane(num_lanes: usize) -> f64 {
    (num_lanes as f64 - 1.0) / 2.0
}

fn clamp_lane(lane: f64, num_lanes: usize) -> usize {
    let last = num_lanes.saturating_sub(1);
    if lane.is_nan() || lane <= 0.0 {
        0
    } else if lane >= last as f64 {
        last
    } else {
        lane as usize
    }
}

/// Map a drawn value to a lane. `Ok(None)` means the value falls outside the lanes and
/// must be redrawn (normal and student-t only).
///
/// The gamma mapping consumes one uniform draw from `rng` when a value lands beyond the
/// last lane: with probability `1 - CDF(value)` the ball goes to the last lane, otherwise
/// to the lane holding the mean.
pub fn assign_lane<R: Rng + ?Sized>(
    value: f64,
    dist: &DistributionConfig,
    num_lanes: usize,
    rng: &mut R,
) -> Result<Option<usize>> {
    let n = num_lanes as f64;
    let lane = match *dist {
        DistributionConfig::Uniform(p) => {
            if value <= p.min {
                return Ok(Some(0));
            }
            if value >= p.max {
                return Ok(Some(num_lanes.saturating_sub(1)));
            }
            (n * (value - p.min) / (p.max - p.min)).floor()
        }
        DistributionConfig::Normal(p) => {
            let z = (value - p.mean) / p.std_dev;
            let scaled = center_lane(num_lanes) + z * (n / NORMAL_LANES_PER_SIGMA_DIVISOR);
            if !(0.0..n).contains(&scaled) {
                return Ok(None);
            }
            scaled.floor()
        }
        DistributionConfig::Poisson(p) => (value / (POISSON_SPAN_LAMBDAS * p.lambda) * n).floor(),
        DistributionConfig::Gamma(p) => {
            let scale = gamma_scale_factor(&p);
            let lane = (value / scale * n).floor();
            if lane >= n {
                let tail = 1.0 - Gamma::new(p.alpha, 1.0 / p.beta)?.cdf(value);
                if rng.gen::<f64>() < tail {
                    n - 1.0
                } else {
                    (p.alpha * p.beta / scale * n).floor()
                }
            } else {
                lane.max(0.0)
            }
        }
        DistributionConfig::Binomial(p) => {
            if p.n == 0 {
                return Ok(Some(0));
            }
            (value / p.n as f64 * n).floor()
        }
        DistributionConfig::Exponential(p) => {
            let mean = 1.0 / p.rate;
            (value / (EXPONENTIAL_SPAN_MEANS * mean) * n).floor()
        }
        DistributionConfig::StudentT(p) => {
            let scaled = center_lane(num_lanes) + (value / student_t_width(p.dof)) * n / 2.0;
            if !(0.0..n).contains(&scaled) {
                return Ok(None);
            }
            scaled.floor()
        }
    };
    Ok(Some(clamp_lane(lane, num_lanes)))
}

/// Representative value of a lane, spanning the family's display window.
pub fn lane_to_value(lane: usize, num_lanes: usize, dist: &DistributionConfig) -> f64 {
    let t = if num_lanes > 1 {
        lane as f64 / (num_lanes as f64 - 1.0)
    } else {
        0.0
    };
    match *dist {
        DistributionConfig::Uniform(p) => p.min + t * (p.max - p.min),
        DistributionConfig::Normal(p) => p.mean + (t * 8.0 - 4.0) * p.std_dev,
        DistributionConfig::Exponential(p) => t * EXPONENTIAL_SPAN_MEANS / p.rate,
        DistributionConfig::Poisson(p) => t * POISSON_SPAN_LAMBDAS * p.lambda,
        DistributionConfig::Gamma(p) => t * gamma_scale_factor(&p),
        DistributionConfig::Binomial(p) => t * p.n as f64,
        DistributionConfig::StudentT(p) => {
            let width = student_t_width(p.dof);
            t * width - width / 2.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::Sampler;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn all_families() -> Vec<DistributionConfig> {
        vec![
            DistributionConfig::uniform(1.0, 9.0),
            DistributionConfig::normal(0.0, 1.0),
            DistributionConfig::exponential(1.0),
            DistributionConfig::poisson(5.0),
            DistributionConfig::gamma(2.0, 2.0),
            DistributionConfig::gamma(0.5, 1.0),
            DistributionConfig::gamma(5.0, 1.0),
            DistributionConfig::binomial(10, 0.5),
            DistributionConfig::student_t(3.0),
            DistributionConfig::student_t(30.0),
        ]
    }

    #[test]
    fn uniform_lanes_match_worked_example() {
        let dist = DistributionConfig::uniform(0.0, 4.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let lanes: Vec<_> = [0.0, 1.0, 2.0, 3.9]
            .iter()
            .map(|&v| assign_lane(v, &dist, 4, &mut rng).unwrap())
            .collect();
        assert_eq!(lanes, vec![Some(0), Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn uniform_edges_clamp_to_outer_lanes() {
        let dist = DistributionConfig::uniform(0.0, 4.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(assign_lane(-3.0, &dist, 4, &mut rng).unwrap(), Some(0));
        assert_eq!(assign_lane(4.0, &dist, 4, &mut rng).unwrap(), Some(3));
        assert_eq!(assign_lane(100.0, &dist, 4, &mut rng).unwrap(), Some(3));
    }

    #[test]
    fn drawn_lanes_always_fall_inside_lane_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for dist in all_families() {
            let sampler = Sampler::new(&dist).unwrap();
            for num_lanes in [3usize, 4, 11, 51] {
                for _ in 0..500 {
                    let v = sampler.sample(&mut rng);
                    if let Some(lane) = assign_lane(v, &dist, num_lanes, &mut rng).unwrap() {
                        assert!(lane < num_lanes, "{:?} lane {lane} of {num_lanes}", dist.kind());
                    }
                }
            }
        }
    }

    #[test]
    fn extreme_values_are_clamped_or_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for dist in all_families() {
            for v in [-1e9, -3.0, 0.0, 1e9] {
                if let Some(lane) = assign_lane(v, &dist, 7, &mut rng).unwrap() {
                    assert!(lane < 7);
                }
            }
        }
    }

    #[test]
    fn normal_rejects_values_beyond_four_sigma() {
        let dist = DistributionConfig::normal(10.0, 2.0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(assign_lane(10.0, &dist, 9, &mut rng).unwrap(), Some(4));
        assert_eq!(assign_lane(10.0 + 9.0 * 2.0, &dist, 9, &mut rng).unwrap(), None);
        assert_eq!(assign_lane(10.0 - 9.0 * 2.0, &dist, 9, &mut rng).unwrap(), None);
    }

    #[test]
    fn student_t_rejects_far_tails() {
        let dist = DistributionConfig::student_t(2.0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(assign_lane(0.0, &dist, 11, &mut rng).unwrap(), Some(5));
        assert_eq!(assign_lane(50.0, &dist, 11, &mut rng).unwrap(), None);
        assert_eq!(assign_lane(-50.0, &dist, 11, &mut rng).unwrap(), None);
    }

    #[test]
    fn gamma_tail_goes_to_last_lane_or_mean_lane_only() {
        let params = GammaParams { alpha: 5.0, beta: 1.0 };
        let dist = DistributionConfig::Gamma(params);
        let num_lanes = 21;
        let scale = gamma_scale_factor(&params);
        assert_eq!(scale, 20.0);
        let mean_lane = (5.0 / scale * num_lanes as f64).floor() as usize;

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut seen_last = 0;
        let mut seen_mean = 0;
        for i in 0..2_000 {
            // just above 4 * mean, where the tail probability is small but not zero
            let v = 20.0 + (i % 10) as f64 * 0.01;
            let lane = assign_lane(v, &dist, num_lanes, &mut rng).unwrap().unwrap();
            assert!(lane == num_lanes - 1 || lane == mean_lane, "unexpected lane {lane}");
            if lane == num_lanes - 1 {
                seen_last += 1;
            } else {
                seen_mean += 1;
            }
        }
        assert!(seen_mean > seen_last);
    }

    #[test]
    fn gamma_scale_factor_depends_on_shape() {
        let small = GammaParams { alpha: 1.0, beta: 2.0 };
        assert!((gamma_scale_factor(&small) - (2.0 + 4.0 * 2.0)).abs() < 1e-12);
        let mid = GammaParams { alpha: 2.0, beta: 1.0 };
        assert!((gamma_scale_factor(&mid) - (2.0 + 3.0 * 2.0f64.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn binomial_with_no_trials_uses_first_lane() {
        let dist = DistributionConfig::binomial(0, 0.5);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert_eq!(assign_lane(0.0, &dist, 5, &mut rng).unwrap(), Some(0));
    }

    #[test]
    fn lane_values_are_monotonic_and_span_display_window() {
        for dist in all_families() {
            let num_lanes = 21;
            let values: Vec<f64> = (0..num_lanes)
                .map(|i| lane_to_value(i, num_lanes, &dist))
                .collect();
            assert!(values.windows(2).all(|w| w[0] <= w[1]), "{:?}", dist.kind());

            // uniform lanes cover its support, which sits inside the display window
            if let DistributionConfig::Uniform(p) = dist {
                assert_eq!((values[0], values[num_lanes - 1]), (p.min, p.max));
                continue;
            }
            let range = crate::range::theoretical_range(&dist);
            assert!(values[0] <= range.display_min + 1e-9, "{:?}", dist.kind());
            assert!(values[num_lanes - 1] >= range.display_max - 1e-9, "{:?}", dist.kind());
        }
    }

    #[test]
    fn normal_lane_values_cover_four_sigma() {
        let dist = DistributionConfig::normal(1.0, 2.0);
        assert_eq!(lane_to_value(0, 9, &dist), -7.0);
        assert_eq!(lane_to_value(4, 9, &dist), 1.0);
        assert_eq!(lane_to_value(8, 9, &dist), 9.0);
    }
}
