//! Density / mass evaluation and curve generation for the theoretical charts.

use serde::{Deserialize, Serialize};
use statrs::distribution::{Binomial, Continuous, Discrete, Gamma, Normal, Poisson, StudentsT};

use crate::distribution::DistributionConfig;
use crate::error::Result;
use crate::lanes::lane_to_value;
use crate::range::Range;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

impl CurvePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Density at `x`. Discrete families round to the nearest integer and are zero
/// outside their support.
pub fn pdf_at(x: f64, dist: &DistributionConfig) -> Result<f64> {
    let y = match *dist {
        DistributionConfig::Normal(p) => Normal::new(p.mean, p.std_dev)?.pdf(x),
        DistributionConfig::Uniform(p) => {
            if x >= p.min && x <= p.max {
                1.0 / (p.max - p.min)
            } else {
                0.0
            }
        }
        DistributionConfig::Exponential(p) => {
            if x >= 0.0 {
                p.rate * (-p.rate * x).exp()
            } else {
                0.0
            }
        }
        DistributionConfig::Gamma(p) => {
            if x <= 0.0 {
                0.0
            } else {
                Gamma::new(p.alpha, 1.0 / p.beta)?.pdf(x)
            }
        }
        DistributionConfig::Poisson(p) => {
            let k = x.round();
            if k < 0.0 || !k.is_finite() {
                0.0
            } else {
                Poisson::new(p.lambda)?.pmf(k as u64)
            }
        }
        DistributionConfig::Binomial(p) => {
            let k = x.round();
            if k < 0.0 || k > p.n as f64 || !k.is_finite() {
                0.0
            } else {
                Binomial::new(p.p, p.n)?.pmf(k as u64)
            }
        }
        DistributionConfig::StudentT(p) => StudentsT::new(0.0, 1.0, p.dof)?.pdf(x),
    };
    Ok(if y.is_finite() { y.max(0.0) } else { 0.0 })
}

/// Density at the representative value of `lane`. Callers renormalize across the
/// visible lanes.
pub fn pdf_at_lane(lane: usize, num_lanes: usize, dist: &DistributionConfig) -> Result<f64> {
    pdf_at(lane_to_value(lane, num_lanes, dist), dist)
}

/// Evenly spaced density samples across `[range.min, range.max]`.
///
/// Uniform is drawn as a box with vertical edges instead, since its density is a step.
pub fn generate_curve(
    range: &Range,
    num_points: usize,
    dist: &DistributionConfig,
) -> Result<Vec<CurvePoint>> {
    if let DistributionConfig::Uniform(p) = *dist {
        return Ok(uniform_box(p.min, p.max));
    }

    let num_points = num_points.max(1);
    let step = (range.max - range.min) / num_points as f64;
    (0..=num_points)
        .map(|i| {
            let x = range.min + i as f64 * step;
            Ok(CurvePoint::new(x, pdf_at(x, dist)?))
        })
        .collect()
}

fn uniform_box(min: f64, max: f64) -> Vec<CurvePoint> {
    let (min, mut max) = if min > max { (max, min) } else { (min, max) };
    if (max - min).abs() < 1e-10 {
        max = min + 0.1;
    }
    let height = 1.0 / (max - min);
    let eps = (max - min) * 0.001;

    vec![
        CurvePoint::new(min - eps, 0.0),
        CurvePoint::new(min, 0.0),
        CurvePoint::new(min, height),
        CurvePoint::new(min + eps, height),
        CurvePoint::new(max - eps, height),
        CurvePoint::new(max, height),
        CurvePoint::new(max, 0.0),
        CurvePoint::new(max + eps, 0.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::theoretical_range;

    #[test]
    fn discrete_densities_round_and_respect_support() {
        let pois = DistributionConfig::poisson(4.0);
        let at_two = pdf_at(2.0, &pois).unwrap();
        assert!((pdf_at(2.3, &pois).unwrap() - at_two).abs() < 1e-15);
        assert_eq!(pdf_at(-1.0, &pois).unwrap(), 0.0);

        let binom = DistributionConfig::binomial(4, 0.5);
        assert!((pdf_at(2.0, &binom).unwrap() - 6.0 / 16.0).abs() < 1e-12);
        assert_eq!(pdf_at(5.0, &binom).unwrap(), 0.0);
        assert_eq!(pdf_at(-0.6, &binom).unwrap(), 0.0);
    }

    #[test]
    fn continuous_densities_match_closed_forms() {
        let normal = DistributionConfig::normal(0.0, 1.0);
        let peak = 1.0 / (2.0 * std::f64::consts::PI).sqrt();
        assert!((pdf_at(0.0, &normal).unwrap() - peak).abs() < 1e-12);

        let expo = DistributionConfig::exponential(2.0);
        assert!((pdf_at(0.0, &expo).unwrap() - 2.0).abs() < 1e-12);
        assert_eq!(pdf_at(-0.1, &expo).unwrap(), 0.0);

        let gamma = DistributionConfig::gamma(1.0, 2.0);
        // shape 1 is an exponential with mean 2
        assert!((pdf_at(1.0, &gamma).unwrap() - 0.5 * (-0.5f64).exp()).abs() < 1e-12);
        assert_eq!(pdf_at(0.0, &gamma).unwrap(), 0.0);

        let uni = DistributionConfig::uniform(0.0, 4.0);
        assert_eq!(pdf_at(2.0, &uni).unwrap(), 0.25);
        assert_eq!(pdf_at(4.5, &uni).unwrap(), 0.0);
    }

    #[test]
    fn densities_are_never_negative() {
        let dists = [
            DistributionConfig::student_t(1.0),
            DistributionConfig::gamma(0.3, 1.0),
            DistributionConfig::normal(2.0, 0.5),
        ];
        for dist in dists {
            for i in -50..50 {
                let y = pdf_at(i as f64 * 0.37, &dist).unwrap();
                assert!(y >= 0.0 && y.is_finite());
            }
        }
    }

    #[test]
    fn curve_has_one_more_point_than_steps() {
        let dist = DistributionConfig::normal(0.0, 1.0);
        let range = theoretical_range(&dist);
        let curve = generate_curve(&range, 200, &dist).unwrap();
        assert_eq!(curve.len(), 201);
        assert!((curve[0].x - range.min).abs() < 1e-12);
        assert!((curve[200].x - range.max).abs() < 1e-9);
        assert!(curve[100].y > curve[0].y);
    }

    #[test]
    fn uniform_curve_is_a_box() {
        let dist = DistributionConfig::uniform(2.0, 6.0);
        let range = theoretical_range(&dist);
        let curve = generate_curve(&range, 5, &dist).unwrap();
        assert_eq!(curve.len(), 8);
        let eps = 0.004;
        let xs: Vec<f64> = curve.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = curve.iter().map(|p| p.y).collect();
        let expected_x = [2.0 - eps, 2.0, 2.0, 2.0 + eps, 6.0 - eps, 6.0, 6.0, 6.0 + eps];
        for (x, e) in xs.iter().zip(expected_x) {
            assert!((x - e).abs() < 1e-12);
        }
        assert_eq!(ys, vec![0.0, 0.0, 0.25, 0.25, 0.25, 0.25, 0.0, 0.0]);
    }

    #[test]
    fn near_degenerate_uniform_box_is_widened() {
        let curve = uniform_box(3.0, 3.0 + 1e-12);
        assert!((curve[5].x - 3.1).abs() < 1e-12);
        assert!((curve[2].y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn lane_density_uses_lane_value() {
        let dist = DistributionConfig::normal(0.0, 1.0);
        let center = pdf_at_lane(4, 9, &dist).unwrap();
        assert!((center - pdf_at(0.0, &dist).unwrap()).abs() < 1e-15);
        assert!(pdf_at_lane(0, 9, &dist).unwrap() < center);
    }
}
