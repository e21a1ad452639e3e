//! One canonical random generator per distribution family.

use rand::Rng;
use rand_distr::{Binomial, Distribution, Exp, Gamma, Normal, Poisson, StudentT, Uniform};

use crate::distribution::DistributionConfig;
use crate::error::{Error, Result};

/// Generator built from a validated [`DistributionConfig`]. Rebuilt whenever the
/// engine is reconfigured.
#[derive(Clone, Debug)]
pub enum Sampler {
    Uniform(Uniform<f64>),
    Normal(Normal<f64>),
    Exponential(Exp<f64>),
    Poisson(Poisson<f64>),
    Gamma(Gamma<f64>),
    Binomial(Binomial),
    StudentT(StudentT<f64>),
}

impl Sampler {
    pub fn new(dist: &DistributionConfig) -> Result<Self> {
        dist.validate()?;
        let sampler = match *dist {
            DistributionConfig::Uniform(p) => Sampler::Uniform(Uniform::new(p.min, p.max)),
            DistributionConfig::Normal(p) => Sampler::Normal(
                Normal::new(p.mean, p.std_dev).map_err(|e| generator_error("normal", e))?,
            ),
            DistributionConfig::Exponential(p) => Sampler::Exponential(
                Exp::new(p.rate).map_err(|e| generator_error("exponential", e))?,
            ),
            DistributionConfig::Poisson(p) => Sampler::Poisson(
                Poisson::new(p.lambda).map_err(|e| generator_error("poisson", e))?,
            ),
            DistributionConfig::Gamma(p) => Sampler::Gamma(
                Gamma::new(p.alpha, p.beta).map_err(|e| generator_error("gamma", e))?,
            ),
            DistributionConfig::Binomial(p) => Sampler::Binomial(
                Binomial::new(p.n, p.p).map_err(|e| generator_error("binomial", e))?,
            ),
            DistributionConfig::StudentT(p) => Sampler::StudentT(
                StudentT::new(p.dof).map_err(|e| generator_error("student-t", e))?,
            ),
        };
        Ok(sampler)
    }

    /// Draw one raw value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Sampler::Uniform(d) => d.sample(rng),
            Sampler::Normal(d) => d.sample(rng),
            Sampler::Exponential(d) => d.sample(rng),
            Sampler::Poisson(d) => d.sample(rng),
            Sampler::Gamma(d) => d.sample(rng),
            Sampler::Binomial(d) => d.sample(rng) as f64,
            Sampler::StudentT(d) => d.sample(rng),
        }
    }
}

fn generator_error(family: &str, err: impl std::fmt::Display) -> Error {
    Error::config(format!("cannot build {family} generator: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::streaming_stats;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn draw_many(dist: DistributionConfig, n: usize) -> Vec<f64> {
        let sampler = Sampler::new(&dist).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        (0..n).map(|_| sampler.sample(&mut rng)).collect()
    }

    #[test]
    fn sample_means_approach_theory() {
        let cases = [
            (DistributionConfig::normal(3.0, 2.0), 3.0, 0.1),
            (DistributionConfig::uniform(0.0, 10.0), 5.0, 0.1),
            (DistributionConfig::exponential(2.0), 0.5, 0.03),
            (DistributionConfig::poisson(5.0), 5.0, 0.1),
            (DistributionConfig::gamma(2.0, 2.0), 4.0, 0.15),
            (DistributionConfig::binomial(10, 0.5), 5.0, 0.1),
            (DistributionConfig::student_t(10.0), 0.0, 0.1),
        ];
        for (dist, expected, tol) in cases {
            let values = draw_many(dist, 20_000);
            let mean = streaming_stats(&values).mean;
            assert!(
                (mean - expected).abs() < tol,
                "{:?}: mean {mean} not within {tol} of {expected}",
                dist.kind()
            );
        }
    }

    #[test]
    fn discrete_families_draw_integers_in_support() {
        for v in draw_many(DistributionConfig::binomial(12, 0.3), 2_000) {
            assert_eq!(v.fract(), 0.0);
            assert!((0.0..=12.0).contains(&v));
        }
        for v in draw_many(DistributionConfig::poisson(3.0), 2_000) {
            assert_eq!(v.fract(), 0.0);
            assert!(v >= 0.0);
        }
    }

    #[test]
    fn invalid_parameters_are_rejected_before_building() {
        assert!(Sampler::new(&DistributionConfig::normal(0.0, 0.0)).is_err());
        assert!(Sampler::new(&DistributionConfig::uniform(2.0, 1.0)).is_err());
    }
}
