//! Distribution families, their parameters and the simulation configuration.

use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{Error, Result};

/// Tag identifying one of the seven supported families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistributionKind {
    Uniform,
    Normal,
    Exponential,
    Poisson,
    Gamma,
    Binomial,
    StudentT,
}

impl DistributionKind {
    pub const ALL: [Self; 7] = [
        Self::Uniform,
        Self::Normal,
        Self::Exponential,
        Self::Poisson,
        Self::Gamma,
        Self::Binomial,
        Self::StudentT,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Uniform => "Uniform",
            Self::Normal => "Normal",
            Self::Exponential => "Exponential",
            Self::Poisson => "Poisson",
            Self::Gamma => "Gamma",
            Self::Binomial => "Binomial",
            Self::StudentT => "Student's t",
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Normal => "normal",
            Self::Exponential => "exponential",
            Self::Poisson => "poisson",
            Self::Gamma => "gamma",
            Self::Binomial => "binomial",
            Self::StudentT => "student-t",
        }
    }

    /// Families whose support starts at zero, so no negative sigma markers are drawn.
    pub fn is_positive_only(self) -> bool {
        matches!(self, Self::Exponential | Self::Gamma | Self::Poisson)
    }

    /// Families drawn around a literal centre lane.
    pub fn is_centered(self) -> bool {
        !matches!(self, Self::Uniform)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UniformParams {
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalParams {
    pub mean: f64,
    pub std_dev: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExponentialParams {
    pub rate: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoissonParams {
    pub lambda: f64,
}

/// Shape `alpha` and scale `beta`, so the mean is `alpha * beta`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GammaParams {
    pub alpha: f64,
    pub beta: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinomialParams {
    pub n: u64,
    pub p: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudentTParams {
    pub dof: f64,
}

/// A distribution family together with its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "distribution", rename_all = "kebab-case")]
pub enum DistributionConfig {
    Uniform(UniformParams),
    Normal(NormalParams),
    Exponential(ExponentialParams),
    Poisson(PoissonParams),
    Gamma(GammaParams),
    Binomial(BinomialParams),
    StudentT(StudentTParams),
}

impl DistributionConfig {
    pub fn uniform(min: f64, max: f64) -> Self {
        Self::Uniform(UniformParams { min, max })
    }

    pub fn normal(mean: f64, std_dev: f64) -> Self {
        Self::Normal(NormalParams { mean, std_dev })
    }

    pub fn exponential(rate: f64) -> Self {
        Self::Exponential(ExponentialParams { rate })
    }

    pub fn poisson(lambda: f64) -> Self {
        Self::Poisson(PoissonParams { lambda })
    }

    pub fn gamma(alpha: f64, beta: f64) -> Self {
        Self::Gamma(GammaParams { alpha, beta })
    }

    pub fn binomial(n: u64, p: f64) -> Self {
        Self::Binomial(BinomialParams { n, p })
    }

    pub fn student_t(dof: f64) -> Self {
        Self::StudentT(StudentTParams { dof })
    }

    pub fn kind(&self) -> DistributionKind {
        match self {
            Self::Uniform(_) => DistributionKind::Uniform,
            Self::Normal(_) => DistributionKind::Normal,
            Self::Exponential(_) => DistributionKind::Exponential,
            Self::Poisson(_) => DistributionKind::Poisson,
            Self::Gamma(_) => DistributionKind::Gamma,
            Self::Binomial(_) => DistributionKind::Binomial,
            Self::StudentT(_) => DistributionKind::StudentT,
        }
    }

    /// Reject parameter sets the engine cannot map onto lanes.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Uniform(UniformParams { min, max }) => {
                require_finite("uniform min", min)?;
                require_finite("uniform max", max)?;
                if min >= max {
                    return Err(Error::config(format!(
                        "uniform min ({min}) must be less than max ({max})"
                    )));
                }
            }
            Self::Normal(NormalParams { mean, std_dev }) => {
                require_finite("normal mean", mean)?;
                require_positive("normal stdDev", std_dev)?;
            }
            Self::Exponential(ExponentialParams { rate }) => {
                require_positive("exponential rate", rate)?;
            }
            Self::Poisson(PoissonParams { lambda }) => {
                require_positive("poisson lambda", lambda)?;
            }
            Self::Gamma(GammaParams { alpha, beta }) => {
                require_positive("gamma alpha", alpha)?;
                require_positive("gamma beta", beta)?;
            }
            Self::Binomial(BinomialParams { p, .. }) => {
                if !(0.0..=1.0).contains(&p) {
                    return Err(Error::config(format!(
                        "binomial p ({p}) must lie in [0, 1]"
                    )));
                }
            }
            Self::StudentT(StudentTParams { dof }) => {
                require_positive("student-t dof", dof)?;
            }
        }
        Ok(())
    }

    /// JSON rendering of the tagged parameters, used as a cache key.
    pub fn fingerprint(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn require_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::config(format!("{name} must be finite, got {value}")))
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(Error::config(format!("{name} must be positive, got {value}")))
    }
}

/// Last-used parameters for every family, so switching back restores them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistributionParams {
    pub uniform: UniformParams,
    pub normal: NormalParams,
    pub exponential: ExponentialParams,
    pub poisson: PoissonParams,
    pub gamma: GammaParams,
    pub binomial: BinomialParams,
    pub student_t: StudentTParams,
}

impl Default for DistributionParams {
    fn default() -> Self {
        Self {
            uniform: UniformParams {
                min: config::DEFAULT_UNIFORM_MIN,
                max: config::DEFAULT_UNIFORM_MAX,
            },
            normal: NormalParams {
                mean: config::DEFAULT_NORMAL_MEAN,
                std_dev: config::DEFAULT_NORMAL_STD_DEV,
            },
            exponential: ExponentialParams {
                rate: config::DEFAULT_EXPONENTIAL_RATE,
            },
            poisson: PoissonParams {
                lambda: config::DEFAULT_POISSON_LAMBDA,
            },
            gamma: GammaParams {
                alpha: config::DEFAULT_GAMMA_ALPHA,
                beta: config::DEFAULT_GAMMA_BETA,
            },
            binomial: BinomialParams {
                n: config::DEFAULT_BINOMIAL_N,
                p: config::DEFAULT_BINOMIAL_P,
            },
            student_t: StudentTParams {
                dof: config::DEFAULT_STUDENT_T_DOF,
            },
        }
    }
}

impl DistributionParams {
    pub fn get(&self, kind: DistributionKind) -> DistributionConfig {
        match kind {
            DistributionKind::Uniform => DistributionConfig::Uniform(self.uniform),
            DistributionKind::Normal => DistributionConfig::Normal(self.normal),
            DistributionKind::Exponential => DistributionConfig::Exponential(self.exponential),
            DistributionKind::Poisson => DistributionConfig::Poisson(self.poisson),
            DistributionKind::Gamma => DistributionConfig::Gamma(self.gamma),
            DistributionKind::Binomial => DistributionConfig::Binomial(self.binomial),
            DistributionKind::StudentT => DistributionConfig::StudentT(self.student_t),
        }
    }

    pub fn set(&mut self, dist: DistributionConfig) {
        match dist {
            DistributionConfig::Uniform(p) => self.uniform = p,
            DistributionConfig::Normal(p) => self.normal = p,
            DistributionConfig::Exponential(p) => self.exponential = p,
            DistributionConfig::Poisson(p) => self.poisson = p,
            DistributionConfig::Gamma(p) => self.gamma = p,
            DistributionConfig::Binomial(p) => self.binomial = p,
            DistributionConfig::StudentT(p) => self.student_t = p,
        }
    }
}

/// Active family, lane count and the per-family parameter table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub active: DistributionKind,
    pub num_lanes: usize,
    pub params: DistributionParams,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            active: DistributionKind::Normal,
            num_lanes: config::DEFAULT_NUM_LANES,
            params: DistributionParams::default(),
        }
    }
}

impl SimulationConfig {
    pub fn active_config(&self) -> DistributionConfig {
        self.params.get(self.active)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_lanes < config::MIN_NUM_LANES {
            return Err(Error::config(format!(
                "numLanes must be at least {}, got {}",
                config::MIN_NUM_LANES,
                self.num_lanes
            )));
        }
        self.active_config().validate()
    }

    /// Change the active family, adjusting the lane count the way the controls expect:
    /// uniform follows its bounds, centred families need an odd count.
    pub fn switch_distribution(&mut self, kind: DistributionKind) {
        self.active = kind;
        if kind == DistributionKind::Uniform {
            self.num_lanes = uniform_lane_count(self.params.uniform.min, self.params.uniform.max);
        } else if self.num_lanes % 2 == 0 {
            self.num_lanes += 1;
        }
    }

    /// Store new parameters for one family. Uniform bounds also drive the lane count
    /// while uniform is active.
    pub fn set_params(&mut self, dist: DistributionConfig) {
        self.params.set(dist);
        if let DistributionConfig::Uniform(p) = dist {
            if self.active == DistributionKind::Uniform {
                self.num_lanes = uniform_lane_count(p.min, p.max);
            }
        }
    }
}

/// Two lanes per unit of the uniform interval.
pub fn uniform_lane_count(min: f64, max: f64) -> usize {
    let lanes = ((max - min).abs() * 2.0).round();
    if lanes.is_finite() {
        (lanes as usize).clamp(config::MIN_NUM_LANES, config::MAX_NUM_LANES)
    } else {
        config::MIN_NUM_LANES
    }
}
