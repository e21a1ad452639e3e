//! Distribution-to-lane engine behind the Galton lanes visualizer.
//!
//! An [`Engine`] draws values from one of seven families, drops each value into one of
//! N lanes, and answers the chart queries (range, closed-form stats, density curve,
//! per-lane weights, empirical histogram) from a cache that is cleared whenever the
//! configuration changes.

pub mod cache;
pub mod config;
pub mod density;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod histogram;
pub mod lanes;
pub mod range;
pub mod refresh;
pub mod sampling;
pub mod stats;

pub use density::CurvePoint;
pub use distribution::{DistributionConfig, DistributionKind, SimulationConfig};
pub use engine::{Engine, LaneBar, LaneSample};
pub use error::{Error, Result};
pub use histogram::{AccumulatorState, HistogramBin};
pub use range::Range;
pub use refresh::RefreshLimiter;
pub use stats::Stats;
