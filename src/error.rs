/// Errors raised by the distribution engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned by `configure` when parameters or the lane count are invalid.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Returned when rejection sampling keeps drawing values outside the lanes.
    #[error("sampling gave up after {attempts} rejected draws")]
    Sampling {
        /// Number of draws attempted before giving up.
        attempts: usize,
    },

    /// Returned when the display window cannot be partitioned.
    #[error("degenerate display range [{display_min}, {display_max}]")]
    Range {
        /// Lower display bound.
        display_min: f64,
        /// Upper display bound.
        display_max: f64,
    },

    /// Returned when a density could not be constructed.
    #[error("density evaluation failed: {0}")]
    Statistics(#[from] statrs::StatsError),

    /// Returned when a parameter fingerprint cannot be serialized.
    #[error("fingerprint serialization failed: {0}")]
    Fingerprint(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }
}
