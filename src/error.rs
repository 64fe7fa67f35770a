use thiserror::Error;

/// Errors returned by the clustering engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Coordinate pair outside `[-90, 90] x [-180, 180]` or not finite.
    #[error("invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate {
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lon: f64,
    },

    /// Points and labels passed to the aggregator have different lengths.
    #[error("length mismatch: {points} points, {labels} labels")]
    LengthMismatch {
        /// Number of points.
        points: usize,
        /// Number of labels.
        labels: usize,
    },

    /// A clustering strategy cannot run in this build or on this input.
    #[error("strategy unavailable: {0}")]
    Unavailable(&'static str),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
