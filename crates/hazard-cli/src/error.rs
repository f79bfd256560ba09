//! CLI error types.

use hazard_core::CoreError;
use hazard_curves::CurveError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for a calibration.
    #[error("Invalid calibration file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration is well-formed but unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Date or tenor error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Curve construction or calibration error.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// The calibrated curve does not reprice every quote.
    #[error("Repricing failed for {failed} of {total} quotes")]
    RepricingFailed {
        /// Failed quotes.
        failed: usize,
        /// All quotes.
        total: usize,
    },
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
