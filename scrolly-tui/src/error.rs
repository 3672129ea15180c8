//! Error types for dataset derivation and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// A series that cannot be charted without producing `NaN` or `Infinity`,
/// or a comparison set whose periods do not line up.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataShapeError {
    #[error("series '{series}' is empty")]
    Empty { series: String },

    #[error("series '{series}' has a zero baseline at period {period}")]
    ZeroBaseline { series: String, period: String },

    #[error("series '{series}' has a non-finite value at period {period}")]
    NonFinite { series: String, period: String },

    #[error("series '{series}' has {values} values for {periods} periods")]
    LengthMismatch {
        series: String,
        periods: usize,
        values: usize,
    },

    #[error("series '{series}' is misaligned at index {index}: expected period {expected}, found {found}")]
    MisalignedPeriods {
        series: String,
        index: usize,
        expected: String,
        found: String,
    },

    #[error("period '{period}' of series '{series}' is not numeric")]
    NonNumericPeriod { series: String, period: String },

    #[error("comparison set has no series")]
    NoSeries,
}

/// Failures while loading the TOML configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

pub type DataResult<T> = std::result::Result<T, DataShapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_series() {
        let err = DataShapeError::ZeroBaseline {
            series: "edu".to_string(),
            period: "2012".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "series 'edu' has a zero baseline at period 2012"
        );

        let err = DataShapeError::MisalignedPeriods {
            series: "biz".to_string(),
            index: 3,
            expected: "2015".to_string(),
            found: "2016".to_string(),
        };
        assert!(err.to_string().contains("expected period 2015"));
    }

    #[test]
    fn test_invalid_config_message() {
        let err = ConfigError::Invalid {
            key: "viewport.threshold",
            reason: "must be between 0 and 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid config value for viewport.threshold: must be between 0 and 1"
        );
    }
}
