//! Error type for environment overrides.

use thiserror::Error;

/// Errors produced while applying environment variable overrides.
///
/// Every variant names the offending variable and carries the value text
/// that failed to convert.
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("{var}: invalid boolean value {value:?}")]
    ParseBool { var: String, value: String },

    #[error("{var}: invalid float value {value:?}: {source}")]
    ParseFloat {
        var: String,
        value: String,
        source: std::num::ParseFloatError,
    },
}
