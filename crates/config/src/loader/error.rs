//! Error types for configuration loading.
//!
//! Invariants:
//! - Every stage wraps its failure with a stage-identifying variant; the
//!   rendered prefixes (`load config error`, `load config bytes error`,
//!   `override error`, `env override error`) are stable and callers may
//!   match on them.
//! - Dotenv errors never include raw `.env` line contents.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use strata_env::EnvError;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A base or override source could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document is not syntactically valid YAML.
    #[error("invalid config document: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Strict key validation found a document key with no matching field.
    #[error("unknown key {path}")]
    UnknownKey { path: String },

    /// A document value cannot be converted to the field's type.
    #[error("expected {expected} at {path}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// An override layer failed.
    #[error("override error: {0}")]
    Override(#[source] Box<ConfigError>),

    /// The environment override stage failed.
    #[error("env override error: {0}")]
    Env(#[from] EnvError),

    /// Failure surfaced by [`Loader::load_file`](super::Loader::load_file).
    #[error("load config error: {0}")]
    LoadConfig(#[source] Box<ConfigError>),

    /// Failure surfaced by [`Loader::load_bytes`](super::Loader::load_bytes).
    #[error("load config bytes error: {0}")]
    LoadConfigBytes(#[source] Box<ConfigError>),

    /// Failed to parse the `.env` file. Carries only the byte index of the
    /// failure, never the offending line.
    #[error("failed to parse .env file at position {error_index}")]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file.
    #[error("failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from the dotenvy crate).
    #[error("failed to load .env file")]
    DotenvUnknown,
}
