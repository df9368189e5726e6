//! Configuration loader for YAML files, override layers, and environment
//! variables.
//!
//! Responsibilities:
//! - Decode a base document into a caller-supplied target struct.
//! - Merge override documents (files or byte blobs) on top, in order.
//! - Apply environment variable overrides last, unless disabled.
//!
//! Does NOT handle:
//! - Root-key filtering of raw documents (see filter.rs).
//! - Field traversal and env name derivation (see the strata-env crate).
//!
//! Invariants:
//! - Layers are applied strictly in order: base, file overrides, byte
//!   overrides, environment. A failing layer stops the pipeline; earlier
//!   layers are not rolled back.
//! - Decode options (key validation, byte patch hook) apply to the base
//!   document and to every override document alike.

mod builder;
mod decode;
mod error;

#[cfg(test)]
mod tests;

pub use builder::{EnvGetter, Loader, PatchBytes, load_config_file};
pub use error::ConfigError;
