//! Loader builder and the layered load pipeline.
//!
//! Responsibilities:
//! - Collect load options (override layers, env settings, key validation,
//!   byte patch hook) through a builder.
//! - Run the pipeline: base document, file overrides, byte overrides,
//!   environment overrides.
//!
//! Does NOT handle:
//! - The merge itself (see decode.rs) or env name derivation (strata-env).
//!
//! Invariants:
//! - Defaults: env override enabled, key validation enabled, empty prefix,
//!   process environment getter.
//! - A failing layer surfaces immediately; earlier layers stay applied.

use std::fs;
use std::path::{Path, PathBuf};

use strata_env::{Fields, apply_env, process_env_getter};

use super::decode::{DecodeOptions, decode_into};
use super::error::ConfigError;

/// Environment lookup used by the env override stage.
pub type EnvGetter = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Byte transform run on every document immediately before parsing.
pub type PatchBytes = Box<dyn Fn(Vec<u8>) -> Vec<u8> + Send + Sync>;

/// Builder for a layered configuration load.
///
/// A `Loader` decodes a base YAML document into a caller-supplied struct,
/// merges override documents on top of it in the order they were added, and
/// finally applies environment variable overrides unless disabled. The
/// target is mutated in place by every stage; a failing stage leaves the
/// mutations of earlier stages behind.
pub struct Loader {
    env_override: bool,
    env_prefix: String,
    env_getter: Option<EnvGetter>,
    override_files: Vec<PathBuf>,
    override_bytes: Vec<Vec<u8>>,
    validate_keys: bool,
    patch_bytes: Option<PatchBytes>,
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("env_override", &self.env_override)
            .field("env_prefix", &self.env_prefix)
            .field("env_getter", &self.env_getter.as_ref().map(|_| "<fn>"))
            .field("override_files", &self.override_files)
            .field("override_bytes", &self.override_bytes)
            .field("validate_keys", &self.validate_keys)
            .field("patch_bytes", &self.patch_bytes.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    pub fn new() -> Self {
        Self {
            env_override: true,
            env_prefix: String::new(),
            env_getter: None,
            override_files: Vec::new(),
            override_bytes: Vec::new(),
            validate_keys: true,
            patch_bytes: None,
        }
    }

    /// Skip the environment override stage entirely.
    pub fn disable_env_override(mut self) -> Self {
        self.env_override = false;
        self
    }

    /// Set the leading segment of derived environment variable names.
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Replace the process-environment lookup.
    pub fn env_getter(
        mut self,
        getter: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.env_getter = Some(Box::new(getter));
        self
    }

    /// Append a file-backed override layer. Empty paths are ignored.
    pub fn override_file(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if !path.as_os_str().is_empty() {
            self.override_files.push(path);
        }
        self
    }

    /// Append a byte-blob override layer.
    pub fn override_bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.override_bytes.push(bytes.into());
        self
    }

    /// Toggle strict unknown-key validation for every layer.
    pub fn validate_keys(mut self, validate: bool) -> Self {
        self.validate_keys = validate;
        self
    }

    /// Install a byte transform run on every document before parsing.
    ///
    /// The transform must be deterministic for the same input bytes; it is
    /// invoked once per document per load call.
    pub fn patch_bytes(
        mut self,
        patch: impl Fn(Vec<u8>) -> Vec<u8> + Send + Sync + 'static,
    ) -> Self {
        self.patch_bytes = Some(Box::new(patch));
        self
    }

    /// Load environment variables from a `.env` file in the current
    /// directory, if one exists, so the default getter can see them.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    ///
    /// Error values never include raw `.env` line contents.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, index)) => {
                Err(ConfigError::DotenvParse { error_index: index })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Load the base document from `path` into `target` and run the
    /// override and environment stages.
    pub fn load_file(
        &self,
        path: impl AsRef<Path>,
        target: &mut dyn Fields,
    ) -> Result<(), ConfigError> {
        self.load_file_inner(path.as_ref(), target)
            .map_err(|e| ConfigError::LoadConfig(Box::new(e)))
    }

    /// Load the base document from `bytes` into `target` and run the
    /// override and environment stages.
    pub fn load_bytes(&self, bytes: &[u8], target: &mut dyn Fields) -> Result<(), ConfigError> {
        self.load_bytes_inner(bytes, target)
            .map_err(|e| ConfigError::LoadConfigBytes(Box::new(e)))
    }

    fn load_file_inner(&self, path: &Path, target: &mut dyn Fields) -> Result<(), ConfigError> {
        tracing::debug!(path = %path.display(), "loading base config");
        decode_file(path, target, &self.decode_options())?;
        self.apply_layers(target)
    }

    fn load_bytes_inner(&self, bytes: &[u8], target: &mut dyn Fields) -> Result<(), ConfigError> {
        tracing::debug!(len = bytes.len(), "loading base config from bytes");
        decode_into(bytes, target, &self.decode_options())?;
        self.apply_layers(target)
    }

    fn decode_options(&self) -> DecodeOptions<'_> {
        DecodeOptions {
            validate_keys: self.validate_keys,
            patch: self.patch_bytes.as_ref(),
        }
    }

    /// Apply override layers in supplied order, then environment overrides.
    fn apply_layers(&self, target: &mut dyn Fields) -> Result<(), ConfigError> {
        let opts = self.decode_options();

        for path in &self.override_files {
            tracing::debug!(path = %path.display(), "applying override file");
            decode_file(path, target, &opts).map_err(|e| ConfigError::Override(Box::new(e)))?;
        }

        for bytes in &self.override_bytes {
            tracing::debug!(len = bytes.len(), "applying override bytes");
            decode_into(bytes, target, &opts).map_err(|e| ConfigError::Override(Box::new(e)))?;
        }

        if self.env_override {
            tracing::debug!(prefix = %self.env_prefix, "applying environment overrides");
            match &self.env_getter {
                Some(getter) => apply_env(target, &self.env_prefix, &**getter)?,
                None => apply_env(target, &self.env_prefix, &process_env_getter)?,
            }
        }

        Ok(())
    }
}

/// Read a single YAML file into `target` without override layers or
/// environment values. Unknown keys are ignored.
pub fn load_config_file(
    path: impl AsRef<Path>,
    target: &mut dyn Fields,
) -> Result<(), ConfigError> {
    decode_file(
        path.as_ref(),
        target,
        &DecodeOptions {
            validate_keys: false,
            patch: None,
        },
    )
}

fn decode_file(
    path: &Path,
    target: &mut dyn Fields,
    opts: &DecodeOptions<'_>,
) -> Result<(), ConfigError> {
    let bytes = fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_into(&bytes, target, opts)
}
