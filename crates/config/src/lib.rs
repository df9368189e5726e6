//! Layered configuration loading for YAML documents.
//!
//! A caller-allocated configuration struct (implementing [`Fields`]) is
//! filled in place: base document first, then override documents in the
//! order supplied, then environment variables. Later layers only touch the
//! fields their source actually specifies.

pub mod filter;
mod loader;

pub use loader::{ConfigError, EnvGetter, Loader, PatchBytes, load_config_file};
pub use strata_env::{
    EnvError, Field, FieldKind, Fields, OptionalFields, apply_env, process_env_getter,
};
