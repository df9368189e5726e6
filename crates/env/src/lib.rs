//! Environment variable overrides for configuration structures.
//!
//! Configuration structs describe their fields through the [`Fields`] trait;
//! [`apply_env`] walks that description, derives one environment variable
//! name per field, and overwrites any field whose variable is present in the
//! supplied lookup.

mod apply;
mod error;
mod fields;

pub use apply::{apply_env, process_env_getter};
pub use error::EnvError;
pub use fields::{Field, FieldKind, Fields, OptionalFields};
