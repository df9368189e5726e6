//! Environment override engine.
//!
//! Responsibilities:
//! - Derive one environment variable name per reachable field (upper-cased
//!   segments joined with `_`, optional prefix first).
//! - Query a lookup function and coerce present values onto the fields.
//!
//! Does NOT handle:
//! - Document decoding or layer ordering (the loader crate owns those).
//!
//! Invariants:
//! - Name derivation is pure and depends only on the field layout.
//! - Fields whose variable is absent are left untouched.
//! - An absent optional section stays absent unless one of its variables
//!   is present in the lookup.

use crate::error::EnvError;
use crate::fields::{FieldKind, Fields};

/// Lookup for the current process environment. Values are returned verbatim.
pub fn process_env_getter(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Overwrite every field of `target` whose derived environment variable is
/// present in `getter`.
///
/// `prefix` (if non-empty) becomes the leading name segment: with prefix
/// `MYAPP`, the field `pi` is looked up as `MYAPP_PI` and the nested field
/// `section.sectionkey` as `MYAPP_SECTION_SECTIONKEY`.
pub fn apply_env(
    target: &mut dyn Fields,
    prefix: &str,
    getter: &dyn Fn(&str) -> Option<String>,
) -> Result<(), EnvError> {
    walk(target, prefix, getter).map(|_| ())
}

/// Walk `target` depth-first, returning whether any field was overwritten.
fn walk(
    target: &mut dyn Fields,
    prefix: &str,
    getter: &dyn Fn(&str) -> Option<String>,
) -> Result<bool, EnvError> {
    let mut applied = false;

    for field in target.fields() {
        let var = var_name(prefix, field.name);

        match field.kind {
            FieldKind::Str(slot) => {
                if let Some(value) = getter(&var) {
                    *slot = value;
                    applied = true;
                    tracing::trace!(var = %var, "environment override applied");
                }
            }
            FieldKind::Bool(slot) => {
                if let Some(value) = getter(&var) {
                    *slot = parse_bool(&var, &value)?;
                    applied = true;
                    tracing::trace!(var = %var, "environment override applied");
                }
            }
            FieldKind::Float(slot) => {
                if let Some(value) = getter(&var) {
                    *slot = value.parse().map_err(|source| EnvError::ParseFloat {
                        var: var.clone(),
                        value: value.clone(),
                        source,
                    })?;
                    applied = true;
                    tracing::trace!(var = %var, "environment override applied");
                }
            }
            FieldKind::Nested(section) => {
                applied |= walk(section, &var, getter)?;
            }
            FieldKind::Optional(section) => {
                let was_absent = !section.is_some();
                let hit = walk(section.materialize(), &var, getter)?;
                if was_absent && !hit {
                    section.clear();
                }
                applied |= hit;
            }
        }
    }

    Ok(applied)
}

fn var_name(prefix: &str, field: &str) -> String {
    let segment = field.to_uppercase();
    if prefix.is_empty() {
        segment
    } else {
        format!("{prefix}_{segment}")
    }
}

fn parse_bool(var: &str, value: &str) -> Result<bool, EnvError> {
    if value.eq_ignore_ascii_case("true") || value == "1" {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") || value == "0" {
        Ok(false)
    } else {
        Err(EnvError::ParseBool {
            var: var.to_string(),
            value: value.to_string(),
        })
    }
}
