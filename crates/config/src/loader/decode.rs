//! Document decoding: YAML bytes merged into an existing target struct.
//!
//! Responsibilities:
//! - Apply the byte patch hook, parse the buffer, and merge the resulting
//!   mapping into the target field by field.
//!
//! Invariants:
//! - Merge-by-presence: only keys present in the document are written;
//!   null values are no-ops, so a layer can never reset a field.
//! - Strict mode fails on the first key that does not name a field,
//!   reporting its dotted path.
//! - The patch hook runs exactly once per document.

use serde_yaml::{Mapping, Value};
use strata_env::{Field, FieldKind, Fields};

use super::builder::PatchBytes;
use super::error::ConfigError;

/// Per-load decode settings, resolved once and applied to every layer.
pub(crate) struct DecodeOptions<'a> {
    pub(crate) validate_keys: bool,
    pub(crate) patch: Option<&'a PatchBytes>,
}

/// Decode `bytes` into `target`, honoring the patch hook and key validation.
pub(crate) fn decode_into(
    bytes: &[u8],
    target: &mut dyn Fields,
    opts: &DecodeOptions<'_>,
) -> Result<(), ConfigError> {
    let patched;
    let bytes = match opts.patch {
        Some(patch) => {
            patched = patch(bytes.to_vec());
            patched.as_slice()
        }
        None => bytes,
    };

    match serde_yaml::from_slice(bytes)? {
        Value::Null => Ok(()),
        Value::Mapping(mapping) => merge_mapping(target, &mapping, "", opts.validate_keys),
        other => Err(ConfigError::TypeMismatch {
            path: "root".to_string(),
            expected: "mapping",
            found: kind_of(&other),
        }),
    }
}

fn merge_mapping(
    target: &mut dyn Fields,
    doc: &Mapping,
    parent: &str,
    validate_keys: bool,
) -> Result<(), ConfigError> {
    for (key, value) in doc {
        let Some(name) = key.as_str() else {
            if validate_keys {
                return Err(ConfigError::UnknownKey {
                    path: join_path(parent, &format!("{key:?}")),
                });
            }
            continue;
        };

        let path = join_path(parent, name);
        let mut fields = target.fields();
        match fields.iter_mut().find(|field| field.name == name) {
            Some(field) => apply_value(field, value, &path, validate_keys)?,
            None if validate_keys => return Err(ConfigError::UnknownKey { path }),
            None => {}
        }
    }

    Ok(())
}

fn apply_value(
    field: &mut Field<'_>,
    value: &Value,
    path: &str,
    validate_keys: bool,
) -> Result<(), ConfigError> {
    if value.is_null() {
        return Ok(());
    }

    match &mut field.kind {
        FieldKind::Str(slot) => match value {
            Value::String(text) => {
                **slot = text.clone();
                Ok(())
            }
            other => Err(mismatch(path, "string", other)),
        },
        FieldKind::Bool(slot) => match value {
            Value::Bool(flag) => {
                **slot = *flag;
                Ok(())
            }
            other => Err(mismatch(path, "boolean", other)),
        },
        FieldKind::Float(slot) => match value.as_f64() {
            Some(number) => {
                **slot = number;
                Ok(())
            }
            None => Err(mismatch(path, "number", value)),
        },
        FieldKind::Nested(section) => match value {
            Value::Mapping(mapping) => merge_mapping(&mut **section, mapping, path, validate_keys),
            other => Err(mismatch(path, "mapping", other)),
        },
        FieldKind::Optional(section) => match value {
            Value::Mapping(mapping) => {
                merge_mapping(section.materialize(), mapping, path, validate_keys)
            }
            other => Err(mismatch(path, "mapping", other)),
        },
    }
}

fn mismatch(path: &str, expected: &'static str, found: &Value) -> ConfigError {
    ConfigError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: kind_of(found),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}
