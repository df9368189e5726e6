//! Tests for the layered configuration loader.
//!
//! Responsibilities:
//! - Test base loading, override layering, env overrides, key validation,
//!   the byte patch hook, and dotenv loading against a shared fixture.
//!
//! Invariants:
//! - Tests that touch the process environment use `env_lock()` plus
//!   `serial_test`/`temp-env`; everything else injects a getter.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use strata_env::{Field, FieldKind, Fields};

pub mod validation_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

#[derive(Debug, Default, PartialEq)]
pub struct Section {
    pub sectionkey: String,
}

impl Fields for Section {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![Field {
            name: "sectionkey",
            kind: FieldKind::Str(&mut self.sectionkey),
        }]
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct TestConfig {
    pub key: String,
    pub r#do: bool,
    pub pi: f64,
    pub section: Option<Section>,
}

impl Fields for TestConfig {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field {
                name: "key",
                kind: FieldKind::Str(&mut self.key),
            },
            Field {
                name: "do",
                kind: FieldKind::Bool(&mut self.r#do),
            },
            Field {
                name: "pi",
                kind: FieldKind::Float(&mut self.pi),
            },
            Field {
                name: "section",
                kind: FieldKind::Optional(&mut self.section),
            },
        ]
    }
}

pub const TEST_CONFIG: &str = r#"
key: "value"
do: true
pi: 3.14
section:
  sectionkey: "sectionvalue"
"#;

pub const TEST_CONFIG_UNKNOWN_KEY: &str = r#"
key: "value"
do: true
pi: 3.14
section:
  sectionkey: "sectionvalue"
unknown: "value"
"#;

pub const OVERRIDE_CONFIG_1: &str = "\ndo: false\n";

pub const OVERRIDE_CONFIG_2: &str = "\nsection:\n  sectionkey: sectionvalueoverride\n";

pub const INVALID_CONFIG: &str = "\nkey: [unclosed\n";

/// Write `content` to `name` under `dir` and return the path.
pub fn write_config(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("failed to write config fixture");
    path
}

/// The fully loaded base fixture.
pub fn base_config() -> TestConfig {
    TestConfig {
        key: "value".to_string(),
        r#do: true,
        pi: 3.14,
        section: Some(Section {
            sectionkey: "sectionvalue".to_string(),
        }),
    }
}

/// An env getter that never matches, for tests that only exercise documents.
pub fn no_env(_name: &str) -> Option<String> {
    None
}
