//! Field descriptions for configuration structures.
//!
//! Responsibilities:
//! - Define the `Fields` trait configuration structs implement to expose
//!   their fields for traversal (document name plus a typed mutable slot).
//! - Define `OptionalFields` so optional nested sections can be created on
//!   demand and dropped again when nothing was written into them.
//!
//! Does NOT handle:
//! - Environment variable name derivation or value parsing (see apply.rs).
//!
//! Invariants:
//! - Field names are the identifiers as they appear in config documents;
//!   traversal order is declaration order.

/// One field of a configuration struct: its document name and a mutable
/// slot of the field's semantic type.
pub struct Field<'a> {
    pub name: &'static str,
    pub kind: FieldKind<'a>,
}

/// The semantic type of a configuration field.
pub enum FieldKind<'a> {
    Str(&'a mut String),
    Bool(&'a mut bool),
    Float(&'a mut f64),
    /// A nested section that is always present.
    Nested(&'a mut dyn Fields),
    /// An optional nested section (`Option<T>`).
    Optional(&'a mut dyn OptionalFields),
}

/// Contract a configuration struct implements so callers can traverse it
/// without reflection.
pub trait Fields {
    /// List the struct's fields in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// An optional nested section that can be materialized on first write.
pub trait OptionalFields {
    fn is_some(&self) -> bool;

    /// Return the inner section, creating it from `Default` if absent.
    fn materialize(&mut self) -> &mut dyn Fields;

    /// Reset the section to absent.
    fn clear(&mut self);
}

impl<T: Fields + Default> OptionalFields for Option<T> {
    fn is_some(&self) -> bool {
        Option::is_some(self)
    }

    fn materialize(&mut self) -> &mut dyn Fields {
        self.get_or_insert_with(T::default)
    }

    fn clear(&mut self) {
        *self = None;
    }
}
