//! The field-binding table: one entry per persisted member of a record
//! type, carrying the column name, the member kind, and the two plain
//! function pointers that project the member in and out of the record.
//!
//! Bindings are constructed through the typed helpers below, which is
//! what pins each member to exactly one column type -- there is no "any"
//! binding, so an unsupported member kind has no way into the table.

use std::collections::HashMap;

/// Default width of a text column when the binding does not give one.
const DEFAULT_TEXT_LENGTH: u8 = 50;

/// How one member of `R` is read and written.
pub(crate) enum Access<R> {
    Text {
        length: u8,
        get: fn(&R) -> String,
        set: fn(&mut R, String),
    },
    Int {
        get: fn(&R) -> i64,
        set: fn(&mut R, i64),
    },
    Float {
        get: fn(&R) -> f64,
        set: fn(&mut R, f64),
    },
    Bool {
        get: fn(&R) -> bool,
        set: fn(&mut R, bool),
    },
}

/// Binds one member of a record type `R` to one table column.
///
/// The column name is matched case-insensitively against the schema (the
/// table uppercases and truncates names to 10 bytes).
pub struct FieldBinding<R> {
    pub(crate) name: &'static str,
    pub(crate) access: Access<R>,
}

impl<R> FieldBinding<R> {
    /// Binds a `String` member to a Character column of the default
    /// width (50 bytes).
    pub fn text(name: &'static str, get: fn(&R) -> String, set: fn(&mut R, String)) -> Self {
        Self::sized_text(name, DEFAULT_TEXT_LENGTH, get, set)
    }

    /// Binds a `String` member to a Character column of an explicit
    /// width (dBase caps text columns at 254 bytes).
    pub fn sized_text(
        name: &'static str,
        length: u8,
        get: fn(&R) -> String,
        set: fn(&mut R, String),
    ) -> Self {
        Self {
            name,
            access: Access::Text { length, get, set },
        }
    }

    /// Binds an `i64` member to a Numeric column (17 wide, no decimals).
    pub fn int(name: &'static str, get: fn(&R) -> i64, set: fn(&mut R, i64)) -> Self {
        Self {
            name,
            access: Access::Int { get, set },
        }
    }

    /// Binds an `f64` member to a Numeric column (17 wide, 8 decimals);
    /// values are stored with fixed six decimals.
    pub fn float(name: &'static str, get: fn(&R) -> f64, set: fn(&mut R, f64)) -> Self {
        Self {
            name,
            access: Access::Float { get, set },
        }
    }

    /// Binds a `bool` member to a Logical column (`t`/`f` on disk).
    pub fn boolean(name: &'static str, get: fn(&R) -> bool, set: fn(&mut R, bool)) -> Self {
        Self {
            name,
            access: Access::Bool { get, set },
        }
    }

    /// Returns the bound column name as declared (before the table's
    /// normalization).
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Checks a binding table for configuration mistakes.
///
/// # Panics
///
/// Panics on a zero-width text binding or on two bindings whose names
/// collide once normalized the way the schema store normalizes them.
pub(crate) fn validate<R>(bindings: &[FieldBinding<R>]) {
    let mut seen: HashMap<String, &'static str> = HashMap::new();
    for binding in bindings {
        if let Access::Text { length, .. } = binding.access {
            assert!(
                length > 0,
                "mapper: text binding {:?} has zero length",
                binding.name
            );
        }
        let normalized = dbase::normalize_name(binding.name);
        if let Some(previous) = seen.insert(normalized, binding.name) {
            panic!(
                "mapper: bindings {previous:?} and {:?} collide after name normalization",
                binding.name
            );
        }
    }
}
