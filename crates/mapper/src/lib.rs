//! # Mapper - typed records over dBase tables
//!
//! Moves whole structured records in and out of a [`dbase::Table`]
//! without the caller touching field indices or textual encodings.
//!
//! ## Architecture
//!
//! ```text
//! caller struct (Person, Invoice, ...)
//!       |
//!       v
//! ┌───────────────────────────────────────────────┐
//! │                   MAPPER                      │
//! │                                               │
//! │ Record::bindings() → one FieldBinding per     │
//! │ member: {column name, kind, get fn, set fn}   │
//! │                                               │
//! │ write.rs → create_schema() / write() / append │
//! │ read.rs  → read() / read_into()               │
//! └───────────────────────────────────────────────┘
//!       |
//!       v
//! dbase::Table (offset math + fixed-width codec)
//! ```
//!
//! The binding table is built **once per record type** and validated when
//! the [`Mapper`] is constructed -- there is no runtime member discovery.
//! Each binding fixes the member kind through its constructor
//! ([`FieldBinding::text`], [`int`](FieldBinding::int),
//! [`float`](FieldBinding::float), [`boolean`](FieldBinding::boolean)),
//! so an unsupported member kind cannot be expressed at all. Skipping a
//! member is simply not binding it.
//!
//! ## Value rendering
//!
//! | Member kind | Column            | Stored text              |
//! |-------------|-------------------|--------------------------|
//! | text        | Character (≤254)  | verbatim                 |
//! | int         | Numeric (17, 0)   | decimal digits           |
//! | float       | Numeric (17, 8)   | fixed six decimals       |
//! | boolean     | Logical (1)       | `t` / `f`                |
//!
//! Reads parse the stored text back; a value that no longer parses (say,
//! free text in an integer column) yields [`MapError::Parse`] and leaves
//! the table untouched.
//!
//! ## Example
//!
//! ```rust
//! use dbase::Table;
//! use mapper::{FieldBinding, Mapper, Record};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: i64,
//! }
//!
//! impl Record for Person {
//!     fn bindings() -> Vec<FieldBinding<Self>> {
//!         vec![
//!             FieldBinding::sized_text("name", 40, |p| p.name.clone(), |p, v| p.name = v),
//!             FieldBinding::int("age", |p| p.age, |p, v| p.age = v),
//!         ]
//!     }
//! }
//!
//! let mapper = Mapper::<Person>::new();
//! let mut table = Table::new();
//! mapper.create_schema(&mut table).unwrap();
//!
//! let alice = Person { name: "Alice".into(), age: 30 };
//! let row = mapper.append(&mut table, &alice).unwrap();
//! assert_eq!(mapper.read(&table, row).unwrap(), alice);
//! ```

mod bind;
mod read;
mod write;

use thiserror::Error;

pub use bind::FieldBinding;
use bind::validate;
use dbase::TableError;

/// A record type with a fixed binding table mapping its members to table
/// columns.
///
/// Implementations list one [`FieldBinding`] per member that should be
/// persisted, in column order. Members without a binding are skipped.
pub trait Record: Sized {
    /// Returns the binding table for this type. Called once, when the
    /// [`Mapper`] is built.
    fn bindings() -> Vec<FieldBinding<Self>>;
}

/// Errors that can occur while mapping records to and from a table.
#[derive(Debug, Error)]
pub enum MapError {
    /// A stored value could not be parsed back into the member's kind.
    #[error("cannot parse field {field:?} as {expected}: {value:?}")]
    Parse {
        /// The binding (column) name.
        field: &'static str,
        /// The kind the member expects.
        expected: &'static str,
        /// The offending stored text.
        value: String,
    },

    /// An underlying table error (unknown column, frozen schema, ...).
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Translates between rows of a [`dbase::Table`](dbase::Table) and values
/// of one record type `R`.
///
/// The mapper owns `R`'s validated binding table; it holds no table and
/// can serve any number of them.
pub struct Mapper<R: Record> {
    bindings: Vec<FieldBinding<R>>,
}

impl<R: Record> Mapper<R> {
    /// Builds the binding table for `R` and validates it.
    ///
    /// # Panics
    ///
    /// Invalid bindings are a programming mistake, not bad data, so this
    /// panics rather than returning an error: two bindings whose names
    /// collide after normalization (uppercase, 10 bytes), or a text
    /// binding with zero length.
    #[must_use]
    pub fn new() -> Self {
        let bindings = R::bindings();
        validate(&bindings);
        Self { bindings }
    }

    /// Returns the column names in binding order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bindings.iter().map(FieldBinding::name)
    }
}

impl<R: Record> Default for Mapper<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
