//! # dbase - dBase III PLUS table engine
//!
//! An in-memory reader/writer for the dBase III PLUS tabular file format:
//! fixed-width columnar records preceded by a schema header, the whole
//! table held as a single byte buffer.
//!
//! ## File layout
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │ HEADER (32 bytes)                                             │
//! │                                                               │
//! │ signature (u8 = 0x03) | yy mm dd (3 x u8)                     │
//! │ record_count (u32 LE) | header_size (u16 LE)                  │
//! │ record_length (u16 LE) | reserved (20 bytes)                  │
//! ├───────────────────────────────────────────────────────────────┤
//! │ FIELD DESCRIPTORS (32 bytes each)                             │
//! │                                                               │
//! │ name (10, NUL-padded) | NUL | type (C/N/L/D)                  │
//! │ reserved (4) | length (u8) | precision (u8) | reserved (14)   │
//! │                                                               │
//! │ ... one per column ...                                        │
//! ├───────────────────────────────────────────────────────────────┤
//! │ HEADER TERMINATOR (1 byte, 0x0D)                              │
//! ├───────────────────────────────────────────────────────────────┤
//! │ RECORDS (record_length bytes each)                            │
//! │                                                               │
//! │ marker (0x20 active / 0x2A deleted) | field values,           │
//! │ fixed-width encoded in schema order                           │
//! │                                                               │
//! │ ... record_count slots ...                                    │
//! ├───────────────────────────────────────────────────────────────┤
//! │ EOF MARKER (1 byte, 0x1A -- persisted image only)             │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! All integers are little-endian. Deleted rows keep their slot; only the
//! marker byte flips, and the slot index goes on a free-list for reuse by
//! [`Table::insert_record`].
//!
//! ## Module Responsibilities
//!
//! | Module        | Purpose                                              |
//! |---------------|------------------------------------------------------|
//! | [`lib.rs`]    | `Table` struct, constructor, accessors, `Debug`      |
//! | [`format`]    | layout constants, header/descriptor byte helpers     |
//! | [`schema`]    | `Field`, the schema store, typed add-field helpers   |
//! | [`record`]    | row append/insert/delete, offset math, value get/set |
//! | [`persist`]   | `from_bytes`/`to_bytes`, atomic file load/save       |
//! | [`iter`]      | deletion-skipping traversal (`Rows`, `RowCursor`)    |
//! | [`error`]     | the `TableError` taxonomy                            |
//!
//! ## Schema freeze
//!
//! The field list is append-only while the table is empty and becomes
//! immutable the moment any field value is written (or the table is loaded
//! from an image). After that, [`Table::add_field`] fails with
//! [`TableError::SchemaFrozen`].
//!
//! ## Concurrency
//!
//! Single-threaded by design: one `Table` owns one buffer, nothing is
//! shared, and persistence is an explicit whole-buffer snapshot. Callers
//! needing concurrent access must serialize externally.

mod error;
mod format;
mod iter;
mod persist;
mod record;
mod schema;

use chrono::Datelike;

pub use codec::FieldType;
pub use error::TableError;
pub use format::{ACTIVE_MARKER, DELETED_MARKER, EOF_MARKER, HEADER_TERMINATOR, SIGNATURE};
pub use iter::{RowCursor, RowView, Rows};
pub use schema::{normalize_name, Field};

use schema::Schema;

/// An in-memory dBase III PLUS table: schema, rows, and the full binary
/// image, kept consistent on every mutation.
///
/// # Lifecycle
///
/// A `Table` is created empty ([`Table::new`]) or reconstructed from a
/// byte image ([`Table::from_bytes`] / [`Table::load`]). Persistence is an
/// explicit snapshot ([`Table::to_bytes`] / [`Table::save`]); dropping the
/// value discards it.
///
/// # Invariants
///
/// - `record_length == 1 + Σ field.length` (the leading byte is the
///   deletion marker)
/// - `header_size == 32 * (1 + fields.len()) + 1` once a field exists
/// - `buf.len() == header_size + record_count * record_length`
pub struct Table {
    /// The complete file image, minus the trailing EOF marker.
    buf: Vec<u8>,
    schema: Schema,
    /// Stack of deleted row indices available for reuse, most recent last.
    free: Vec<usize>,
    signature: u8,
    last_update: (u8, u8, u8),
    record_count: u32,
    header_size: u16,
    record_length: u16,
}

impl Table {
    /// Creates an empty table with no fields and no records, stamped with
    /// the current date.
    #[must_use]
    pub fn new() -> Self {
        let now = chrono::Local::now();
        let last_update = (
            (now.year() % 100) as u8,
            now.month() as u8,
            now.day() as u8,
        );

        let mut buf = vec![0u8; format::HEADER_BYTES];
        buf[0] = format::SIGNATURE;
        buf[1] = last_update.0;
        buf[2] = last_update.1;
        buf[3] = last_update.2;
        buf[format::LANGUAGE_DRIVER_OFFSET] = format::LANGUAGE_DRIVER_UTF8;
        format::write_header_size(&mut buf, format::HEADER_BYTES as u16);

        Self {
            buf,
            schema: Schema::default(),
            free: Vec::new(),
            signature: format::SIGNATURE,
            last_update,
            record_count: 0,
            header_size: format::HEADER_BYTES as u16,
            record_length: 0,
        }
    }

    /// Returns the number of record slots, including deleted ones.
    #[must_use]
    pub fn num_records(&self) -> usize {
        self.record_count as usize
    }

    /// Returns the file signature byte (`0x03` for a plain table).
    #[must_use]
    pub fn signature(&self) -> u8 {
        self.signature
    }

    /// Returns the last-update date as `(yy, mm, dd)`.
    #[must_use]
    pub fn last_update(&self) -> (u8, u8, u8) {
        self.last_update
    }

    /// Returns the total header length in bytes, descriptor array and
    /// terminator included.
    #[must_use]
    pub fn header_size(&self) -> usize {
        self.header_size as usize
    }

    /// Returns the fixed byte length of one record, deletion marker
    /// included. Zero until the first field is added.
    #[must_use]
    pub fn record_length(&self) -> usize {
        self.record_length as usize
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("fields", &self.schema.len())
            .field("records", &self.record_count)
            .field("deleted", &self.free.len())
            .field("header_size", &self.header_size)
            .field("record_length", &self.record_length)
            .field("frozen", &self.schema.is_frozen())
            .finish()
    }
}

#[cfg(test)]
mod tests;
