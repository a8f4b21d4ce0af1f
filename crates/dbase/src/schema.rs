//! The schema store: ordered field definitions, the name lookup map, and
//! the freeze rule, plus the typed `add_*_field` helpers on [`Table`].
//!
//! Field names are normalized on entry -- uppercased and truncated to the
//! 10 bytes a descriptor can hold -- so lookups are case-insensitive and
//! every name fits its slot on disk.

use std::collections::HashMap;

use codec::FieldType;

use crate::error::TableError;
use crate::format;
use crate::Table;

/// Numeric columns created through the typed helpers are 17 bytes wide,
/// matching the historic dBase writers this format round-trips with.
const NUMBER_LENGTH: u8 = 17;
/// Decimal places of a float column created through [`Table::add_float_field`].
const FLOAT_PRECISION: u8 = 8;

/// One column definition: name, type, byte width, and numeric precision.
///
/// Fields are immutable once created; the schema store is the only place
/// that constructs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    kind: FieldType,
    length: u8,
    precision: u8,
}

impl Field {
    pub(crate) fn new(name: String, kind: FieldType, length: u8, precision: u8) -> Self {
        Self {
            name,
            kind,
            length,
            precision,
        }
    }

    /// Returns the normalized (uppercase, ≤10 byte) field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the column type.
    #[must_use]
    pub fn kind(&self) -> FieldType {
        self.kind
    }

    /// Returns the fixed byte width of this column's value span.
    #[must_use]
    pub fn length(&self) -> u8 {
        self.length
    }

    /// Returns the number of decimal places (Numeric columns only).
    #[must_use]
    pub fn precision(&self) -> u8 {
        self.precision
    }
}

/// Ordered field list plus the name → index map and the frozen flag.
#[derive(Debug, Default)]
pub(crate) struct Schema {
    fields: Vec<Field>,
    by_name: HashMap<String, usize>,
    frozen: bool,
}

impl Schema {
    /// Appends a field after normalizing its name.
    ///
    /// Fails with [`TableError::SchemaFrozen`] once the schema is frozen
    /// and with [`TableError::DuplicateField`] when the normalized name is
    /// already taken.
    pub fn add(
        &mut self,
        name: &str,
        kind: FieldType,
        length: u8,
        precision: u8,
    ) -> Result<(), TableError> {
        if self.frozen {
            return Err(TableError::SchemaFrozen);
        }
        let name = normalize_name(name);
        if self.by_name.contains_key(&name) {
            return Err(TableError::DuplicateField(name));
        }
        self.by_name.insert(name.clone(), self.fields.len());
        self.fields.push(Field::new(name, kind, length, precision));
        Ok(())
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Case-insensitive name lookup.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(&normalize_name(name)).copied()
    }

    /// Permanently forbids structural changes.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}

/// Uppercases `name` and truncates it to the 10 bytes a descriptor slot
/// stores, respecting char boundaries.
///
/// This is the normalization every name passes through on its way into
/// the schema; callers matching columns by name (the mapper, for one)
/// can use it to predict collisions up front.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let mut s = name.to_ascii_uppercase();
    if s.len() > format::NAME_BYTES {
        let mut cut = format::NAME_BYTES;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
    }
    s
}

impl Table {
    /// Adds a field with an explicit type, length, and precision.
    ///
    /// Fails with [`TableError::SchemaFrozen`] if any record exists or a
    /// field value was ever written, and with
    /// [`TableError::DuplicateField`] if the normalized name is taken.
    /// On success the header and descriptor array are rebuilt in place.
    pub fn add_field(
        &mut self,
        name: &str,
        kind: FieldType,
        length: u8,
        precision: u8,
    ) -> Result<(), TableError> {
        if self.record_count > 0 {
            return Err(TableError::SchemaFrozen);
        }
        self.schema.add(name, kind, length, precision)?;
        self.rebuild_header();
        Ok(())
    }

    /// Adds a Character column of up to `length` bytes (dBase caps text
    /// columns at 254).
    pub fn add_text_field(&mut self, name: &str, length: u8) -> Result<(), TableError> {
        self.add_field(name, FieldType::Character, length, 0)
    }

    /// Adds a Numeric column with an explicit width and precision.
    pub fn add_number_field(
        &mut self,
        name: &str,
        length: u8,
        precision: u8,
    ) -> Result<(), TableError> {
        self.add_field(name, FieldType::Numeric, length, precision)
    }

    /// Adds an integer column (Numeric, 17 wide, no decimals).
    pub fn add_int_field(&mut self, name: &str) -> Result<(), TableError> {
        self.add_field(name, FieldType::Numeric, NUMBER_LENGTH, 0)
    }

    /// Adds a float column (Numeric, 17 wide, 8 decimals).
    pub fn add_float_field(&mut self, name: &str) -> Result<(), TableError> {
        self.add_field(name, FieldType::Numeric, NUMBER_LENGTH, FLOAT_PRECISION)
    }

    /// Adds a Logical column (one byte, conventionally `t`/`f`).
    pub fn add_bool_field(&mut self, name: &str) -> Result<(), TableError> {
        self.add_field(name, FieldType::Logical, 1, 0)
    }

    /// Adds a Date column (eight `YYYYMMDD` digits).
    pub fn add_date_field(&mut self, name: &str) -> Result<(), TableError> {
        self.add_field(name, FieldType::Date, 8, 0)
    }

    /// Returns the ordered field definitions.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        self.schema.fields()
    }

    /// Case-insensitive lookup of a field's index in the schema.
    #[must_use]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.schema.index_of(name)
    }

    /// Rewrites the header and descriptor array from the current field
    /// list and recomputes the derived sizes.
    ///
    /// Only ever called while the table holds no records, so truncating
    /// the buffer to the fixed header cannot drop record bytes.
    fn rebuild_header(&mut self) {
        self.buf.truncate(format::HEADER_BYTES);

        let mut record_length: u16 = 0;
        for field in self.schema.fields() {
            record_length += u16::from(field.length());
            self.buf.extend_from_slice(&format::encode_descriptor(field));
        }
        self.buf.push(format::HEADER_TERMINATOR);

        // One extra byte per record for the deletion marker.
        self.record_length = record_length + 1;
        self.header_size = self.buf.len() as u16;
        format::write_header_size(&mut self.buf, self.header_size);
        format::write_record_length(&mut self.buf, self.record_length);
    }
}
