//! Row-level operations: appending and reusing record slots, logical
//! deletion, and the offset arithmetic that locates a field's byte span
//! inside the table buffer.
//!
//! A row is not an object -- it is a `record_length`-byte span at
//! `header_size + row * record_length`. Its first byte is the deletion
//! marker; the rest is the concatenation of each field's fixed-width
//! encoding in schema order.

use crate::format;
use crate::Table;
use crate::TableError;

impl Table {
    /// Appends a fresh zero-filled record slot and returns its row index.
    ///
    /// The record count in the header bytes is re-serialized immediately,
    /// keeping the buffer a valid image at all times.
    pub fn append_record(&mut self) -> usize {
        let row = self.record_count as usize;
        self.buf
            .resize(self.buf.len() + self.record_length as usize, 0);
        self.record_count += 1;
        format::write_record_count(&mut self.buf, self.record_count);
        row
    }

    /// Returns a usable row index, preferring the most recently deleted
    /// slot over growing the table.
    ///
    /// A reused slot keeps its old field bytes until overwritten; only the
    /// marker byte is reset to active. Appending ([`Table::append_record`])
    /// is cheaper when no deletions are expected.
    pub fn insert_record(&mut self) -> usize {
        match self.free.pop() {
            Some(row) => {
                let offset = self.row_offset(row);
                self.buf[offset] = format::ACTIVE_MARKER;
                row
            }
            None => self.append_record(),
        }
    }

    /// Marks the row as deleted and makes its slot available for reuse.
    ///
    /// Rows are never physically removed. Deleting the same active row
    /// twice pushes a duplicate free-list entry; callers are expected to
    /// delete an active row at most once.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    pub fn delete(&mut self, row: usize) {
        let offset = self.row_offset(row);
        self.buf[offset] = format::DELETED_MARKER;
        self.free.push(row);
    }

    /// Returns `true` if the row's marker byte flags it as deleted.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    #[must_use]
    pub fn is_deleted(&self, row: usize) -> bool {
        self.buf[self.row_offset(row)] == format::DELETED_MARKER
    }

    /// Encodes `value` into the field's fixed-width span.
    ///
    /// The first value ever written freezes the schema: from here on the
    /// record layout is load-bearing and no field may be added.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `field` is out of range.
    pub fn set_field_value(&mut self, row: usize, field: usize, value: &str) {
        self.schema.freeze();
        let span = self.field_span(row, field);
        let kind = self.schema.fields()[field].kind();
        codec::encode_into(kind, &mut self.buf[span], value);
    }

    /// Encodes `value` into the named field's span.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::FieldNotFound`] for an unknown name (the
    /// lookup is case-insensitive).
    pub fn set_field_value_by_name(
        &mut self,
        row: usize,
        name: &str,
        value: &str,
    ) -> Result<(), TableError> {
        let field = self
            .field_index(name)
            .ok_or_else(|| TableError::FieldNotFound(name.to_string()))?;
        self.set_field_value(row, field, value);
        Ok(())
    }

    /// Decodes the textual value stored in the field's span.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `field` is out of range.
    #[must_use]
    pub fn field_value(&self, row: usize, field: usize) -> String {
        let span = self.field_span(row, field);
        codec::decode(&self.buf[span])
    }

    /// Decodes the named field's value.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::FieldNotFound`] for an unknown name.
    pub fn field_value_by_name(&self, row: usize, name: &str) -> Result<String, TableError> {
        let field = self
            .field_index(name)
            .ok_or_else(|| TableError::FieldNotFound(name.to_string()))?;
        Ok(self.field_value(row, field))
    }

    /// Returns every field value of the row in schema order.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    #[must_use]
    pub fn row(&self, row: usize) -> Vec<String> {
        (0..self.schema.len())
            .map(|field| self.field_value(row, field))
            .collect()
    }

    /// Byte offset of the row's deletion marker.
    pub(crate) fn row_offset(&self, row: usize) -> usize {
        assert!(
            row < self.record_count as usize,
            "row index {row} out of range ({} records)",
            self.record_count
        );
        self.header_size as usize + row * self.record_length as usize
    }

    /// Byte range of the field's value span within the buffer.
    ///
    /// The span starts one byte past the deletion marker plus the widths
    /// of all preceding fields -- a linear scan, which is fine at the
    /// field counts tables actually have.
    fn field_span(&self, row: usize, field: usize) -> std::ops::Range<usize> {
        let fields = self.schema.fields();
        assert!(
            field < fields.len(),
            "field index {field} out of range ({} fields)",
            fields.len()
        );
        let mut start = self.row_offset(row) + 1;
        for preceding in &fields[..field] {
            start += preceding.length() as usize;
        }
        start..start + fields[field].length() as usize
    }
}
