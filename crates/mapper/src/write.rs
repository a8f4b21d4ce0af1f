//! Write path: schema derivation from the binding table, plus `write()`
//! and `append()` for whole records.

use dbase::{Table, TableError};

use crate::bind::Access;
use crate::{MapError, Mapper, Record};

impl<R: Record> Mapper<R> {
    /// Adds one column per binding to `table`, in binding order: text →
    /// Character, int → Numeric (17, 0), float → Numeric (17, 8),
    /// boolean → Logical.
    ///
    /// # Errors
    ///
    /// Propagates [`TableError::SchemaFrozen`] and
    /// [`TableError::DuplicateField`] from the table unchanged.
    pub fn create_schema(&self, table: &mut Table) -> Result<(), TableError> {
        for binding in &self.bindings {
            match binding.access {
                Access::Text { length, .. } => table.add_text_field(binding.name, length)?,
                Access::Int { .. } => table.add_int_field(binding.name)?,
                Access::Float { .. } => table.add_float_field(binding.name)?,
                Access::Bool { .. } => table.add_bool_field(binding.name)?,
            }
        }
        Ok(())
    }

    /// Renders every bound member of `record` into row `row` and returns
    /// the row index.
    ///
    /// Rendering: int as decimal digits, float with fixed six decimals,
    /// bool as `t`/`f`, text verbatim (the codec truncates it to the
    /// column width).
    ///
    /// # Errors
    ///
    /// Returns [`TableError::FieldNotFound`] (wrapped) if a bound column
    /// does not exist in the table's schema.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    pub fn write(&self, table: &mut Table, row: usize, record: &R) -> Result<usize, MapError> {
        for binding in &self.bindings {
            let value = match &binding.access {
                Access::Text { get, .. } => get(record),
                Access::Int { get, .. } => get(record).to_string(),
                Access::Float { get, .. } => format!("{:.6}", get(record)),
                Access::Bool { get, .. } => String::from(if get(record) { "t" } else { "f" }),
            };
            table.set_field_value_by_name(row, binding.name, &value)?;
        }
        Ok(row)
    }

    /// Appends a fresh record slot and writes `record` into it.
    ///
    /// # Errors
    ///
    /// As for [`write`](Mapper::write).
    pub fn append(&self, table: &mut Table, record: &R) -> Result<usize, MapError> {
        let row = table.append_record();
        self.write(table, row, record)
    }
}
