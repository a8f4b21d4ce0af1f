//! Read path: parsing stored field text back into a record's members.

use dbase::Table;

use crate::bind::Access;
use crate::{MapError, Mapper, Record};

impl<R: Record> Mapper<R> {
    /// Reads row `row` into `record`, member by member in binding order.
    ///
    /// Logical read-back follows the historic rule: `t`, `T`, `y`, `Y`
    /// mean true, anything else (including an uninitialized `?`) means
    /// false.
    ///
    /// # Errors
    ///
    /// - [`MapError::Parse`] when a stored value no longer parses as the
    ///   member's kind (free text in an integer column, say). Members
    ///   already copied stay copied; the table itself is untouched.
    /// - [`MapError::Table`] for an unknown column name.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    pub fn read_into(&self, table: &Table, row: usize, record: &mut R) -> Result<(), MapError> {
        for binding in &self.bindings {
            let value = table.field_value_by_name(row, binding.name)?;
            match &binding.access {
                Access::Text { set, .. } => set(record, value),
                Access::Int { set, .. } => {
                    let parsed = value.parse::<i64>().map_err(|_| MapError::Parse {
                        field: binding.name,
                        expected: "integer",
                        value,
                    })?;
                    set(record, parsed);
                }
                Access::Float { set, .. } => {
                    let parsed = value.parse::<f64>().map_err(|_| MapError::Parse {
                        field: binding.name,
                        expected: "float",
                        value,
                    })?;
                    set(record, parsed);
                }
                Access::Bool { set, .. } => {
                    set(record, matches!(value.as_str(), "t" | "T" | "y" | "Y"));
                }
            }
        }
        Ok(())
    }

    /// Reads row `row` into a fresh `R`.
    ///
    /// # Errors
    ///
    /// As for [`read_into`](Mapper::read_into).
    pub fn read(&self, table: &Table, row: usize) -> Result<R, MapError>
    where
        R: Default,
    {
        let mut record = R::default();
        self.read_into(table, row, &mut record)?;
        Ok(record)
    }
}
