//! Sequential traversal that transparently skips logically deleted rows.
//!
//! Both surfaces snapshot the record count at creation time: rows appended
//! while a traversal is live are not visited (a documented property, not a
//! defect). Neither is restartable -- a fresh traversal means a fresh call
//! on the table.
//!
//! [`Rows`] is the plain read path: a std `Iterator` borrowing the table
//! shared, yielding one [`RowView`] per active row. [`RowCursor`] holds
//! the table mutably and adds in-place writes and deletion of the current
//! row, for callers that edit while they scan.

use crate::Table;

/// Read-only iterator over the active rows of a [`Table`].
pub struct Rows<'t> {
    table: &'t Table,
    /// Next row index to examine.
    next: usize,
    /// Record count snapshot taken at creation.
    last: usize,
}

impl<'t> Rows<'t> {
    fn new(table: &'t Table) -> Self {
        let last = table.num_records();
        Self {
            table,
            next: 0,
            last,
        }
    }
}

impl<'t> Iterator for Rows<'t> {
    type Item = RowView<'t>;

    fn next(&mut self) -> Option<RowView<'t>> {
        while self.next < self.last {
            let index = self.next;
            self.next += 1;
            if !self.table.is_deleted(index) {
                return Some(RowView {
                    table: self.table,
                    index,
                });
            }
        }
        None
    }
}

/// A borrowed view of one active row.
#[derive(Clone, Copy)]
pub struct RowView<'t> {
    table: &'t Table,
    index: usize,
}

impl<'t> RowView<'t> {
    /// Returns the row's index in the table.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns every field value of this row in schema order.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.table.row(self.index)
    }

    /// Returns one field value by index.
    ///
    /// # Panics
    ///
    /// Panics if `field` is out of range.
    #[must_use]
    pub fn value(&self, field: usize) -> String {
        self.table.field_value(self.index, field)
    }

    /// Returns the table this view borrows from.
    #[must_use]
    pub fn table(&self) -> &'t Table {
        self.table
    }
}

/// A mutating cursor over the active rows of a [`Table`].
///
/// `advance()` moves to the next active row; while positioned, the
/// current row can be read, rewritten, or deleted in place. Once
/// `advance()` returns `false` the cursor is exhausted and stays so.
///
/// ```rust
/// use dbase::Table;
///
/// let mut table = Table::new();
/// table.add_text_field("name", 20).unwrap();
/// let row = table.append_record();
/// table.set_field_value(row, 0, "stale");
///
/// let mut cursor = table.cursor();
/// while cursor.advance() {
///     if cursor.value(0) == "stale" {
///         cursor.delete();
///     }
/// }
/// assert!(table.is_deleted(row));
/// ```
pub struct RowCursor<'t> {
    table: &'t mut Table,
    /// Next row index to examine.
    next: usize,
    /// Record count snapshot taken at creation.
    last: usize,
    current: Option<usize>,
}

impl<'t> RowCursor<'t> {
    fn new(table: &'t mut Table) -> Self {
        let last = table.num_records();
        Self {
            table,
            next: 0,
            last,
            current: None,
        }
    }

    /// Moves to the next active row, skipping deleted slots.
    ///
    /// Returns `false` when the snapshot bound is reached; from then on
    /// the cursor is exhausted and every further call returns `false`.
    pub fn advance(&mut self) -> bool {
        while self.next < self.last {
            let index = self.next;
            self.next += 1;
            if !self.table.is_deleted(index) {
                self.current = Some(index);
                return true;
            }
        }
        self.current = None;
        false
    }

    /// Returns the index of the current row.
    ///
    /// # Panics
    ///
    /// Panics before the first `advance()` and after exhaustion.
    #[must_use]
    pub fn index(&self) -> usize {
        self.current.expect("cursor is not positioned on a row")
    }

    /// Returns every field value of the current row in schema order.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is not positioned on a row.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.table.row(self.index())
    }

    /// Returns one field value of the current row.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is not positioned on a row or `field` is out
    /// of range.
    #[must_use]
    pub fn value(&self, field: usize) -> String {
        self.table.field_value(self.index(), field)
    }

    /// Writes one field value of the current row.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is not positioned on a row or `field` is out
    /// of range.
    pub fn set_value(&mut self, field: usize, value: &str) {
        self.table.set_field_value(self.index(), field, value);
    }

    /// Deletes the current row. The cursor stays positioned on it (the
    /// slot still exists); the next `advance()` moves past it.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is not positioned on a row.
    pub fn delete(&mut self) {
        self.table.delete(self.index());
    }

    /// Returns the underlying table, for read access beyond the current
    /// row (typed record mapping, for instance).
    #[must_use]
    pub fn table(&self) -> &Table {
        self.table
    }

    /// Returns the underlying table mutably.
    ///
    /// Appends made through this reference are not visited by this
    /// cursor: the bound was snapshotted at creation.
    #[must_use]
    pub fn table_mut(&mut self) -> &mut Table {
        self.table
    }
}

impl Table {
    /// Returns a read-only iterator over the active rows.
    ///
    /// Deleted rows are skipped; rows appended after this call are not
    /// visited.
    #[must_use]
    pub fn rows(&self) -> Rows<'_> {
        Rows::new(self)
    }

    /// Returns a mutating cursor over the active rows.
    ///
    /// See [`RowCursor`] for the advance/read/write/delete protocol.
    #[must_use]
    pub fn cursor(&mut self) -> RowCursor<'_> {
        RowCursor::new(self)
    }
}
