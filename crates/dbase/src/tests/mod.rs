mod iter_tests;

use crate::Table;

/// The schema used by most suites: one column of every type, in the
/// order bool / text / int / float.
pub fn sample_table() -> Table {
    let mut table = Table::new();
    table.add_bool_field("b").unwrap();
    table.add_text_field("t", 40).unwrap();
    table.add_int_field("i").unwrap();
    table.add_float_field("f").unwrap();
    table
}
