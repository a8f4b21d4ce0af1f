mod roundtrip_tests;

use dbase::Table;

use crate::{FieldBinding, Mapper, Record};

/// The record type most suites map: one member of every supported kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    pub flag: bool,
    pub note: String,
    pub count: i64,
    pub ratio: f64,
}

impl Record for Sample {
    fn bindings() -> Vec<FieldBinding<Self>> {
        vec![
            FieldBinding::boolean("flag", |s| s.flag, |s, v| s.flag = v),
            FieldBinding::sized_text("note", 40, |s| s.note.clone(), |s, v| s.note = v),
            FieldBinding::int("count", |s| s.count, |s, v| s.count = v),
            FieldBinding::float("ratio", |s| s.ratio, |s, v| s.ratio = v),
        ]
    }
}

/// A mapper plus a table already carrying `Sample`'s schema.
pub fn sample_setup() -> (Mapper<Sample>, Table) {
    let mapper = Mapper::<Sample>::new();
    let mut table = Table::new();
    mapper.create_schema(&mut table).unwrap();
    (mapper, table)
}
