use dbase::Table;

use crate::{FieldBinding, MapError, Mapper, Record};

use super::{sample_setup, Sample};

fn sample_record() -> Sample {
    Sample {
        flag: true,
        note: "msg".to_string(),
        count: 33,
        ratio: 44.34,
    }
}

#[test]
fn written_records_read_back_equal() {
    let (mapper, mut table) = sample_setup();
    let row = mapper.append(&mut table, &sample_record()).unwrap();

    let read: Sample = mapper.read(&table, row).unwrap();
    assert_eq!(read, sample_record());
}

#[test]
fn values_are_rendered_in_the_documented_forms() {
    let (mapper, mut table) = sample_setup();
    let row = mapper.append(&mut table, &sample_record()).unwrap();

    assert_eq!(table.field_value_by_name(row, "flag").unwrap(), "t");
    assert_eq!(table.field_value_by_name(row, "note").unwrap(), "msg");
    assert_eq!(table.field_value_by_name(row, "count").unwrap(), "33");
    // Floats are stored with fixed six decimals.
    assert_eq!(
        table.field_value_by_name(row, "ratio").unwrap(),
        "44.340000"
    );
}

#[test]
fn false_is_rendered_as_f() {
    let (mapper, mut table) = sample_setup();
    let row = mapper
        .append(&mut table, &Sample::default())
        .unwrap();
    assert_eq!(table.field_value_by_name(row, "flag").unwrap(), "f");
}

#[test]
fn negative_numbers_round_trip() {
    let (mapper, mut table) = sample_setup();
    let record = Sample {
        count: -17,
        ratio: -0.5,
        ..Sample::default()
    };
    let row = mapper.append(&mut table, &record).unwrap();

    let read: Sample = mapper.read(&table, row).unwrap();
    assert_eq!(read.count, -17);
    assert_eq!(read.ratio, -0.5);
}

#[test]
fn write_updates_a_row_in_place() {
    let (mapper, mut table) = sample_setup();
    let row = mapper.append(&mut table, &sample_record()).unwrap();

    let mut updated = sample_record();
    updated.count = 34;
    updated.note = "edited".to_string();
    assert_eq!(mapper.write(&mut table, row, &updated).unwrap(), row);

    let read: Sample = mapper.read(&table, row).unwrap();
    assert_eq!(read, updated);
    assert_eq!(table.num_records(), 1);
}

#[test]
fn unparsable_numeric_text_is_a_parse_error() {
    let (mapper, mut table) = sample_setup();
    let row = mapper.append(&mut table, &sample_record()).unwrap();
    table
        .set_field_value_by_name(row, "count", "not-a-number")
        .unwrap();

    let err = mapper.read(&table, row).unwrap_err();
    match err {
        MapError::Parse {
            field,
            expected,
            value,
        } => {
            assert_eq!(field, "count");
            assert_eq!(expected, "integer");
            assert_eq!(value, "not-a-number");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn reading_a_blank_row_is_a_parse_error() {
    // A freshly appended slot is zero-filled; numeric members cannot be
    // parsed out of an empty span.
    let (mapper, mut table) = sample_setup();
    let row = table.append_record();
    table.set_field_value(row, 0, "t");

    assert!(matches!(
        mapper.read(&table, row),
        Err(MapError::Parse { .. })
    ));
}

#[test]
fn logical_read_back_accepts_the_historic_truthy_forms() {
    let (mapper, mut table) = sample_setup();
    let row = mapper.append(&mut table, &sample_record()).unwrap();

    for (stored, expected) in [
        ("t", true),
        ("T", true),
        ("y", true),
        ("Y", true),
        ("f", false),
        ("n", false),
        ("?", false),
    ] {
        table.set_field_value_by_name(row, "flag", stored).unwrap();
        let read: Sample = mapper.read(&table, row).unwrap();
        assert_eq!(read.flag, expected, "stored {stored:?}");
    }
}

#[test]
fn over_long_text_is_truncated_to_the_column_width() {
    let (mapper, mut table) = sample_setup();
    let record = Sample {
        note: "a".repeat(45),
        count: 1,
        ..Sample::default()
    };
    let row = mapper.append(&mut table, &record).unwrap();

    let read: Sample = mapper.read(&table, row).unwrap();
    assert_eq!(read.note, "a".repeat(40));
}

#[test]
fn mapper_works_through_a_cursor() {
    let (mapper, mut table) = sample_setup();
    for count in 0..3 {
        let record = Sample {
            count,
            note: format!("row {count}"),
            ..Sample::default()
        };
        mapper.append(&mut table, &record).unwrap();
    }

    // Scan, delete the middle record, and collect the rest as records.
    let mut kept = Vec::new();
    let mut cursor = table.cursor();
    while cursor.advance() {
        let record: Sample = mapper.read(cursor.table(), cursor.index()).unwrap();
        if record.count == 1 {
            cursor.delete();
        } else {
            kept.push(record.note);
        }
    }
    assert_eq!(kept, vec!["row 0", "row 2"]);
    assert!(table.is_deleted(1));
}

#[test]
fn records_survive_a_byte_image_round_trip() {
    let (mapper, mut table) = sample_setup();
    let row = mapper.append(&mut table, &sample_record()).unwrap();

    let reloaded = Table::from_bytes(table.to_bytes()).unwrap();
    let read: Sample = mapper.read(&reloaded, row).unwrap();
    assert_eq!(read, sample_record());
}

#[derive(Debug, Default, PartialEq)]
struct Partial {
    id: i64,
    cached: String,
}

impl Record for Partial {
    fn bindings() -> Vec<FieldBinding<Self>> {
        // `cached` is intentionally unbound and never touches the table.
        vec![FieldBinding::int("id", |r| r.id, |r, v| r.id = v)]
    }
}

#[test]
fn unbound_members_are_skipped() {
    let mapper = Mapper::<Partial>::new();
    let mut table = Table::new();
    mapper.create_schema(&mut table).unwrap();
    assert_eq!(table.fields().len(), 1);

    let row = mapper
        .append(
            &mut table,
            &Partial {
                id: 7,
                cached: "local only".to_string(),
            },
        )
        .unwrap();

    let read: Partial = mapper.read(&table, row).unwrap();
    assert_eq!(read.id, 7);
    assert_eq!(read.cached, "", "unbound members stay at their default");
}
