use super::sample_table;

fn three_row_table() -> crate::Table {
    let mut table = sample_table();
    for value in ["one", "two", "three"] {
        let row = table.append_record();
        table.set_field_value(row, 1, value);
    }
    table
}

#[test]
fn rows_visits_active_rows_in_order() {
    let table = three_row_table();
    let texts: Vec<String> = table.rows().map(|r| r.value(1)).collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
}

#[test]
fn rows_skips_deleted_rows() {
    let mut table = three_row_table();
    table.delete(1);

    let indices: Vec<usize> = table.rows().map(|r| r.index()).collect();
    assert_eq!(indices, vec![0, 2]);
}

#[test]
fn rows_on_an_empty_table_yields_nothing() {
    let table = sample_table();
    assert_eq!(table.rows().count(), 0);
}

#[test]
fn row_view_exposes_all_values() {
    let table = three_row_table();
    let first = table.rows().next().unwrap();
    assert_eq!(first.values(), vec!["", "one", "", ""]);
    assert_eq!(first.index(), 0);
}

#[test]
fn cursor_walks_and_reports_indices() {
    let mut table = three_row_table();
    let mut cursor = table.cursor();
    let mut seen = Vec::new();
    while cursor.advance() {
        seen.push((cursor.index(), cursor.value(1)));
    }
    assert_eq!(
        seen,
        vec![
            (0, "one".to_string()),
            (1, "two".to_string()),
            (2, "three".to_string())
        ]
    );
}

#[test]
fn cursor_snapshot_ignores_later_appends() {
    let mut table = three_row_table();
    let mut cursor = table.cursor();
    assert!(cursor.advance());

    // Rows appended mid-traversal exist in the table but are outside the
    // cursor's snapshot bound.
    let appended = cursor.table_mut().append_record();
    let mut visited = vec![cursor.index()];
    while cursor.advance() {
        visited.push(cursor.index());
    }
    assert_eq!(visited, vec![0, 1, 2]);
    assert!(!visited.contains(&appended));
    assert_eq!(table.num_records(), 4);
}

#[test]
fn cursor_stays_exhausted() {
    let mut table = three_row_table();
    let mut cursor = table.cursor();
    while cursor.advance() {}

    assert!(!cursor.advance());
    cursor.table_mut().append_record();
    assert!(!cursor.advance(), "exhaustion is terminal");
}

#[test]
fn cursor_can_delete_while_scanning() {
    let mut table = three_row_table();

    let mut cursor = table.cursor();
    while cursor.advance() {
        if cursor.value(1) == "two" {
            cursor.delete();
        }
    }

    let remaining: Vec<String> = table.rows().map(|r| r.value(1)).collect();
    assert_eq!(remaining, vec!["one", "three"]);
    assert!(table.is_deleted(1));
}

#[test]
fn cursor_can_rewrite_the_current_row() {
    let mut table = three_row_table();

    let mut cursor = table.cursor();
    while cursor.advance() {
        if cursor.value(1) == "two" {
            cursor.set_value(1, "2");
        }
    }

    assert_eq!(table.field_value(1, 1), "2");
}

#[test]
#[should_panic(expected = "not positioned")]
fn cursor_index_panics_before_first_advance() {
    let mut table = three_row_table();
    let cursor = table.cursor();
    let _ = cursor.index();
}

#[test]
fn fresh_traversals_see_fresh_bounds() {
    let mut table = three_row_table();
    {
        let mut cursor = table.cursor();
        while cursor.advance() {}
    }
    table.append_record();
    assert_eq!(table.rows().count(), 4);
}
