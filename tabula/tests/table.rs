use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use tabula::prelude::*;
use tabula::{PageInfo, TableError};

fn person(id: i64, name: &str) -> Record {
    Record::new().set("id", id).set("name", name)
}

fn people() -> Vec<Record> {
    vec![person(1, "Bob"), person(2, "Ann"), person(3, "Cid")]
}

fn names(rows: &[&Record]) -> Vec<String> {
    rows.iter()
        .map(|r| r.get("name").map(|v| v.to_string()).unwrap_or_default())
        .collect()
}

fn size(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

fn table(rows: Vec<Record>, page_size: usize) -> DataTable<Record> {
    DataTable::builder(vec![Column::new("id", "ID"), Column::new("name", "Name")])
        .rows(rows)
        .page_size(size(page_size))
        .build()
        .unwrap()
}

#[test]
fn test_sort_query_scenario() {
    let mut table = table(people(), 2);

    table.set_sort_key("name");
    assert_eq!(names(&table.page_rows()), ["Ann", "Bob"]);
    assert_eq!(table.total_pages(), 2);
    table.set_page_index(1);
    assert_eq!(names(&table.page_rows()), ["Cid"]);

    table.set_query("an");
    assert_eq!(table.page_index(), 0);
    assert_eq!(table.total_pages(), 1);
    assert_eq!(names(&table.page_rows()), ["Ann"]);
}

#[test]
fn test_initial_state() {
    let table = table(people(), 2);
    assert_eq!(table.query(), "");
    assert_eq!(table.sort_indicator(), None);
    assert_eq!(table.page_index(), 0);
    assert_eq!(table.selection_count(), 0);
    assert_eq!(names(&table.page_rows()), ["Bob", "Ann"]);
}

#[test]
fn test_header_click_toggles_direction() {
    let mut table = table(people(), 10);

    let first = table.set_sort_key("name").unwrap();
    assert_eq!(first.direction, SortDirection::Ascending);

    let second = table.set_sort_key("name").unwrap();
    assert_eq!(second.direction, SortDirection::Descending);
    assert_eq!(names(&table.page_rows()), ["Cid", "Bob", "Ann"]);

    // a different column starts ascending again
    let other = table.set_sort_key("id").unwrap();
    assert_eq!(other.key, "id");
    assert_eq!(other.direction, SortDirection::Ascending);

    // flipping back and forth never returns to unsorted
    table.set_sort_key("id");
    table.set_sort_key("id");
    assert!(table.sort_indicator().is_some());
}

#[test]
fn test_unknown_and_unsortable_columns_are_ignored() {
    let mut table = DataTable::builder(vec![
        Column::new("name", "Name"),
        Column::new("notes", "Notes").unsortable(),
    ])
    .rows(people())
    .build()
    .unwrap();

    assert_eq!(table.set_sort_key("missing"), None);
    assert_eq!(table.set_sort_key("notes"), None);
    assert_eq!(table.sort_indicator(), None);
}

#[test]
fn test_sort_keeps_page_index() {
    let mut table = table(people(), 1);
    table.set_page_index(2);
    table.set_sort_key("name");
    assert_eq!(table.page_index(), 2);
    assert_eq!(names(&table.page_rows()), ["Cid"]);
}

#[test]
fn test_numeric_column_sorts_numerically() {
    let rows = vec![person(10, "a"), person(9, "b"), person(100, "c")];
    let mut table = table(rows, 10);
    table.set_sort_key("id");
    assert_eq!(names(&table.page_rows()), ["b", "a", "c"]);
}

#[test]
fn test_declared_lexical_overrides_numbers() {
    let rows = vec![person(10, "a"), person(9, "b"), person(100, "c")];
    let mut table = DataTable::builder(vec![Column::new("id", "ID").lexical()])
        .rows(rows)
        .build()
        .unwrap();
    table.set_sort_key("id");
    assert_eq!(names(&table.page_rows()), ["a", "c", "b"]);
}

#[test]
fn test_page_size_change_resets_page() {
    let mut table = table(people(), 1);
    table.set_page_index(2);
    table.set_page_size(size(2));
    assert_eq!(table.page_index(), 0);
    assert_eq!(table.total_pages(), 2);

    // same size again is not a change
    table.set_page_index(1);
    table.set_page_size(size(2));
    assert_eq!(table.page_index(), 1);
}

#[test]
fn test_same_query_does_not_reset_page() {
    let mut table = table(people(), 1);
    table.set_query("i");
    table.set_page_index(0);
    table.set_page_index(1);
    table.set_query("i");
    assert_eq!(table.page_index(), 1);
}

#[test]
fn test_out_of_range_page_is_empty() {
    let mut table = table(people(), 2);
    table.set_page_index(7);
    assert!(table.page_rows().is_empty());
    assert_eq!(table.total_pages(), 2);
    assert_eq!(
        table.page_info(),
        PageInfo {
            page_index: 7,
            total_pages: 2,
            first: 0,
            last: 0,
            total: 3,
        }
    );
}

#[test]
fn test_page_navigation_clamps() {
    let mut table = table(people(), 2);
    assert!(!table.previous_page());
    assert!(table.next_page());
    assert_eq!(table.page_index(), 1);
    assert!(!table.next_page());

    table.set_page_index(9);
    assert!(table.previous_page());
    assert_eq!(table.page_index(), 1);
    assert!(table.previous_page());
    assert_eq!(table.page_index(), 0);

    table.set_page_index(9);
    assert!(table.clamp_page_index());
    assert_eq!(table.page_index(), 1);
    assert!(!table.clamp_page_index());
}

#[test]
fn test_page_info() {
    let rows: Vec<Record> = (1..=7).map(|i| person(i, "x")).collect();
    let mut table = table(rows, 3);
    table.set_page_index(2);
    let info = table.page_info();
    assert_eq!((info.first, info.last, info.total), (7, 7, 7));
    assert_eq!(info.total_pages, 3);
}

#[test]
fn test_empty_table_has_one_page() {
    let table = table(Vec::new(), 5);
    assert_eq!(table.total_pages(), 1);
    assert!(table.page_rows().is_empty());
}

// -----------------------------------------------------------------------------
// Selection
// -----------------------------------------------------------------------------

#[test]
fn test_selection_survives_query_sort_and_page() {
    let mut table = table(people(), 1);
    assert!(table.toggle_row(2));

    table.set_query("b");
    table.set_sort_key("name");
    table.set_page_index(3);
    table.set_query("");

    assert!(table.is_row_selected(&RowId::Int(2)));
    assert_eq!(names(&table.selected_rows()), ["Ann"]);
}

#[test]
fn test_toggle_row_not_on_page() {
    let mut table = table(people(), 1);
    assert!(table.toggle_row(3));
    assert_eq!(names(&table.page_rows()), ["Bob"]);
    assert_eq!(names(&table.selected_rows()), ["Cid"]);
}

#[test]
fn test_toggle_all_on_page_selects_then_clears() {
    let rows: Vec<Record> = (1..=5).map(|i| person(i, "x")).collect();
    let mut table = table(rows, 3);
    table.toggle_row(1);
    table.toggle_row(2);

    assert_eq!(table.toggle_all_on_page(), PageToggle::Selected);
    assert_eq!(table.selection_count(), 3);
    assert_eq!(table.page_selection(), PageSelection::All);

    assert_eq!(table.toggle_all_on_page(), PageToggle::Cleared);
    assert_eq!(table.selection_count(), 0);
    assert_eq!(table.page_selection(), PageSelection::None);
}

#[test]
fn test_toggle_all_on_page_leaves_other_pages() {
    let rows: Vec<Record> = (1..=5).map(|i| person(i, "x")).collect();
    let mut table = table(rows, 3);
    table.toggle_row(5);

    assert_eq!(table.toggle_all_on_page(), PageToggle::Selected);
    assert_eq!(
        table.selected_ids(),
        vec![RowId::Int(1), RowId::Int(2), RowId::Int(3), RowId::Int(5)]
    );
    table.set_page_index(1);
    assert_eq!(table.page_selection(), PageSelection::Partial);
}

#[test]
fn test_clear_selection() {
    let mut table = table(people(), 2);
    table.toggle_row(1);
    table.toggle_row(3);
    let mut removed = table.clear_selection();
    removed.sort();
    assert_eq!(removed, vec![RowId::Int(1), RowId::Int(3)]);
    assert!(table.selected_rows().is_empty());
    assert!(table.clear_selection().is_empty());
}

#[test]
fn test_replaced_rows_evict_missing_selection() {
    let mut table = table(people(), 2);
    table.toggle_row(1);
    table.toggle_row(2);

    table.set_rows(vec![person(2, "Ann"), person(4, "Dee")]);
    assert_eq!(names(&table.selected_rows()), ["Ann"]);
    // the evicted id is still held
    assert_eq!(table.selection_count(), 2);
    assert!(table.is_row_selected(&RowId::Int(1)));

    // and resolves again when the row returns
    table.set_rows(people());
    assert_eq!(names(&table.selected_rows()), ["Bob", "Ann"]);
}

#[test]
fn test_single_selection_mode() {
    let mut table = DataTable::builder(vec![Column::new("name", "Name")])
        .rows(people())
        .selection_mode(SelectionMode::Single)
        .build()
        .unwrap();
    table.toggle_row(1);
    table.toggle_row(3);
    assert_eq!(table.selected_ids(), vec![RowId::Int(3)]);
    assert_eq!(table.toggle_all_on_page(), PageToggle::Unchanged);
}

#[test]
fn test_selection_disabled() {
    let mut table = table(people(), 2);
    table.set_selection_mode(SelectionMode::None);
    assert!(!table.toggle_row(1));
    assert_eq!(table.toggle_all_on_page(), PageToggle::Unchanged);
    assert_eq!(table.selection_count(), 0);
}

// -----------------------------------------------------------------------------
// Notifications
// -----------------------------------------------------------------------------

fn record_events(table: &mut DataTable<Record>) -> Arc<Mutex<Vec<Vec<RowId>>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    table.subscribe(move |event| {
        sink.lock().unwrap().push(event.ids.to_vec());
    });
    events
}

#[test]
fn test_selection_changed_fires_on_resolution_change() {
    let mut table = table(people(), 2);
    let events = record_events(&mut table);

    table.toggle_row(3);
    table.toggle_row(1);
    table.set_query("zzz");
    table.set_sort_key("name");
    table.clear_selection();

    let events = events.lock().unwrap();
    assert_eq!(
        *events,
        vec![
            vec![RowId::Int(3)],
            vec![RowId::Int(1), RowId::Int(3)],
            vec![],
        ]
    );
}

#[test]
fn test_selection_changed_on_row_replacement() {
    let mut table = table(people(), 2);
    table.toggle_row(1);
    let events = record_events(&mut table);

    // same ids, new row values
    table.set_rows(people());
    assert_eq!(*events.lock().unwrap(), vec![vec![RowId::Int(1)]]);

    table.set_rows(vec![person(2, "Ann")]);
    assert_eq!(
        *events.lock().unwrap(),
        vec![vec![RowId::Int(1)], Vec::<RowId>::new()]
    );

    // nothing resolved before or after
    table.set_rows(vec![person(3, "Cid")]);
    assert_eq!(events.lock().unwrap().len(), 2);
}

#[test]
fn test_reloaded_row_content_notifies_with_new_rows() {
    let mut table = table(people(), 2);
    table.toggle_row(1);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    table.subscribe(move |event| {
        let names: Vec<String> = event
            .rows
            .iter()
            .map(|r| r.value("name").to_string())
            .collect();
        sink.lock().unwrap().push(names);
    });

    table.set_rows(vec![person(1, "Robert"), person(2, "Ann")]);

    assert_eq!(names(&table.selected_rows()), ["Robert"]);
    assert_eq!(*seen.lock().unwrap(), vec![vec!["Robert".to_string()]]);
}

#[test]
fn test_row_replacement_without_selection_does_not_notify() {
    let mut table = table(people(), 2);
    let events = record_events(&mut table);
    table.set_rows(vec![person(4, "Dee")]);
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn test_toggling_unknown_id_does_not_notify() {
    let mut table = table(people(), 2);
    let events = record_events(&mut table);
    assert!(table.toggle_row(99));
    assert!(events.lock().unwrap().is_empty());
    assert_eq!(table.selection_count(), 1);
}

#[test]
fn test_event_carries_rows() {
    let mut table = table(people(), 2);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    table.subscribe(move |event| {
        let names: Vec<String> = event
            .rows
            .iter()
            .map(|r| r.value("name").to_string())
            .collect();
        sink.lock().unwrap().push(names);
    });
    table.toggle_row(2);
    assert_eq!(*seen.lock().unwrap(), vec![vec!["Ann".to_string()]]);
}

#[test]
fn test_unsubscribe() {
    let mut table = table(people(), 2);
    let count = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&count);
    let id = table.subscribe(move |_| *sink.lock().unwrap() += 1);

    table.toggle_row(1);
    assert!(table.unsubscribe(id));
    assert!(!table.unsubscribe(id));
    table.toggle_row(2);
    assert_eq!(*count.lock().unwrap(), 1);
}

// -----------------------------------------------------------------------------
// Construction
// -----------------------------------------------------------------------------

#[test]
fn test_duplicate_columns_rejected() {
    let err = DataTable::<Record>::builder(vec![
        Column::new("name", "Name"),
        Column::new("name", "Again"),
    ])
    .build()
    .unwrap_err();
    assert!(matches!(err, TableError::DuplicateColumn { ref key } if key == "name"));
}

#[test]
fn test_no_columns_rejected() {
    let err = DataTable::<Record>::new(Vec::new(), people()).unwrap_err();
    assert!(matches!(err, TableError::NoColumns));
}

#[test]
fn test_config_applies() {
    let config = TableConfig::from_json_str(r#"{"page_size": 1, "selection_mode": "none"}"#).unwrap();
    let table = DataTable::builder(vec![Column::new("name", "Name")])
        .rows(people())
        .config(config)
        .build()
        .unwrap();
    assert_eq!(table.total_pages(), 3);
    assert_eq!(table.selection_mode(), SelectionMode::None);
}
