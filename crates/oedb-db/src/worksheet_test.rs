use super::*;

fn vehicles_row(id: &str, model: &str) -> Vec<String> {
    let mut row = vec![String::new(); Table::Vehicles.columns().len()];
    row[0] = id.to_owned();
    row[3] = model.to_owned();
    row
}

#[test]
fn first_append_writes_header_then_row() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = WorksheetStore::open(dir.path()).unwrap();

    store
        .append(Table::Vehicles, vehicles_row("P0001", "3 (E90) 320d"))
        .unwrap();

    let text = fs::read_to_string(store.path(Table::Vehicles)).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().starts_with("Part_ID,OE_Number,Car_Brand"));
    assert!(lines.next().unwrap().starts_with("P0001"));
    assert!(lines.next().is_none());
}

#[test]
fn read_all_skips_the_header() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = WorksheetStore::open(dir.path()).unwrap();

    store
        .append(Table::Vehicles, vehicles_row("P0001", "3 (E90) 320d"))
        .unwrap();
    store
        .append(Table::Vehicles, vehicles_row("P0002", "5 (F10) 520d"))
        .unwrap();

    let rows = store.read_all(Table::Vehicles).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "P0001");
    assert_eq!(rows[1][3], "5 (F10) 520d");
}

#[test]
fn missing_file_reads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = WorksheetStore::open(dir.path()).unwrap();
    assert!(store.read_all(Table::PartsMaster).unwrap().is_empty());
}

#[test]
fn cells_with_commas_survive_the_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = WorksheetStore::open(dir.path()).unwrap();

    let mut row = vec![String::new(); Table::PartsMaster.columns().len()];
    row[0] = "P0001".into();
    row[7] = "3 (E90), 5 (F10)".into();
    row[8] = "Height: 79 mm; Thread: M18".into();
    store.append(Table::PartsMaster, row.clone()).unwrap();

    let rows = store.read_all(Table::PartsMaster).unwrap();
    assert_eq!(rows, vec![row]);
}

#[test]
fn clear_removes_every_table_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = WorksheetStore::open(dir.path()).unwrap();

    store
        .append(Table::Vehicles, vehicles_row("P0001", "3 (E90) 320d"))
        .unwrap();
    assert!(store.path(Table::Vehicles).exists());

    store.clear().unwrap();
    assert!(!store.path(Table::Vehicles).exists());
    assert!(store.read_all(Table::Vehicles).unwrap().is_empty());
}

#[test]
fn wrong_width_never_touches_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = WorksheetStore::open(dir.path()).unwrap();

    let err = store
        .append(Table::PartsMaster, vec!["P0001".into()])
        .unwrap_err();
    assert!(matches!(err, crate::StoreError::RowWidth { .. }));
    assert!(!store.path(Table::PartsMaster).exists());
}
