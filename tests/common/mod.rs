//! Common test fixtures for the integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::RefCell;
use std::rc::Rc;

use datagrid::{
    CellKind, ColumnDef, ColumnOption, EventRecord, Frozen, Grid, GridOptions,
};
use serde_json::{json, Value};

/// Pet table used across scenarios: a frozen id, three draggable columns
/// (one resizable), a checkbox and a select.
pub fn pet_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("Id", "id").width(50).frozen(Frozen::Left),
        ColumnDef::new("Name", "name").width(120).draggable(),
        ColumnDef::new("Type", "type").width(100).draggable().resizable(),
        ColumnDef::new("Owner", "owner").width(140).draggable(),
        ColumnDef::new("Indoor", "indoor")
            .width(70)
            .kind(CellKind::Checkbox),
        ColumnDef::new("Size", "size")
            .width(90)
            .kind(CellKind::Select)
            .options(vec![
                ColumnOption::new("s", "Small"),
                ColumnOption::new("m", "Medium"),
                ColumnOption::new("l", "Large"),
            ]),
    ]
}

/// `n` pet rows with ids `0..n`.
pub fn pet_rows(n: usize) -> Vec<Value> {
    const NAMES: [&str; 4] = ["Rex", "Tom", "Kiki", "Bubbles"];
    const SIZES: [&str; 3] = ["s", "m", "l"];
    (0..n)
        .map(|i| {
            json!({
                "id": i,
                "name": NAMES[i % NAMES.len()],
                "type": if i % 2 == 0 { "dog" } else { "cat" },
                "owner": format!("owner{i}"),
                "indoor": i % 3 == 0,
                "size": SIZES[i % SIZES.len()],
            })
        })
        .collect()
}

/// Options with an explicit page size.
pub fn options(rows_per_page: usize) -> GridOptions {
    GridOptions {
        rows_per_page: Some(rows_per_page),
        ..GridOptions::default()
    }
}

/// A grid over `n` pet rows that has already run its first tick.
pub fn pet_grid(n: usize, rows_per_page: usize) -> Grid<Value> {
    let mut grid = Grid::new(pet_columns(), Some(pet_rows(n)), options(rows_per_page))
        .expect("valid grid");
    grid.tick();
    grid
}

/// Record every event the grid emits.
pub fn record_events(grid: &mut Grid<Value>) -> Rc<RefCell<Vec<EventRecord>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    grid.on_event(move |e| sink.borrow_mut().push(e.record()));
    events
}

/// Data-keys in column order.
pub fn keys(columns: &[ColumnDef]) -> Vec<&str> {
    columns.iter().map(|c| c.data_key.as_str()).collect()
}
