//! Column reorder tests
//!
//! The swap operation, the drop-target policy, and drag-and-drop through
//! the grid.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{keys, pet_columns, pet_grid, record_events};
use datagrid::interaction::{swap_columns, DragTracker};
use datagrid::{ColumnDef, ColumnRef, EventRecord, Frozen, GridError};

fn abc() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("A", "a").draggable(),
        ColumnDef::new("B", "b").draggable(),
        ColumnDef::new("C", "c").draggable(),
    ]
}

#[test]
fn swap_is_self_inverse() {
    let columns = pet_columns();
    let once = swap_columns(&columns, 1, 3).unwrap();
    let twice = swap_columns(&once.columns, 3, 1).unwrap();
    assert_eq!(twice.columns, columns);
    assert_eq!(once.from.data_key, "name");
    assert_eq!(once.to.data_key, "owner");
}

#[test]
fn swap_with_itself_keeps_order_and_input() {
    let columns = pet_columns();
    let before = columns.clone();
    let swap = swap_columns(&columns, 2, 2).unwrap();
    assert_eq!(swap.columns, before);
    assert_eq!(columns, before);
}

#[test]
fn swap_out_of_range() {
    let err = swap_columns(&abc(), 0, 3).unwrap_err();
    assert!(matches!(err, GridError::ColumnOutOfRange { index: 3, len: 3 }));
}

#[test]
fn drop_target_moves_between_columns() {
    let columns = abc();
    let mut drag = DragTracker::new();
    assert!(drag.start(0, &columns[0], false));

    assert_eq!(drag.enter(1, &columns[1]), Some(1));
    assert_eq!(drag.enter(0, &columns[0]), None);
    assert!(!drag.is_drop_target(0));
    assert_eq!(drag.enter(2, &columns[2]), Some(2));
    assert!(drag.is_drop_target(2));
    assert!(!drag.is_drop_target(1));

    let outcome = drag.finish().unwrap();
    assert_eq!((outcome.source, outcome.target), (0, Some(2)));
    assert_eq!(drag.drop_target(), None);
    assert!(!drag.is_dragging());
}

#[test]
fn frozen_columns_never_source_or_target() {
    let columns = vec![
        ColumnDef::new("L", "l").draggable().frozen(Frozen::Left),
        ColumnDef::new("A", "a").draggable(),
        ColumnDef::new("R", "r").draggable().frozen(Frozen::Right),
    ];
    let mut drag = DragTracker::new();
    assert!(!drag.start(0, &columns[0], true));
    assert!(!drag.start(2, &columns[2], true));
    assert!(drag.start(1, &columns[1], false));
    assert_eq!(drag.enter(0, &columns[0]), None);
    assert_eq!(drag.enter(2, &columns[2]), None);
}

#[test]
fn entering_without_drag_is_ignored() {
    let columns = abc();
    let mut drag = DragTracker::new();
    assert_eq!(drag.enter(1, &columns[1]), None);
    assert_eq!(drag.finish(), None);
}

#[test]
fn grid_drop_reorders_and_reports() {
    let mut grid = pet_grid(10, 5);
    let events = record_events(&mut grid);

    // press in the middle of "name" (50..170)
    assert!(grid.start_column_drag(1, 100.0).unwrap());
    assert_eq!(grid.drag_enter(3).unwrap(), Some(3));
    let frame = grid.frame();
    assert!(frame.headers[1].dragging);
    assert!(frame.headers[3].drop_target);

    grid.drop_column().unwrap();
    assert_eq!(
        keys(grid.columns()),
        vec!["id", "owner", "type", "name", "indoor", "size"]
    );
    assert_eq!(grid.state().geometry().x_positions, vec![0, 50, 190, 290, 410, 480]);
    assert_eq!(
        *events.borrow(),
        vec![EventRecord::ColumnOrderChanged {
            from: 1,
            to: 3,
            from_column: ColumnRef {
                label: "Name".into(),
                data_key: "name".into(),
            },
            to_column: ColumnRef {
                label: "Owner".into(),
                data_key: "owner".into(),
            },
            columns: vec![
                "id".into(),
                "owner".into(),
                "type".into(),
                "name".into(),
                "indoor".into(),
                "size".into()
            ],
        }]
    );
}

#[test]
fn cancel_or_targetless_drop_keeps_order() {
    let mut grid = pet_grid(10, 5);
    let events = record_events(&mut grid);
    let before: Vec<String> = keys(grid.columns()).iter().map(|k| k.to_string()).collect();

    grid.start_column_drag(1, 100.0).unwrap();
    grid.drag_enter(0).unwrap();
    assert!(grid.drop_column().unwrap().is_none());

    grid.start_column_drag(2, 200.0).unwrap();
    grid.drag_enter(3).unwrap();
    assert!(grid.cancel_column_drag());

    assert_eq!(keys(grid.columns()), before);
    assert!(events.borrow().is_empty());
}

#[test]
fn non_draggable_columns_follow_grid_override() {
    let mut grid = pet_grid(10, 5);
    // "indoor" has no draggable flag
    assert!(!grid.start_column_drag(4, 420.0).unwrap());

    let mut options = common::options(5);
    options.all_columns_draggable = true;
    let mut grid =
        datagrid::Grid::new(pet_columns(), Some(common::pet_rows(10)), options).unwrap();
    assert!(grid.start_column_drag(4, 420.0).unwrap());
    assert!(!grid.start_column_drag(0, 10.0).unwrap());
}
