//! Cell rendering and edit protocol tests
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use std::rc::Rc;

use common::{pet_columns, pet_grid, pet_rows, record_events};
use datagrid::editor::{
    cell_dom_id, CellContext, CellInfo, CellView, CustomCell, EditInput, HeaderRenderer,
};
use datagrid::{
    CellKind, CellValue, ColumnDef, ColumnOption, EventRecord, Grid, GridError, GridOptions,
};
use serde_json::json;

struct Upper;

impl HeaderRenderer for Upper {
    fn render(&self, column: &ColumnDef) -> String {
        column.label.to_uppercase()
    }
}

struct Badge;

impl CustomCell for Badge {
    fn render(&self, cell: &CellInfo<'_>) -> String {
        format!(
            "[{}] row {} of window",
            cell.value.map(CellValue::display).unwrap_or_default(),
            cell.virtual_row_index
        )
    }
}

#[test]
fn dom_ids_are_the_same_for_every_kind() {
    let row = pet_rows(1).remove(0);
    for column in pet_columns() {
        let ctx = CellContext::new(&row, &column, 7, 0);
        let expected = format!("grid-data-row-7-{}", column.data_key);
        assert_eq!(ctx.dom_id(), expected);
        assert_eq!(ctx.render().unwrap().id(), expected);
    }
    assert_eq!(cell_dom_id(0, "name"), "grid-data-row-0-name");
}

#[test]
fn select_without_options_renders_nothing() {
    let row = json!({ "size": "m" });
    let column = ColumnDef::new("Size", "size").kind(CellKind::Select);
    assert_eq!(CellContext::new(&row, &column, 0, 0).render(), None);
}

#[test]
fn select_renders_each_option_once() {
    let row = json!({ "size": "m" });
    let columns = pet_columns();
    let size = &columns[5];
    let Some(CellView::Select { options, .. }) = CellContext::new(&row, size, 0, 0).render()
    else {
        panic!("expected select");
    };
    assert_eq!(options.len(), 3);
    let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["Small", "Medium", "Large"]);
    assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
    assert!(options[1].selected);
}

#[test]
fn dynamic_labels_are_evaluated_at_render_time() {
    let counter = Rc::new(std::cell::Cell::new(0));
    let c = Rc::clone(&counter);
    let column = ColumnDef::new("Size", "size")
        .kind(CellKind::Select)
        .options(vec![ColumnOption::dynamic("s", move || {
            c.set(c.get() + 1);
            format!("Small #{}", c.get())
        })]);
    let row = json!({ "size": "s" });
    let ctx = CellContext::new(&row, &column, 0, 0);

    let first = ctx.render().unwrap();
    let second = ctx.render().unwrap();
    assert_ne!(first, second);
    assert_eq!(counter.get(), 2);
}

#[test]
fn checkbox_reflects_truthiness() {
    let column = ColumnDef::new("Indoor", "indoor").kind(CellKind::Checkbox);
    for (value, checked) in [
        (json!(true), true),
        (json!(false), false),
        (json!(1), true),
        (json!(0), false),
        (json!(null), false),
    ] {
        let row = json!({ "indoor": value });
        assert_eq!(
            CellContext::new(&row, &column, 0, 0).render(),
            Some(CellView::Checkbox {
                id: "grid-data-row-0-indoor".into(),
                checked
            })
        );
    }
}

#[test]
fn custom_cells_and_headers() {
    let columns = vec![
        ColumnDef::new("Name", "name").header(Rc::new(Upper)),
        ColumnDef::new("Type", "type").kind(CellKind::Custom(Rc::new(Badge))),
    ];
    let mut grid = Grid::new(columns, Some(pet_rows(20)), GridOptions::default()).unwrap();
    grid.tick();
    grid.scroll_to(48.0, 0.0);

    let frame = grid.frame();
    assert_eq!(frame.headers[0].text, "NAME");
    let row = &frame.rows[0];
    assert_eq!(row.row_index, 2);
    assert_eq!(
        row.cells[1].view,
        Some(CellView::Custom {
            id: "grid-data-row-2-type".into(),
            content: "[dog] row 0 of window".into()
        })
    );
}

#[test]
fn grid_commits_report_window_relative_index() {
    let mut grid = pet_grid(30, 5);
    let events = record_events(&mut grid);
    grid.scroll_to(24.0 * 10.0, 0.0);
    assert_eq!(grid.visible_rows().start, 10);

    let size = grid.column_index("size").unwrap();
    let indoor = grid.column_index("indoor").unwrap();
    grid.commit_edit(12, size, EditInput::Choice("l".into()))
        .unwrap();
    grid.commit_edit(10, indoor, EditInput::Checked(true))
        .unwrap();

    assert_eq!(
        *events.borrow(),
        vec![
            EventRecord::CellValueCommitted {
                row_index: 12,
                virtual_row_index: 2,
                data_key: "size".into(),
                value: CellValue::Text("l".into()),
            },
            EventRecord::CellValueCommitted {
                row_index: 10,
                virtual_row_index: 0,
                data_key: "indoor".into(),
                value: CellValue::Bool(true),
            },
        ]
    );
    // rows are untouched
    assert_eq!(grid.rows()[12]["size"], "s");
}

#[test]
fn rejected_commits_emit_nothing() {
    let mut grid = pet_grid(30, 5);
    let events = record_events(&mut grid);
    let size = grid.column_index("size").unwrap();
    let name = grid.column_index("name").unwrap();

    assert!(matches!(
        grid.commit_edit(1, size, EditInput::Choice("xl".into())),
        Err(GridError::UnknownOption { .. })
    ));
    assert!(matches!(
        grid.commit_edit(1, name, EditInput::Checked(true)),
        Err(GridError::EditKindMismatch { .. })
    ));
    assert!(matches!(
        grid.commit_edit(20, name, EditInput::Text("x".into())),
        Err(GridError::RowNotRendered { .. })
    ));
    assert!(events.borrow().is_empty());
}
