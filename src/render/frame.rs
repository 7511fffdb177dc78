//! Frame assembly: store + columns + rows in, positioned views out.

use serde::Serialize;

use crate::editor::{CellContext, CellView};
use crate::interaction::can_drag;
use crate::layout::{ColumnWindow, GridGeometry, RowWindow, Sticky};
use crate::state::GridState;
use crate::types::{ColumnDef, RowRecord};

/// One header cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderView {
    pub index: usize,
    pub data_key: String,
    pub text: String,
    pub x: u32,
    pub width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky: Option<Sticky>,
    pub z_index: u32,
    pub draggable: bool,
    pub resizable: bool,
    /// This header is the drag source.
    pub dragging: bool,
    /// This header is the current drop target.
    pub drop_target: bool,
    pub resizing: bool,
}

/// A positioned cell inside a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellSlot {
    pub column: usize,
    pub x: u32,
    pub width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky: Option<Sticky>,
    pub z_index: u32,
    /// `None` when the cell draws nothing (a select without options).
    pub view: Option<CellView>,
}

/// One materialized data row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    pub row_index: usize,
    pub virtual_row_index: usize,
    pub top: f64,
    pub active: bool,
    pub cells: Vec<CellSlot>,
}

/// Everything a host needs to draw the grid at its current scroll position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridFrame {
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    pub total_width: u32,
    pub total_height: f64,
    pub window: RowWindow,
    pub columns: ColumnWindow,
}

impl GridFrame {
    pub fn row(&self, row_index: usize) -> Option<&RowView> {
        self.rows.iter().find(|r| r.row_index == row_index)
    }
}

/// Column indices drawn in every row: frozen columns plus the scrolling
/// columns inside `window`, in column order.
pub fn rendered_columns(geometry: &GridGeometry, window: ColumnWindow) -> Vec<usize> {
    (0..geometry.column_count())
        .filter(|&i| geometry.is_frozen(i) || window.contains(i))
        .collect()
}

/// Build the frame for the store's current windows.
///
/// Headers cover every column. Rows cover the visible-row window, clipped
/// to the rows actually supplied.
pub fn build_frame<T: RowRecord>(
    state: &GridState,
    columns: &[ColumnDef],
    rows: &[T],
    all_columns_draggable: bool,
) -> GridFrame {
    let geometry = state.geometry();
    let drag = state.drag();

    let headers = columns
        .iter()
        .enumerate()
        .map(|(index, column)| HeaderView {
            index,
            data_key: column.data_key.clone(),
            text: column.header_text(),
            x: geometry.x(index).unwrap_or(0),
            width: geometry.width(index).unwrap_or(0),
            sticky: geometry.sticky(index),
            z_index: state.cell_z_index(index),
            draggable: can_drag(column, all_columns_draggable),
            resizable: column.resizable,
            dragging: drag.is_source(index),
            drop_target: drag.is_drop_target(index),
            resizing: state.resizing_column() == Some(index),
        })
        .collect();

    let window = state.visible_rows();
    let column_window = state.visible_columns();
    let shown = rendered_columns(geometry, column_window);
    let active = state.active_row();

    let rows = (window.start..window.end)
        .filter_map(|row_index| {
            let row = rows.get(row_index)?;
            let virtual_row_index = row_index - window.start;
            let cells = shown
                .iter()
                .filter_map(|&ci| {
                    let column = columns.get(ci)?;
                    let ctx = CellContext::new(row, column, row_index, virtual_row_index);
                    Some(CellSlot {
                        column: ci,
                        x: geometry.x(ci).unwrap_or(0),
                        width: geometry.width(ci).unwrap_or(0),
                        sticky: geometry.sticky(ci),
                        z_index: state.cell_z_index(ci),
                        view: ctx.render(),
                    })
                })
                .collect();
            Some(RowView {
                row_index,
                virtual_row_index,
                top: state.row_top(row_index),
                active: active == Some(row_index),
                cells,
            })
        })
        .collect();

    GridFrame {
        headers,
        rows,
        total_width: geometry.total_width,
        total_height: geometry.total_height(state.total_rows()),
        window,
        columns: column_window,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::state::GridStateOptions;
    use crate::types::Frozen;
    use serde_json::{json, Value};

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("Id", "id").width(40).frozen(Frozen::Left),
            ColumnDef::new("Name", "name").width(100).draggable(),
            ColumnDef::new("City", "city").width(100).resizable(),
            ColumnDef::new("Zip", "zip").width(100),
        ]
    }

    fn rows(n: usize) -> Vec<Value> {
        (0..n)
            .map(|i| json!({ "id": i, "name": format!("n{i}"), "city": "Oslo", "zip": "0150" }))
            .collect()
    }

    fn state(columns: &[ColumnDef], total_rows: usize) -> GridState {
        let mut s = GridState::new(GridStateOptions {
            row_height: 20.0,
            total_rows,
            extra_rows: 0,
            columns,
        });
        s.set_viewport_height(60.0);
        s.flush();
        s
    }

    #[test]
    fn test_rows_follow_window() {
        let cols = columns();
        let data = rows(50);
        let mut s = state(&cols, data.len());
        s.set_scroll_position(100.0, 0.0);
        let frame = build_frame(&s, &cols, &data, false);

        assert_eq!(frame.window, RowWindow { start: 5, end: 8 });
        let indices: Vec<usize> = frame.rows.iter().map(|r| r.row_index).collect();
        assert_eq!(indices, vec![5, 6, 7]);
        assert_eq!(frame.rows[0].virtual_row_index, 0);
        assert_eq!(frame.rows[0].top, 100.0);
        assert_eq!(frame.total_height, 1000.0);
        assert_eq!(frame.total_width, 340);
    }

    #[test]
    fn test_frozen_columns_always_rendered() {
        let cols = columns();
        let data = rows(5);
        let mut s = state(&cols, data.len());
        s.set_viewport_width(120.0);
        s.set_scroll_position(0.0, 200.0);

        let frame = build_frame(&s, &cols, &data, false);
        let shown: Vec<usize> = frame.rows[0].cells.iter().map(|c| c.column).collect();
        assert_eq!(shown, vec![0, 2, 3]);
        let frozen = &frame.rows[0].cells[0];
        assert_eq!(frozen.z_index, 2);
        assert_eq!(frozen.sticky.unwrap().offset, 0);
        assert_eq!(frame.headers.len(), 4);
    }

    #[test]
    fn test_header_flags() {
        let cols = columns();
        let frame = build_frame(&state(&cols, 0), &cols, &Vec::<Value>::new(), false);
        assert!(!frame.headers[0].draggable);
        assert!(frame.headers[1].draggable);
        assert!(!frame.headers[3].draggable);
        assert!(frame.headers[2].resizable);

        let frame = build_frame(&state(&cols, 0), &cols, &Vec::<Value>::new(), true);
        assert!(!frame.headers[0].draggable);
        assert!(frame.headers[3].draggable);
    }

    #[test]
    fn test_empty_rows_give_headers_only() {
        let cols = columns();
        let frame = build_frame(&state(&cols, 0), &cols, &Vec::<Value>::new(), false);
        assert!(frame.rows.is_empty());
        assert_eq!(frame.headers[1].text, "Name");
        assert_eq!(frame.total_height, 0.0);
    }

    #[test]
    fn test_active_row_flag() {
        let cols = columns();
        let data = rows(5);
        let mut s = state(&cols, data.len());
        s.set_active_row(Some(1));
        let frame = build_frame(&s, &cols, &data, false);
        assert!(!frame.rows[0].active);
        assert!(frame.rows[1].active);
    }

    #[test]
    fn test_frame_json_is_camel_case() {
        let cols = columns();
        let data = rows(1);
        let frame = build_frame(&state(&cols, 1), &cols, &data, false);
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["totalWidth"], 340);
        assert_eq!(json["rows"][0]["virtualRowIndex"], 0);
        assert_eq!(json["rows"][0]["cells"][1]["view"]["id"], "grid-data-row-0-name");
        assert_eq!(json["headers"][0]["sticky"]["side"], "left");
    }
}
