//! The grid component.
//!
//! [`Grid`] validates construction input, owns the [`GridState`] store and
//! the current column list, routes header interactions to the reorder and
//! resize engines, and reports everything the host must react to as a
//! [`GridEvent`].
//!
//! Column lists are snapshots: a swap or resize installs a new `Vec` and
//! never mutates one a listener may still be looking at. Rows are owned by
//! the grid but never modified; edits are reported, not applied.

use serde::Serialize;
use tracing::debug;

use crate::config::GridOptions;
use crate::editor::{CellContext, CellEdit, EditInput};
use crate::error::{GridError, Result};
use crate::interaction::{
    in_resize_handle, swap_columns, ColumnResizer, ColumnSwap, MouseButton, ResizeEvent,
    ResizeTarget,
};
use crate::layout::{default_rows_per_page, RowWindow};
use crate::render::{build_frame, GridFrame};
use crate::state::{GridState, GridStateOptions, SubscriptionId};
use crate::types::{CellValue, ColumnDef, RowRecord};

/// Notifications delivered to [`Grid::on_event`] listeners.
#[derive(Debug)]
pub enum GridEvent<'a, T: ?Sized> {
    /// A cell editor committed a value. Fired once per commit.
    CellValueCommitted(CellEdit<'a, T>),
    /// Two columns were swapped by a drop.
    ColumnOrderChanged {
        from: usize,
        to: usize,
        swap: &'a ColumnSwap,
    },
    ColumnResizeStarted { column: usize },
    ColumnResized { column: usize, width: u32 },
    ColumnResizeEnded { column: usize, width: u32 },
}

/// Label and data-key of a column named in an [`EventRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRef {
    pub label: String,
    pub data_key: String,
}

impl From<&ColumnDef> for ColumnRef {
    fn from(column: &ColumnDef) -> Self {
        Self {
            label: column.label.clone(),
            data_key: column.data_key.clone(),
        }
    }
}

/// Owned, serializable summary of a [`GridEvent`], for hosts that cannot
/// hold borrowed rows (JavaScript callbacks, logs).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EventRecord {
    CellValueCommitted {
        row_index: usize,
        virtual_row_index: usize,
        data_key: String,
        value: CellValue,
    },
    ColumnOrderChanged {
        from: usize,
        to: usize,
        /// The dragged column.
        from_column: ColumnRef,
        /// The column it was dropped on.
        to_column: ColumnRef,
        /// Data-keys in the new column order.
        columns: Vec<String>,
    },
    ColumnResizeStarted {
        column: usize,
    },
    ColumnResized {
        column: usize,
        width: u32,
    },
    ColumnResizeEnded {
        column: usize,
        width: u32,
    },
}

impl<T: ?Sized> GridEvent<'_, T> {
    pub fn record(&self) -> EventRecord {
        match self {
            GridEvent::CellValueCommitted(edit) => EventRecord::CellValueCommitted {
                row_index: edit.row_index,
                virtual_row_index: edit.virtual_row_index,
                data_key: edit.column.data_key.clone(),
                value: edit.value.clone(),
            },
            GridEvent::ColumnOrderChanged { from, to, swap } => EventRecord::ColumnOrderChanged {
                from: *from,
                to: *to,
                from_column: ColumnRef::from(&swap.from),
                to_column: ColumnRef::from(&swap.to),
                columns: swap.columns.iter().map(|c| c.data_key.clone()).collect(),
            },
            GridEvent::ColumnResizeStarted { column } => {
                EventRecord::ColumnResizeStarted { column: *column }
            }
            GridEvent::ColumnResized { column, width } => EventRecord::ColumnResized {
                column: *column,
                width: *width,
            },
            GridEvent::ColumnResizeEnded { column, width } => EventRecord::ColumnResizeEnded {
                column: *column,
                width: *width,
            },
        }
    }
}

type Listener<T> = Box<dyn FnMut(&GridEvent<'_, T>)>;

fn emit<T>(listeners: &mut [Listener<T>], event: &GridEvent<'_, T>) {
    for listener in listeners.iter_mut() {
        listener(event);
    }
}

/// A virtualized grid over rows of type `T`.
pub struct Grid<T> {
    columns: Vec<ColumnDef>,
    rows: Vec<T>,
    options: GridOptions,
    state: GridState,
    resizer: ColumnResizer,
    listeners: Vec<Listener<T>>,
}

impl<T: RowRecord> Grid<T> {
    /// Build a grid.
    ///
    /// Fails with [`GridError::NoColumns`] for an empty column list and
    /// [`GridError::MissingRows`] when no row collection is given at all.
    /// An empty row collection is fine.
    ///
    /// The viewport starts `rows_per_page` rows tall. The first visible
    /// window is computed on the first [`tick`](Self::tick).
    pub fn new(
        columns: Vec<ColumnDef>,
        rows: Option<Vec<T>>,
        options: GridOptions,
    ) -> Result<Self> {
        if columns.is_empty() {
            return Err(GridError::NoColumns);
        }
        let rows = rows.ok_or(GridError::MissingRows)?;
        options.validate()?;

        let mut state = GridState::new(GridStateOptions {
            row_height: options.row_height,
            total_rows: rows.len(),
            extra_rows: options.extra_rows,
            columns: &columns,
        });
        let rows_per_page = options
            .rows_per_page
            .unwrap_or_else(|| default_rows_per_page(rows.len()));
        state.set_viewport_height(rows_per_page as f64 * options.row_height);

        debug!(
            columns = columns.len(),
            rows = rows.len(),
            rows_per_page,
            "grid created"
        );
        Ok(Self {
            columns,
            rows,
            options,
            state,
            resizer: ColumnResizer::new(),
            listeners: Vec::new(),
        })
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn visible_rows(&self) -> RowWindow {
        self.state.visible_rows()
    }

    /// Index of the column bound to `data_key`.
    pub fn column_index(&self, data_key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.data_key == data_key)
    }

    /// Register a host listener.
    pub fn on_event(&mut self, listener: impl FnMut(&GridEvent<'_, T>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn subscribe_visible_rows(
        &mut self,
        f: impl FnMut(&RowWindow) + 'static,
    ) -> SubscriptionId {
        self.state.subscribe_visible_rows(f)
    }

    pub fn subscribe_active_row(
        &mut self,
        f: impl FnMut(&Option<usize>) + 'static,
    ) -> SubscriptionId {
        self.state.subscribe_active_row(f)
    }

    // -------------------------------------------------------------------------
    // Viewport
    // -------------------------------------------------------------------------

    pub fn scroll_to(&mut self, top: f64, left: f64) {
        self.state.set_scroll_position(top, left);
    }

    pub fn set_viewport_height(&mut self, height: f64) -> bool {
        self.state.set_viewport_height(height)
    }

    pub fn set_viewport_width(&mut self, width: f64) -> bool {
        self.state.set_viewport_width(width)
    }

    /// Run deferred work (the next-tick window recompute).
    pub fn tick(&mut self) -> usize {
        self.state.flush()
    }

    /// Register the callback that arranges a [`tick`](Self::tick) once
    /// deferred work is pending.
    pub fn set_waker(&mut self, waker: impl Fn() + 'static) {
        self.state.set_waker(waker);
    }

    pub fn set_active_row(&mut self, row: Option<usize>) -> Result<bool> {
        if let Some(index) = row {
            if index >= self.rows.len() {
                return Err(GridError::RowOutOfRange {
                    index,
                    len: self.rows.len(),
                });
            }
        }
        Ok(self.state.set_active_row(row))
    }

    /// Replace the row collection.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        if self
            .state
            .active_row()
            .is_some_and(|active| active >= self.rows.len())
        {
            self.state.set_active_row(None);
        }
        self.state.set_total_rows(self.rows.len());
    }

    /// Replace the column list.
    pub fn set_columns(&mut self, columns: Vec<ColumnDef>) -> Result<()> {
        if columns.is_empty() {
            return Err(GridError::NoColumns);
        }
        self.state.end_column_drag();
        self.abandon_resize();
        self.columns = columns;
        self.state.set_columns(&self.columns);
        Ok(())
    }

    /// Current render model.
    pub fn frame(&self) -> GridFrame {
        build_frame(
            &self.state,
            &self.columns,
            &self.rows,
            self.options.all_columns_draggable,
        )
    }

    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        self.options.style.css_variables(self.state.row_height())
    }

    fn column(&self, index: usize) -> Result<&ColumnDef> {
        self.columns.get(index).ok_or(GridError::ColumnOutOfRange {
            index,
            len: self.columns.len(),
        })
    }

    // -------------------------------------------------------------------------
    // Reorder
    // -------------------------------------------------------------------------

    /// Press on the header at `index`, `pointer_x` in content coordinates.
    ///
    /// Returns `Ok(false)` when the column cannot be dragged, or when the
    /// press lands on its resize handle.
    pub fn start_column_drag(&mut self, index: usize, pointer_x: f64) -> Result<bool> {
        let column = self.column(index)?;
        let geometry = self.state.geometry();
        if column.resizable {
            let left = geometry.x(index).map_or(0.0, f64::from);
            let width = geometry.width(index).unwrap_or(0);
            if in_resize_handle(pointer_x - left, width) {
                return Ok(false);
            }
        }
        if self.resizer.is_resizing() {
            return Ok(false);
        }
        let all = self.options.all_columns_draggable;
        let column = column.clone();
        Ok(self.state.begin_column_drag(index, &column, all))
    }

    /// The dragged header entered the header at `index`. Returns the drop
    /// target after the move.
    pub fn drag_enter(&mut self, index: usize) -> Result<Option<usize>> {
        let column = self.column(index)?.clone();
        Ok(self.state.enter_column(index, &column))
    }

    /// Drop the dragged header. Swaps the source with the drop target, if
    /// there is one, and emits [`GridEvent::ColumnOrderChanged`].
    pub fn drop_column(&mut self) -> Result<Option<ColumnSwap>> {
        let Some(outcome) = self.state.end_column_drag() else {
            return Ok(None);
        };
        let Some(target) = outcome.target else {
            return Ok(None);
        };
        if self.resizer.is_resizing() {
            self.abandon_resize();
        }
        let swap = swap_columns(&self.columns, outcome.source, target)?;
        self.columns = swap.columns.clone();
        self.state.set_columns(&self.columns);
        debug!(from = outcome.source, to = target, "columns swapped");
        emit(
            &mut self.listeners,
            &GridEvent::ColumnOrderChanged {
                from: outcome.source,
                to: target,
                swap: &swap,
            },
        );
        Ok(Some(swap))
    }

    /// Abandon the drag without reordering.
    pub fn cancel_column_drag(&mut self) -> bool {
        self.state.end_column_drag().is_some()
    }

    // -------------------------------------------------------------------------
    // Resize
    // -------------------------------------------------------------------------

    /// Press on the header at `column`, `pointer_x` in content coordinates.
    /// Returns `Ok(true)` when a resize started. Presses during a column
    /// drag are refused.
    pub fn resize_pointer_down(
        &mut self,
        button: MouseButton,
        column: usize,
        pointer_x: f64,
    ) -> Result<bool> {
        let resizable = self.column(column)?.resizable;
        if self.state.drag().is_dragging() {
            return Ok(false);
        }
        let geometry = self.state.geometry();
        let target = ResizeTarget {
            column,
            left: geometry.x(column).map_or(0.0, f64::from),
            width: geometry.width(column).unwrap_or(0),
            resizable,
        };
        let Some(ResizeEvent::Started { column }) =
            self.resizer.pointer_down(button, target, pointer_x)
        else {
            return Ok(false);
        };
        self.state.begin_resize(column);
        emit(&mut self.listeners, &GridEvent::ColumnResizeStarted { column });
        Ok(true)
    }

    /// Pointer moved while resizing. Returns the new width, if any.
    pub fn resize_pointer_move(&mut self, pointer_x: f64) -> Result<Option<u32>> {
        let Some(ResizeEvent::Resized { column, width }) = self.resizer.pointer_move(pointer_x)
        else {
            return Ok(None);
        };
        self.apply_width(column, width)?;
        emit(&mut self.listeners, &GridEvent::ColumnResized { column, width });
        Ok(Some(width))
    }

    /// Pointer released. Returns the final width when a resize was active.
    pub fn resize_pointer_up(&mut self) -> Result<Option<u32>> {
        let Some(ResizeEvent::Ended { column, width }) = self.resizer.pointer_up() else {
            return Ok(None);
        };
        self.state.end_resize();
        self.apply_width(column, width)?;
        emit(
            &mut self.listeners,
            &GridEvent::ColumnResizeEnded { column, width },
        );
        Ok(Some(width))
    }

    /// Drop any in-flight resize without applying or reporting it.
    fn abandon_resize(&mut self) {
        self.resizer = ColumnResizer::new();
        self.state.end_resize();
    }

    fn apply_width(&mut self, column: usize, width: u32) -> Result<()> {
        if !self.state.set_column_width(column, width)? {
            return Ok(());
        }
        let mut next = self.columns.clone();
        if let Some(def) = next.get_mut(column) {
            def.width = Some(width);
        }
        self.columns = next;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    /// Commit `input` to the cell at (`row_index`, `column_index`) and emit
    /// [`GridEvent::CellValueCommitted`].
    ///
    /// Only rendered rows can be edited.
    pub fn commit_edit(
        &mut self,
        row_index: usize,
        column_index: usize,
        input: EditInput,
    ) -> Result<()> {
        let row = self.rows.get(row_index).ok_or(GridError::RowOutOfRange {
            index: row_index,
            len: self.rows.len(),
        })?;
        let column = self
            .columns
            .get(column_index)
            .ok_or(GridError::ColumnOutOfRange {
                index: column_index,
                len: self.columns.len(),
            })?;
        let window = self.state.visible_rows();
        let virtual_row_index = window
            .virtual_index(row_index)
            .ok_or(GridError::RowNotRendered {
                row_index,
                start: window.start,
                end: window.end,
            })?;
        let edit = CellContext::new(row, column, row_index, virtual_row_index).commit(input)?;
        emit(&mut self.listeners, &GridEvent::CellValueCommitted(edit));
        Ok(())
    }
}

impl<T> std::fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("columns", &self.columns.len())
            .field("rows", &self.rows.len())
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::Frozen;
    use serde_json::{json, Value};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("A", "a").width(100).draggable(),
            ColumnDef::new("B", "b").width(100).draggable().resizable(),
            ColumnDef::new("C", "c").width(100).frozen(Frozen::Right),
        ]
    }

    fn rows(n: usize) -> Vec<Value> {
        (0..n).map(|i| json!({ "a": i, "b": "x", "c": true })).collect()
    }

    #[test]
    fn test_construction_guards() {
        assert!(matches!(
            Grid::new(Vec::new(), Some(rows(1)), GridOptions::default()),
            Err(GridError::NoColumns)
        ));
        assert!(matches!(
            Grid::<Value>::new(columns(), None, GridOptions::default()),
            Err(GridError::MissingRows)
        ));
        let grid = Grid::new(columns(), Some(Vec::<Value>::new()), GridOptions::default()).unwrap();
        assert!(grid.frame().rows.is_empty());
    }

    #[test]
    fn test_initial_viewport_from_rows_per_page() {
        let mut grid = Grid::new(columns(), Some(rows(40)), GridOptions::default()).unwrap();
        assert_eq!(grid.state().viewport_height(), 240.0);
        assert!(grid.visible_rows().is_empty());
        grid.tick();
        assert_eq!(grid.visible_rows(), RowWindow { start: 0, end: 10 });
    }

    #[test]
    fn test_drop_swaps_and_notifies() {
        let mut grid = Grid::new(columns(), Some(rows(3)), GridOptions::default()).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        grid.on_event(move |e| {
            if let GridEvent::ColumnOrderChanged { from, to, swap } = e {
                sink.borrow_mut()
                    .push((*from, *to, swap.from.data_key.clone()));
            }
        });

        assert!(grid.start_column_drag(0, 10.0).unwrap());
        assert_eq!(grid.drag_enter(1).unwrap(), Some(1));
        let swap = grid.drop_column().unwrap().unwrap();
        assert_eq!(swap.to.data_key, "b");

        let keys: Vec<&str> = grid.columns().iter().map(|c| c.data_key.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(*seen.borrow(), vec![(0, 1, "a".to_string())]);
        assert!(!grid.state().drag().is_dragging());
    }

    #[test]
    fn test_event_record_json() {
        let mut grid = Grid::new(columns(), Some(rows(3)), GridOptions::default()).unwrap();
        let records = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&records);
        grid.on_event(move |e| sink.borrow_mut().push(e.record()));
        grid.start_column_drag(1, 120.0).unwrap();
        grid.drag_enter(0).unwrap();
        grid.drop_column().unwrap();

        let json = serde_json::to_value(&records.borrow()[0]).unwrap();
        assert_eq!(
            json,
            json!({
                "type": "columnOrderChanged",
                "from": 1,
                "to": 0,
                "fromColumn": { "label": "B", "dataKey": "b" },
                "toColumn": { "label": "A", "dataKey": "a" },
                "columns": ["b", "a", "c"]
            })
        );
    }

    #[test]
    fn test_press_on_resize_handle_does_not_drag() {
        let mut grid = Grid::new(columns(), Some(rows(3)), GridOptions::default()).unwrap();
        // column 1 spans 100..200, handle starts at 190
        assert!(!grid.start_column_drag(1, 195.0).unwrap());
        assert!(grid.start_column_drag(1, 150.0).unwrap());
    }

    #[test]
    fn test_resize_updates_columns_and_geometry() {
        let mut grid = Grid::new(columns(), Some(rows(3)), GridOptions::default()).unwrap();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        grid.on_event(move |e| {
            let name = match e {
                GridEvent::ColumnResizeStarted { .. } => "started",
                GridEvent::ColumnResized { .. } => "resized",
                GridEvent::ColumnResizeEnded { .. } => "ended",
                _ => "other",
            };
            sink.borrow_mut().push(name);
        });
        let before = grid.columns().to_vec();

        assert!(grid
            .resize_pointer_down(MouseButton::Primary, 1, 198.0)
            .unwrap());
        assert!(grid.state().is_resizing());
        assert_eq!(grid.resize_pointer_move(260.0).unwrap(), Some(160));
        assert_eq!(grid.resize_pointer_up().unwrap(), Some(160));

        assert_eq!(grid.columns()[1].width, Some(160));
        assert_eq!(before[1].width, Some(100));
        assert_eq!(grid.state().geometry().x_positions, vec![0, 100, 260]);
        assert_eq!(*events.borrow(), vec!["started", "resized", "ended"]);
        assert!(!grid.state().is_resizing());
    }

    #[test]
    fn test_commit_edit_requires_rendered_row() {
        let mut grid = Grid::new(columns(), Some(rows(30)), GridOptions::default()).unwrap();
        grid.tick();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        grid.on_event(move |e| {
            if let GridEvent::CellValueCommitted(edit) = e {
                sink.borrow_mut()
                    .push((edit.row_index, edit.virtual_row_index, edit.value.clone()));
            }
        });

        grid.commit_edit(2, 1, EditInput::Text("y".into())).unwrap();
        assert!(matches!(
            grid.commit_edit(25, 1, EditInput::Text("y".into())),
            Err(GridError::RowNotRendered { row_index: 25, .. })
        ));
        assert!(matches!(
            grid.commit_edit(99, 1, EditInput::Text("y".into())),
            Err(GridError::RowOutOfRange { .. })
        ));
        assert_eq!(*seen.borrow(), vec![(2, 2, CellValue::Text("y".into()))]);
    }

    #[test]
    fn test_active_row_bounds() {
        let mut grid = Grid::new(columns(), Some(rows(3)), GridOptions::default()).unwrap();
        assert!(grid.set_active_row(Some(2)).unwrap());
        assert!(grid.set_active_row(Some(3)).is_err());
        grid.set_rows(rows(1));
        assert_eq!(grid.state().active_row(), None);
    }
}
