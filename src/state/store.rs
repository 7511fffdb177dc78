//! The grid-state store.
//!
//! One `GridState` exists per grid. It owns the observable inputs (scroll
//! position, viewport size, row height, column geometry, row count) and
//! re-derives the visible windows whenever one of them changes. Setters are
//! no-ops when handed the current value.

use tracing::{debug, warn};

use super::observable::{Observable, SubscriptionId};
use super::scheduler::TickQueue;
use crate::error::Result;
use crate::interaction::{DragOutcome, DragTracker};
use crate::layout::{
    rows_in_viewport, visible_column_window, visible_row_window, ColumnWindow, GridGeometry,
    RowWindow,
};
use crate::types::ColumnDef;

/// Stacking value of ordinary cells.
pub const BASE_Z_INDEX: u32 = 1;

/// Stacking value of frozen cells, which paint above scrolling ones.
pub const FROZEN_Z_INDEX: u32 = 2;

/// Inputs needed to build a [`GridState`].
#[derive(Debug, Clone, Copy)]
pub struct GridStateOptions<'a> {
    pub row_height: f64,
    pub total_rows: usize,
    pub extra_rows: usize,
    pub columns: &'a [ColumnDef],
}

/// Work deferred to the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StateTask {
    RecomputeVisibleRows,
}

/// Observable state of one grid.
pub struct GridState {
    row_height: Observable<f64>,
    scroll_top: Observable<f64>,
    scroll_left: Observable<f64>,
    total_rows: Observable<usize>,
    viewport_height: Observable<f64>,
    viewport_width: Observable<f64>,
    rows_in_viewport: usize,
    extra_rows: usize,

    geometry: Observable<GridGeometry>,
    visible_rows: Observable<RowWindow>,
    visible_columns: Observable<ColumnWindow>,

    active_row: Observable<Option<usize>>,
    drag: DragTracker,
    resizing: Option<usize>,

    tasks: TickQueue<StateTask>,
}

impl GridState {
    /// Build the store. The first visible-row window is computed on the
    /// first [`flush`](Self::flush), giving the host a chance to report the
    /// real viewport height; until then the window is empty.
    pub fn new(options: GridStateOptions<'_>) -> Self {
        let geometry = GridGeometry::new(options.columns, options.row_height);
        let visible_columns =
            visible_column_window(&geometry.x_positions, geometry.total_width, 0.0, 0.0);
        let mut state = Self {
            row_height: Observable::new(options.row_height),
            scroll_top: Observable::new(0.0),
            scroll_left: Observable::new(0.0),
            total_rows: Observable::new(options.total_rows),
            viewport_height: Observable::new(0.0),
            viewport_width: Observable::new(0.0),
            rows_in_viewport: 0,
            extra_rows: options.extra_rows,
            geometry: Observable::new(geometry),
            visible_rows: Observable::new(RowWindow::default()),
            visible_columns: Observable::new(visible_columns),
            active_row: Observable::new(None),
            drag: DragTracker::new(),
            resizing: None,
            tasks: TickQueue::new(),
        };
        state.tasks.schedule(StateTask::RecomputeVisibleRows);
        state
    }

    // -------------------------------------------------------------------------
    // Deferred work
    // -------------------------------------------------------------------------

    /// Register the callback invoked when deferred work becomes pending.
    /// Work already pending at registration time wakes immediately.
    pub fn set_waker(&mut self, waker: impl Fn() + 'static) {
        let pending = !self.tasks.is_empty();
        if pending {
            waker();
        }
        self.tasks.set_waker(waker);
    }

    pub fn has_pending_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Run deferred work. Returns the number of tasks run.
    pub fn flush(&mut self) -> usize {
        let tasks = self.tasks.drain();
        let count = tasks.len();
        for task in tasks {
            match task {
                StateTask::RecomputeVisibleRows => self.update_visible_rows(),
            }
        }
        count
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    /// Record a scroll event. Each axis is stored only if it changed; the
    /// visible-row window is then recomputed immediately from the stored
    /// position. Non-finite offsets are logged and ignored.
    pub fn set_scroll_position(&mut self, top: f64, left: f64) {
        if !top.is_finite() || !left.is_finite() {
            warn!(top, left, "ignoring invalid scroll position");
            return;
        }
        self.scroll_top.set(top);
        let left_changed = self.scroll_left.set(left);
        self.update_visible_rows();
        if left_changed {
            self.update_visible_columns();
        }
    }

    /// Record the measured viewport height. The window recompute is
    /// deferred to the next tick so it reads post-layout measurements.
    ///
    /// Invalid measurements (negative, NaN, infinite) are logged and
    /// ignored. Returns `true` if the height changed.
    pub fn set_viewport_height(&mut self, height: f64) -> bool {
        if !height.is_finite() || height < 0.0 {
            warn!(height, "ignoring invalid viewport height");
            return false;
        }
        if !self.viewport_height.set(height) {
            return false;
        }
        self.rows_in_viewport = rows_in_viewport(height, *self.row_height.get());
        self.tasks.schedule(StateTask::RecomputeVisibleRows);
        true
    }

    /// Record the measured viewport width. A width of 0 marks every column
    /// visible.
    pub fn set_viewport_width(&mut self, width: f64) -> bool {
        if !width.is_finite() || width < 0.0 {
            warn!(width, "ignoring invalid viewport width");
            return false;
        }
        if !self.viewport_width.set(width) {
            return false;
        }
        self.update_visible_columns();
        true
    }

    /// Replace the column geometry. Scroll position and the row window are
    /// left alone.
    pub fn set_columns(&mut self, columns: &[ColumnDef]) -> bool {
        let geometry = GridGeometry::new(columns, *self.row_height.get());
        let changed = self.geometry.set(geometry);
        if changed {
            debug!(columns = columns.len(), "column geometry replaced");
            self.update_visible_columns();
        }
        changed
    }

    /// Change a single column width, re-deriving only the offsets that
    /// depend on it.
    pub fn set_column_width(&mut self, column: usize, width: u32) -> Result<bool> {
        let mut outcome = Ok(false);
        self.geometry.mutate(|geometry| {
            outcome = geometry.set_width(column, width);
            matches!(outcome, Ok(true))
        });
        if matches!(outcome, Ok(true)) {
            self.update_visible_columns();
        }
        outcome
    }

    /// Change the row height, which remaps every row to new pixels.
    pub fn set_row_height(&mut self, height: f64) -> bool {
        if !height.is_finite() || height <= 0.0 {
            warn!(height, "ignoring invalid row height");
            return false;
        }
        if !self.row_height.set(height) {
            return false;
        }
        self.geometry.mutate(|geometry| {
            geometry.row_height = height;
            true
        });
        self.rows_in_viewport = rows_in_viewport(*self.viewport_height.get(), height);
        self.update_visible_rows();
        true
    }

    pub fn set_total_rows(&mut self, total_rows: usize) -> bool {
        if !self.total_rows.set(total_rows) {
            return false;
        }
        self.update_visible_rows();
        true
    }

    pub fn set_active_row(&mut self, row: Option<usize>) -> bool {
        self.active_row.set(row)
    }

    // -------------------------------------------------------------------------
    // Derived values
    // -------------------------------------------------------------------------

    fn update_visible_rows(&mut self) {
        let window = visible_row_window(
            *self.row_height.get(),
            *self.scroll_top.get(),
            *self.viewport_height.get(),
            *self.total_rows.get(),
            self.extra_rows,
        );
        if self.visible_rows.set(window) {
            debug!(start = window.start, end = window.end, "visible rows changed");
        }
    }

    fn update_visible_columns(&mut self) {
        let geometry = self.geometry.get();
        let window = visible_column_window(
            &geometry.x_positions,
            geometry.total_width,
            *self.scroll_left.get(),
            *self.viewport_width.get(),
        );
        self.visible_columns.set(window);
    }

    pub fn visible_rows(&self) -> RowWindow {
        *self.visible_rows.get()
    }

    pub fn visible_columns(&self) -> ColumnWindow {
        *self.visible_columns.get()
    }

    pub fn geometry(&self) -> &GridGeometry {
        self.geometry.get()
    }

    /// Stacking value for cells of `column`.
    pub fn cell_z_index(&self, column: usize) -> u32 {
        if self.geometry.get().is_frozen(column) {
            FROZEN_Z_INDEX
        } else {
            BASE_Z_INDEX
        }
    }

    pub fn row_top(&self, row_index: usize) -> f64 {
        self.geometry.get().row_top(row_index)
    }

    pub fn row_height(&self) -> f64 {
        *self.row_height.get()
    }

    pub fn scroll_top(&self) -> f64 {
        *self.scroll_top.get()
    }

    pub fn scroll_left(&self) -> f64 {
        *self.scroll_left.get()
    }

    pub fn viewport_height(&self) -> f64 {
        *self.viewport_height.get()
    }

    pub fn viewport_width(&self) -> f64 {
        *self.viewport_width.get()
    }

    pub fn total_rows(&self) -> usize {
        *self.total_rows.get()
    }

    pub fn extra_rows(&self) -> usize {
        self.extra_rows
    }

    /// Rows needed to cover the viewport, `ceil(viewport_height / row_height)`.
    pub fn rows_in_viewport(&self) -> usize {
        self.rows_in_viewport
    }

    pub fn active_row(&self) -> Option<usize> {
        *self.active_row.get()
    }

    // -------------------------------------------------------------------------
    // Subscriptions
    // -------------------------------------------------------------------------

    pub fn subscribe_visible_rows(&mut self, f: impl FnMut(&RowWindow) + 'static) -> SubscriptionId {
        self.visible_rows.subscribe(f)
    }

    pub fn unsubscribe_visible_rows(&mut self, id: SubscriptionId) -> bool {
        self.visible_rows.unsubscribe(id)
    }

    pub fn subscribe_visible_columns(
        &mut self,
        f: impl FnMut(&ColumnWindow) + 'static,
    ) -> SubscriptionId {
        self.visible_columns.subscribe(f)
    }

    pub fn subscribe_geometry(&mut self, f: impl FnMut(&GridGeometry) + 'static) -> SubscriptionId {
        self.geometry.subscribe(f)
    }

    pub fn unsubscribe_geometry(&mut self, id: SubscriptionId) -> bool {
        self.geometry.unsubscribe(id)
    }

    pub fn subscribe_active_row(
        &mut self,
        f: impl FnMut(&Option<usize>) + 'static,
    ) -> SubscriptionId {
        self.active_row.subscribe(f)
    }

    pub fn subscribe_scroll_top(&mut self, f: impl FnMut(&f64) + 'static) -> SubscriptionId {
        self.scroll_top.subscribe(f)
    }

    pub fn subscribe_scroll_left(&mut self, f: impl FnMut(&f64) + 'static) -> SubscriptionId {
        self.scroll_left.subscribe(f)
    }

    // -------------------------------------------------------------------------
    // Transient interaction state
    // -------------------------------------------------------------------------

    /// Start dragging the header at `index`. Returns `false` for frozen or
    /// non-draggable columns.
    pub fn begin_column_drag(
        &mut self,
        index: usize,
        column: &ColumnDef,
        all_columns_draggable: bool,
    ) -> bool {
        let started = self.drag.start(index, column, all_columns_draggable);
        if started {
            debug!(column = index, "column drag started");
        }
        started
    }

    /// The dragged header entered the header at `index`; returns the
    /// resulting drop target.
    pub fn enter_column(&mut self, index: usize, column: &ColumnDef) -> Option<usize> {
        self.drag.enter(index, column)
    }

    /// End the drag, clearing source and drop target.
    pub fn end_column_drag(&mut self) -> Option<DragOutcome> {
        let outcome = self.drag.finish();
        if let Some(o) = outcome {
            debug!(source = o.source, drop_target = ?o.target, "column drag ended");
        }
        outcome
    }

    pub fn drag(&self) -> &DragTracker {
        &self.drag
    }

    pub fn begin_resize(&mut self, column: usize) {
        self.resizing = Some(column);
    }

    pub fn end_resize(&mut self) -> Option<usize> {
        self.resizing.take()
    }

    pub fn resizing_column(&self) -> Option<usize> {
        self.resizing
    }

    pub fn is_resizing(&self) -> bool {
        self.resizing.is_some()
    }
}

impl std::fmt::Debug for GridState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridState")
            .field("row_height", self.row_height.get())
            .field("scroll_top", self.scroll_top.get())
            .field("scroll_left", self.scroll_left.get())
            .field("total_rows", self.total_rows.get())
            .field("viewport_height", self.viewport_height.get())
            .field("visible_rows", self.visible_rows.get())
            .field("active_row", self.active_row.get())
            .field("drag", &self.drag)
            .field("resizing", &self.resizing)
            .field("pending_tasks", &self.tasks.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;
    use crate::types::Frozen;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("Id", "id").width(50).frozen(Frozen::Left),
            ColumnDef::new("Name", "name").width(120),
            ColumnDef::new("Age", "age").width(80),
        ]
    }

    fn state(total_rows: usize, extra_rows: usize) -> GridState {
        let columns = columns();
        GridState::new(GridStateOptions {
            row_height: 20.0,
            total_rows,
            extra_rows,
            columns: &columns,
        })
    }

    #[test]
    fn test_first_window_is_deferred() {
        let mut s = state(100, 0);
        s.set_viewport_height(100.0);
        assert_eq!(s.visible_rows(), RowWindow::default());
        assert!(s.has_pending_tasks());

        assert_eq!(s.flush(), 1);
        assert_eq!(s.visible_rows(), RowWindow { start: 0, end: 5 });
        assert!(!s.has_pending_tasks());
    }

    #[test]
    fn test_scroll_recomputes_synchronously() {
        let mut s = state(100, 10);
        s.set_viewport_height(100.0);
        s.flush();
        s.set_scroll_position(40.0, 0.0);
        assert_eq!(s.visible_rows(), RowWindow { start: 2, end: 17 });
    }

    #[test]
    fn test_viewport_height_noop_when_unchanged() {
        let mut s = state(100, 0);
        assert!(s.set_viewport_height(100.0));
        s.flush();
        assert!(!s.set_viewport_height(100.0));
        assert!(!s.has_pending_tasks());
        assert_eq!(s.rows_in_viewport(), 5);
    }

    #[test]
    fn test_invalid_viewport_height_is_ignored() {
        let mut s = state(100, 0);
        s.flush();
        assert!(!s.set_viewport_height(f64::NAN));
        assert!(!s.set_viewport_height(-10.0));
        assert_eq!(s.viewport_height(), 0.0);
    }

    #[test]
    fn test_non_finite_scroll_is_ignored() {
        let mut s = state(100, 0);
        s.set_viewport_height(100.0);
        s.flush();
        s.set_scroll_position(40.0, 0.0);

        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        s.subscribe_scroll_top(move |_| *counter.borrow_mut() += 1);
        s.set_scroll_position(f64::NAN, 0.0);
        s.set_scroll_position(f64::NAN, 0.0);
        s.set_scroll_position(0.0, f64::INFINITY);
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(s.scroll_top(), 40.0);
        assert_eq!(s.visible_rows(), RowWindow { start: 2, end: 7 });
    }

    #[test]
    fn test_row_height_change_remaps_rows() {
        let mut s = state(100, 0);
        s.set_viewport_height(100.0);
        s.flush();
        assert!(s.set_row_height(50.0));
        assert_eq!(s.visible_rows(), RowWindow { start: 0, end: 2 });
        assert_eq!(s.rows_in_viewport(), 2);
        assert_eq!(s.row_top(3), 150.0);
        assert_eq!(s.geometry().row_height, 50.0);
    }

    #[test]
    fn test_z_index() {
        let s = state(10, 0);
        assert_eq!(s.cell_z_index(0), FROZEN_Z_INDEX);
        assert_eq!(s.cell_z_index(1), BASE_Z_INDEX);
    }

    #[test]
    fn test_set_columns_keeps_scroll_and_window() {
        let mut s = state(100, 0);
        s.set_viewport_height(100.0);
        s.flush();
        s.set_scroll_position(200.0, 30.0);
        let window = s.visible_rows();

        let mut cols = columns();
        cols[1].width = Some(300);
        assert!(s.set_columns(&cols));
        assert_eq!(s.visible_rows(), window);
        assert_eq!(s.scroll_top(), 200.0);
        assert_eq!(s.geometry().x_positions, vec![0, 50, 350]);
        assert!(!s.set_columns(&cols));
    }

    #[test]
    fn test_geometry_subscribers_see_width_changes_once() {
        let mut s = state(10, 0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        s.subscribe_geometry(move |g| sink.borrow_mut().push(g.total_width));

        assert!(s.set_column_width(1, 100).unwrap());
        assert!(!s.set_column_width(1, 100).unwrap());
        assert!(s.set_column_width(9, 100).is_err());
        assert_eq!(*seen.borrow(), vec![230]);
    }

    #[test]
    fn test_waker_called_for_pending_work() {
        let wakes = Rc::new(RefCell::new(0));
        let mut s = state(10, 0);
        let w = Rc::clone(&wakes);
        s.set_waker(move || *w.borrow_mut() += 1);
        assert_eq!(*wakes.borrow(), 1);

        s.flush();
        s.set_viewport_height(40.0);
        assert_eq!(*wakes.borrow(), 2);
    }
}
