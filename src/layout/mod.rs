//! Layout engine for grid geometry and viewport windowing.
//!
//! This module handles:
//! - Column widths, x-offsets and sticky offsets for frozen columns
//! - Row offsets from a uniform row height
//! - Mapping scroll position to the rows and columns that must be rendered

pub mod geometry;
mod snapshot;
mod window;

pub use geometry::{
    column_at_x, column_widths, default_rows_per_page, frozen_left_offsets,
    frozen_right_offsets, percent, row_top, rows_in_viewport, total_width, x_positions,
    MAX_DEFAULT_ROWS_PER_PAGE, MIN_COLUMN_WIDTH,
};
pub use snapshot::{GridGeometry, Sticky};
pub use window::{visible_column_window, visible_row_window, ColumnWindow, RowWindow};
