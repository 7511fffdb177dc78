//! Header interactions: drag-reordering and resizing of columns.

mod reorder;
mod resize;

pub use reorder::{can_drag, swap_columns, ColumnSwap, DragOutcome, DragTracker};
pub use resize::{
    in_resize_handle, ColumnResizer, MouseButton, ResizeEvent, ResizeTarget, RESIZE_HANDLE_SIZE,
};
