//! Render model.
//!
//! The grid does not draw anything itself. It produces a [`GridFrame`]: the
//! header row plus the rows of the visible window, each cell positioned
//! and carrying its [`CellView`](crate::editor::CellView). Hosts map the
//! frame onto DOM nodes, a canvas, or JSON.

mod frame;

pub use frame::{build_frame, rendered_columns, CellSlot, GridFrame, HeaderView, RowView};
