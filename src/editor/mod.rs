//! Cell edit protocol.
//!
//! Every data cell is addressed by a [`CellContext`]: the row, the column
//! and the row's absolute and window-relative indices. A context renders to a
//! [`CellView`] according to the column's [`CellKind`](crate::types::CellKind)
//! and turns widget input into exactly one [`CellEdit`] per commit.
//!
//! Rows are never mutated here; the host owns its data and decides what to
//! do with the committed value.

mod cell;
mod edit;

pub use cell::{
    cell_dom_id, CellContext, CellInfo, CellView, CustomCell, HeaderRenderer, OptionView,
};
pub use edit::{CellEdit, EditInput};
