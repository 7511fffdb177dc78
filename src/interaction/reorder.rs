//! Column reordering: the swap operation and the drop-target policy used
//! while a header is being dragged.

use crate::error::{GridError, Result};
use crate::types::ColumnDef;

/// Result of [`swap_columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSwap {
    /// The column that was at `from` (now at `to`).
    pub from: ColumnDef,
    /// The column that was at `to` (now at `from`).
    pub to: ColumnDef,
    /// The new column order.
    pub columns: Vec<ColumnDef>,
}

/// Exchange two column positions, returning a new list. `columns` is left
/// untouched. Swapping an index with itself yields an identical list.
pub fn swap_columns(columns: &[ColumnDef], from: usize, to: usize) -> Result<ColumnSwap> {
    let len = columns.len();
    let from_column = columns
        .get(from)
        .cloned()
        .ok_or(GridError::ColumnOutOfRange { index: from, len })?;
    let to_column = columns
        .get(to)
        .cloned()
        .ok_or(GridError::ColumnOutOfRange { index: to, len })?;

    let mut next = columns.to_vec();
    next.swap(from, to);

    Ok(ColumnSwap {
        from: from_column,
        to: to_column,
        columns: next,
    })
}

/// Whether a column may be picked up. Frozen columns never move, even
/// when every column is made draggable at the grid level.
pub fn can_drag(column: &ColumnDef, all_columns_draggable: bool) -> bool {
    !column.is_frozen() && (column.draggable || all_columns_draggable)
}

/// Source and target of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOutcome {
    pub source: usize,
    pub target: Option<usize>,
}

/// Tracks the dragged header and the single highlighted drop target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragTracker {
    source: Option<usize>,
    drop_target: Option<usize>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin dragging `column` at `index`. Returns `false` (and stays idle)
    /// when the column cannot be dragged.
    pub fn start(&mut self, index: usize, column: &ColumnDef, all_columns_draggable: bool) -> bool {
        if !can_drag(column, all_columns_draggable) {
            return false;
        }
        self.source = Some(index);
        self.drop_target = None;
        true
    }

    /// The pointer entered the header of `column` at `index`.
    ///
    /// A column becomes the drop target only if it is neither frozen nor the
    /// dragged column; entering any other header clears the marker, so at
    /// most one column is marked. Ignored when no drag is active.
    pub fn enter(&mut self, index: usize, column: &ColumnDef) -> Option<usize> {
        let source = self.source?;
        self.drop_target = if index == source || column.is_frozen() {
            None
        } else {
            Some(index)
        };
        self.drop_target
    }

    /// End the drag (drop or cancel). Clears every marker unconditionally.
    pub fn finish(&mut self) -> Option<DragOutcome> {
        let target = self.drop_target.take();
        self.source.take().map(|source| DragOutcome { source, target })
    }

    pub fn source(&self) -> Option<usize> {
        self.source
    }

    pub fn drop_target(&self) -> Option<usize> {
        self.drop_target
    }

    pub fn is_dragging(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_source(&self, index: usize) -> bool {
        self.source == Some(index)
    }

    pub fn is_drop_target(&self, index: usize) -> bool {
        self.drop_target == Some(index)
    }
}
