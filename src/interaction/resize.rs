//! Pointer-driven column resizing.
//!
//! `Idle -> Resizing -> Idle`. A primary-button press inside the handle
//! strip at a resizable column's right edge starts a resize; every pointer
//! move to a new x reports a width; release ends it.

use crate::layout::geometry::to_pixels;
use crate::layout::MIN_COLUMN_WIDTH;

/// Width of the resize handle strip at a column's right edge, in pixels.
pub const RESIZE_HANDLE_SIZE: f64 = 8.0;

/// Tolerance added to the inner side of the handle strip.
const RESIZE_HANDLE_SLOP: f64 = 2.0;

/// Mouse button, numbered as in DOM `MouseEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Auxiliary,
    Secondary,
    Other(i16),
}

impl From<i16> for MouseButton {
    fn from(button: i16) -> Self {
        match button {
            0 => MouseButton::Primary,
            1 => MouseButton::Auxiliary,
            2 => MouseButton::Secondary,
            other => MouseButton::Other(other),
        }
    }
}

/// Whether a press `offset_x` pixels from a column's left edge lands on the
/// resize handle of a column `column_width` pixels wide.
pub fn in_resize_handle(offset_x: f64, column_width: u32) -> bool {
    let width = f64::from(column_width);
    offset_x >= width - RESIZE_HANDLE_SIZE - RESIZE_HANDLE_SLOP && offset_x <= width
}

/// The column under the pointer when a resize may start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeTarget {
    pub column: usize,
    /// Left edge of the column, in the pointer's coordinate space.
    pub left: f64,
    pub width: u32,
    pub resizable: bool,
}

/// Lifecycle notifications of a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEvent {
    /// Fired once per `Idle -> Resizing` transition.
    Started { column: usize },
    /// New width after a pointer move.
    Resized { column: usize, width: u32 },
    /// Pointer released; carries the final width.
    Ended { column: usize, width: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Phase {
    #[default]
    Idle,
    Resizing {
        column: usize,
        left: f64,
        last_x: f64,
        width: u32,
    },
}

/// Resize state machine for one grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnResizer {
    phase: Phase,
}

impl ColumnResizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.phase, Phase::Resizing { .. })
    }

    pub fn active_column(&self) -> Option<usize> {
        match self.phase {
            Phase::Resizing { column, .. } => Some(column),
            Phase::Idle => None,
        }
    }

    /// Presses with another button, outside the handle, on a
    /// non-resizable column, or while already resizing pass through.
    pub fn pointer_down(
        &mut self,
        button: MouseButton,
        target: ResizeTarget,
        pointer_x: f64,
    ) -> Option<ResizeEvent> {
        if button != MouseButton::Primary || !target.resizable || self.is_resizing() {
            return None;
        }
        if !in_resize_handle(pointer_x - target.left, target.width) {
            return None;
        }
        self.phase = Phase::Resizing {
            column: target.column,
            left: target.left,
            last_x: pointer_x,
            width: target.width,
        };
        tracing::debug!(column = target.column, "column resize started");
        Some(ResizeEvent::Started {
            column: target.column,
        })
    }

    /// New width is `pointer_x - left`, never below [`MIN_COLUMN_WIDTH`].
    /// A move to the same x as the previous one reports nothing.
    #[allow(clippy::float_cmp)] // pointer positions are reported values, compared exactly
    pub fn pointer_move(&mut self, pointer_x: f64) -> Option<ResizeEvent> {
        let Phase::Resizing {
            column,
            left,
            last_x,
            width,
        } = &mut self.phase
        else {
            return None;
        };
        if *last_x == pointer_x {
            return None;
        }
        *last_x = pointer_x;
        *width = to_pixels(pointer_x - *left).max(MIN_COLUMN_WIDTH);
        Some(ResizeEvent::Resized {
            column: *column,
            width: *width,
        })
    }

    pub fn pointer_up(&mut self) -> Option<ResizeEvent> {
        let Phase::Resizing { column, width, .. } = std::mem::take(&mut self.phase) else {
            return None;
        };
        tracing::debug!(column, width, "column resize ended");
        Some(ResizeEvent::Ended { column, width })
    }
}
