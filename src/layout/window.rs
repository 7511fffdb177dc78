//! Viewport windows: which rows and columns intersect the scroll viewport.

use serde::Serialize;

use super::geometry::to_index;

/// Half-open range `[start, end)` of rows to materialize, always within
/// `[0, total_rows]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RowWindow {
    pub start: usize,
    pub end: usize,
}

impl RowWindow {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, row_index: usize) -> bool {
        row_index >= self.start && row_index < self.end
    }

    /// Position of `row_index` inside the window.
    pub fn virtual_index(&self, row_index: usize) -> Option<usize> {
        self.contains(row_index).then(|| row_index - self.start)
    }
}

/// Half-open range of scrolling columns intersecting the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ColumnWindow {
    pub start: usize,
    pub end: usize,
}

impl ColumnWindow {
    pub fn contains(&self, column_index: usize) -> bool {
        column_index >= self.start && column_index < self.end
    }
}

/// Rows intersecting the viewport, padded by `extra_rows` at the bottom.
///
/// `start = max(0, floor(scroll_top / row_height))` and
/// `end = min(total_rows, ceil((scroll_top + viewport_height) / row_height) + extra_rows)`.
/// `start` is also capped at `total_rows` so `start <= end` holds when the
/// scroll offset runs past the content. A row height that is not a positive
/// finite number yields the empty window.
pub fn visible_row_window(
    row_height: f64,
    scroll_top: f64,
    viewport_height: f64,
    total_rows: usize,
    extra_rows: usize,
) -> RowWindow {
    if !row_height.is_finite() || row_height <= 0.0 {
        return RowWindow::default();
    }
    let start = to_index((scroll_top / row_height).floor()).min(total_rows);
    let bottom = to_index(((scroll_top + viewport_height) / row_height).ceil());
    let end = bottom.saturating_add(extra_rows).min(total_rows).max(start);
    RowWindow { start, end }
}

/// Columns whose horizontal extent intersects
/// `[scroll_left, scroll_left + viewport_width)`.
///
/// A viewport width of zero means the host has not measured the grid yet;
/// every column is reported visible in that case. Scrolled past
/// `total_width`, the window is empty.
pub fn visible_column_window(
    x_positions: &[u32],
    total_width: u32,
    scroll_left: f64,
    viewport_width: f64,
) -> ColumnWindow {
    let count = x_positions.len();
    if viewport_width.is_nan() || viewport_width <= 0.0 {
        return ColumnWindow {
            start: 0,
            end: count,
        };
    }
    let left = scroll_left.max(0.0);
    if left >= f64::from(total_width) {
        return ColumnWindow {
            start: count,
            end: count,
        };
    }
    let right = left + viewport_width;
    let end = x_positions.partition_point(|&x| f64::from(x) < right);
    let start = x_positions
        .partition_point(|&x| f64::from(x) <= left)
        .saturating_sub(1)
        .min(end);
    ColumnWindow { start, end }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::layout::geometry::x_positions;

    #[test]
    fn test_window_with_extra_rows() {
        let w = visible_row_window(20.0, 40.0, 100.0, 100, 10);
        assert_eq!(w, RowWindow { start: 2, end: 17 });
    }

    #[test]
    fn test_window_at_top_without_extra_rows() {
        let w = visible_row_window(20.0, 0.0, 100.0, 100, 0);
        assert_eq!(w, RowWindow { start: 0, end: 5 });
    }

    #[test]
    fn test_negative_scroll_clamps_start() {
        let w = visible_row_window(20.0, -100.0, 100.0, 100, 0);
        assert_eq!(w.start, 0);
        assert!(w.start <= w.end);
    }

    #[test]
    fn test_end_never_exceeds_total() {
        assert_eq!(visible_row_window(20.0, 0.0, 1000.0, 5, 0).end, 5);
        assert_eq!(visible_row_window(20.0, 0.0, 100.0, 5, 50).end, 5);
    }

    #[test]
    fn test_scroll_past_content() {
        let w = visible_row_window(20.0, 10_000.0, 100.0, 5, 0);
        assert_eq!(w, RowWindow { start: 5, end: 5 });
        assert!(w.is_empty());
    }

    #[test]
    fn test_invalid_row_height_is_empty() {
        assert!(visible_row_window(0.0, 0.0, 100.0, 10, 0).is_empty());
        assert!(visible_row_window(f64::NAN, 0.0, 100.0, 10, 0).is_empty());
    }

    #[test]
    fn test_virtual_index() {
        let w = RowWindow { start: 8, end: 12 };
        assert_eq!(w.virtual_index(8), Some(0));
        assert_eq!(w.virtual_index(11), Some(3));
        assert_eq!(w.virtual_index(12), None);
        assert_eq!(w.len(), 4);
    }

    #[test]
    fn test_column_window() {
        let xs = x_positions(&[100, 100, 100, 100, 100]);
        assert_eq!(
            visible_column_window(&xs, 500, 0.0, 250.0),
            ColumnWindow { start: 0, end: 3 }
        );
        assert_eq!(
            visible_column_window(&xs, 500, 150.0, 100.0),
            ColumnWindow { start: 1, end: 3 }
        );
        assert_eq!(
            visible_column_window(&xs, 500, 200.0, 100.0),
            ColumnWindow { start: 2, end: 3 }
        );
    }

    #[test]
    fn test_scrolled_past_content_is_empty() {
        let xs = x_positions(&[100, 100, 100]);
        assert_eq!(
            visible_column_window(&xs, 300, 1000.0, 200.0),
            ColumnWindow { start: 3, end: 3 }
        );
        assert_eq!(
            visible_column_window(&xs, 300, 299.0, 200.0),
            ColumnWindow { start: 2, end: 3 }
        );
    }

    #[test]
    fn test_unmeasured_width_shows_all_columns() {
        let xs = x_positions(&[100, 100, 100]);
        assert_eq!(
            visible_column_window(&xs, 300, 0.0, 0.0),
            ColumnWindow { start: 0, end: 3 }
        );
    }
}
