//! Pure geometry functions.
//!
//! Everything here is a function of its arguments only, so the store can
//! re-run any of them on every state change. Empty column lists produce
//! empty arrays; rejecting a grid without columns happens at the grid
//! boundary, not here.

use crate::types::{ColumnDef, Frozen};

/// Width used for columns without a configured width, and the lower bound
/// applied while resizing.
pub const MIN_COLUMN_WIDTH: u32 = 30;

/// Upper bound for the number of rows shown when the host gives no
/// explicit page size.
pub const MAX_DEFAULT_ROWS_PER_PAGE: usize = 10;

/// Pixel width of every column. Absent or zero widths use [`MIN_COLUMN_WIDTH`].
pub fn column_widths(columns: &[ColumnDef]) -> Vec<u32> {
    columns.iter().map(configured_width).collect()
}

/// Width of a single column definition.
pub fn configured_width(column: &ColumnDef) -> u32 {
    match column.width {
        Some(w) if w > 0 => w,
        _ => MIN_COLUMN_WIDTH,
    }
}

/// Left edge of each column: `x[0] = 0`, `x[i] = x[i-1] + widths[i-1]`.
pub fn x_positions(widths: &[u32]) -> Vec<u32> {
    let mut positions = Vec::with_capacity(widths.len());
    let mut x: u32 = 0;
    for w in widths {
        positions.push(x);
        x = x.saturating_add(*w);
    }
    positions
}

/// Total content width.
pub fn total_width(widths: &[u32]) -> u32 {
    widths.iter().fold(0u32, |acc, w| acc.saturating_add(*w))
}

/// Sticky offset from the left edge for each `frozen: left` column;
/// other columns get 0.
pub fn frozen_left_offsets(columns: &[ColumnDef], widths: &[u32]) -> Vec<u32> {
    let sides: Vec<Option<Frozen>> = columns.iter().map(|c| c.frozen).collect();
    sticky_offsets(&sides, widths, Frozen::Left)
}

/// Sticky offset from the right edge for each `frozen: right` column,
/// accumulated right-to-left; other columns get 0.
pub fn frozen_right_offsets(columns: &[ColumnDef], widths: &[u32]) -> Vec<u32> {
    let sides: Vec<Option<Frozen>> = columns.iter().map(|c| c.frozen).collect();
    sticky_offsets(&sides, widths, Frozen::Right)
}

/// Running sum of the widths of the columns pinned to `side`, walking away
/// from that edge. The result always has `sides.len()` entries.
pub(crate) fn sticky_offsets(sides: &[Option<Frozen>], widths: &[u32], side: Frozen) -> Vec<u32> {
    let mut offsets = vec![0; sides.len()];
    let mut running: u32 = 0;
    let mut place = |(i, (slot, pinned)): (usize, (&mut u32, &Option<Frozen>))| {
        if *pinned == Some(side) {
            *slot = running;
            running = running.saturating_add(widths.get(i).copied().unwrap_or(MIN_COLUMN_WIDTH));
        }
    };
    let entries = offsets.iter_mut().zip(sides).enumerate();
    match side {
        Frozen::Left => entries.for_each(&mut place),
        Frozen::Right => entries.rev().for_each(&mut place),
    }
    offsets
}

/// Top edge of a row.
pub fn row_top(row_index: usize, row_height: f64) -> f64 {
    row_index as f64 * row_height
}

/// `round(actual / total * 100)`. The caller guards `total == 0`.
pub fn percent(actual: f64, total: f64) -> f64 {
    (actual / total * 100.0).round()
}

/// Number of rows needed to cover the viewport, `ceil(height / row_height)`.
pub fn rows_in_viewport(viewport_height: f64, row_height: f64) -> usize {
    if !row_height.is_finite() || row_height <= 0.0 {
        return 0;
    }
    to_index((viewport_height / row_height).ceil())
}

/// Rows shown per page when the host does not choose a page size.
pub fn default_rows_per_page(row_count: usize) -> usize {
    row_count.min(MAX_DEFAULT_ROWS_PER_PAGE)
}

/// Column containing content coordinate `x`, or `None` outside the content.
pub fn column_at_x(x_positions: &[u32], widths: &[u32], x: f64) -> Option<usize> {
    if x.is_nan() || x < 0.0 || x >= f64::from(total_width(widths)) {
        return None;
    }
    x_positions
        .partition_point(|&left| f64::from(left) <= x)
        .checked_sub(1)
}

/// Convert a non-negative float to an index, clamping negatives and NaN to 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn to_index(value: f64) -> usize {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        // `as` saturates at usize::MAX
        value as usize
    }
}

/// Convert a pixel measurement to whole pixels, clamping at the `u32` range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn to_pixels(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.round() as u32
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
    use test_case::test_case;

    fn col(width: Option<u32>) -> ColumnDef {
        let mut c = ColumnDef::new("c", "c");
        c.width = width;
        c
    }

    #[test]
    fn test_widths_fall_back_to_minimum() {
        let columns = vec![col(Some(100)), col(Some(200)), col(Some(150)), col(None)];
        assert_eq!(column_widths(&columns), vec![100, 200, 150, MIN_COLUMN_WIDTH]);
    }

    #[test]
    fn test_zero_width_is_minimum() {
        assert_eq!(column_widths(&[col(Some(0))]), vec![MIN_COLUMN_WIDTH]);
    }

    #[test]
    fn test_x_positions_are_prefix_sums() {
        let widths = [100, 200, 150, 100];
        let xs = x_positions(&widths);
        assert_eq!(xs, vec![0, 100, 300, 450]);
        assert_eq!(xs.len(), widths.len());
    }

    #[test]
    fn test_total_width() {
        assert_eq!(total_width(&[100, 200, 150, 100]), 550);
        assert_eq!(total_width(&[]), 0);
    }

    #[test]
    fn test_empty_columns_give_empty_arrays() {
        assert!(column_widths(&[]).is_empty());
        assert!(x_positions(&[]).is_empty());
        assert!(frozen_left_offsets(&[], &[]).is_empty());
        assert!(frozen_right_offsets(&[], &[]).is_empty());
    }

    #[test]
    fn test_frozen_offsets_accumulate_from_each_edge() {
        let columns = vec![
            col(Some(50)).frozen(Frozen::Left),
            col(Some(60)).frozen(Frozen::Left),
            col(Some(100)),
            col(Some(70)).frozen(Frozen::Right),
            col(Some(80)).frozen(Frozen::Right),
        ];
        let widths = column_widths(&columns);
        assert_eq!(frozen_left_offsets(&columns, &widths), vec![0, 50, 0, 0, 0]);
        assert_eq!(frozen_right_offsets(&columns, &widths), vec![0, 0, 0, 80, 0]);
    }

    #[test]
    fn test_row_top() {
        assert_eq!(row_top(5, 20.0), 100.0);
        assert_eq!(row_top(0, 20.0), 0.0);
    }

    #[test_case(23.0, 110.0 => 21.0 ; "twenty three of one hundred ten")]
    #[test_case(0.0, 100.0 => 0.0 ; "none")]
    #[test_case(100.0, 100.0 => 100.0 ; "all")]
    #[test_case(50.0, 100.0 => 50.0 ; "half")]
    fn test_percent(actual: f64, total: f64) -> f64 {
        percent(actual, total)
    }

    #[test_case(100.0, 20.0 => 5 ; "exact fit")]
    #[test_case(101.0, 20.0 => 6 ; "partial row counts")]
    #[test_case(0.0, 20.0 => 0 ; "unmeasured viewport")]
    #[test_case(100.0, 0.0 => 0 ; "zero row height")]
    fn test_rows_in_viewport(height: f64, row_height: f64) -> usize {
        rows_in_viewport(height, row_height)
    }

    #[test]
    fn test_default_rows_per_page() {
        assert_eq!(default_rows_per_page(5), 5);
        assert_eq!(
            default_rows_per_page(MAX_DEFAULT_ROWS_PER_PAGE),
            MAX_DEFAULT_ROWS_PER_PAGE
        );
        assert_eq!(
            default_rows_per_page(MAX_DEFAULT_ROWS_PER_PAGE + 1),
            MAX_DEFAULT_ROWS_PER_PAGE
        );
    }

    #[test]
    fn test_column_at_x() {
        let widths = [100, 200, 150];
        let xs = x_positions(&widths);
        assert_eq!(column_at_x(&xs, &widths, 0.0), Some(0));
        assert_eq!(column_at_x(&xs, &widths, 99.5), Some(0));
        assert_eq!(column_at_x(&xs, &widths, 100.0), Some(1));
        assert_eq!(column_at_x(&xs, &widths, 449.0), Some(2));
        assert_eq!(column_at_x(&xs, &widths, 450.0), None);
        assert_eq!(column_at_x(&xs, &widths, -1.0), None);
        assert_eq!(column_at_x(&[], &[], 0.0), None);
    }

    #[test]
    fn test_to_index_clamps() {
        assert_eq!(to_index(-3.0), 0);
        assert_eq!(to_index(f64::NAN), 0);
        assert_eq!(to_index(7.9), 7);
    }
}
