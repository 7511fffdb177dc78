//! Geometry and windowing tests
//!
//! Offsets, row windows, percentages and the incremental width update.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::pet_columns;
use datagrid::layout::{
    column_at_x, column_widths, frozen_left_offsets, frozen_right_offsets, percent, row_top,
    total_width, visible_column_window, visible_row_window, x_positions, GridGeometry, RowWindow,
    MIN_COLUMN_WIDTH,
};
use datagrid::{ColumnDef, Frozen};
use test_case::test_case;

#[test_case(&[] ; "empty")]
#[test_case(&[100] ; "single")]
#[test_case(&[30, 45, 60, 75] ; "several")]
#[test_case(&[1, 1, 1, 1, 1, 1, 1] ; "uniform")]
fn x_positions_are_prefix_sums(widths: &[u32]) {
    let xs = x_positions(widths);
    assert_eq!(xs.len(), widths.len());
    for (i, x) in xs.iter().enumerate() {
        assert_eq!(*x, widths[..i].iter().sum::<u32>());
    }
    if let Some(first) = xs.first() {
        assert_eq!(*first, 0);
    }
}

#[test_case(40.0, 100.0, 100, 10 => RowWindow { start: 2, end: 17 } ; "scrolled with extra rows")]
#[test_case(0.0, 100.0, 100, 0 => RowWindow { start: 0, end: 5 } ; "top of grid")]
#[test_case(-50.0, 100.0, 100, 0 => RowWindow { start: 0, end: 3 } ; "negative scroll")]
#[test_case(0.0, 1000.0, 5, 0 => RowWindow { start: 0, end: 5 } ; "viewport taller than content")]
#[test_case(5000.0, 100.0, 100, 10 => RowWindow { start: 100, end: 100 } ; "scrolled past the end")]
fn row_window_table(scroll_top: f64, viewport: f64, total: usize, extra: usize) -> RowWindow {
    visible_row_window(20.0, scroll_top, viewport, total, extra)
}

#[test]
fn row_window_stays_within_bounds() {
    for scroll in [-100.0, 0.0, 13.0, 250.0, 1999.0, 2000.0, 9000.0] {
        for viewport in [0.0, 20.0, 333.0, 5000.0] {
            let w = visible_row_window(20.0, scroll, viewport, 100, 7);
            assert!(w.start <= w.end, "{w:?}");
            assert!(w.end <= 100, "{w:?}");
        }
    }
}

#[test]
fn invalid_row_height_gives_empty_window() {
    assert!(visible_row_window(0.0, 0.0, 100.0, 10, 0).is_empty());
    assert!(visible_row_window(f64::NAN, 0.0, 100.0, 10, 0).is_empty());
}

#[test]
fn row_top_multiplies() {
    assert_eq!(row_top(5, 20.0), 100.0);
    assert_eq!(row_top(0, 24.0), 0.0);
}

#[test_case(23.0, 110.0 => 21.0)]
#[test_case(0.0, 100.0 => 0.0)]
#[test_case(100.0, 100.0 => 100.0)]
#[test_case(50.0, 100.0 => 50.0)]
fn percent_table(actual: f64, total: f64) -> f64 {
    percent(actual, total)
}

#[test]
fn missing_widths_fall_back_to_minimum() {
    let columns = vec![
        ColumnDef::new("A", "a"),
        ColumnDef::new("B", "b").width(0),
        ColumnDef::new("C", "c").width(80),
    ];
    assert_eq!(
        column_widths(&columns),
        vec![MIN_COLUMN_WIDTH, MIN_COLUMN_WIDTH, 80]
    );
}

#[test]
fn frozen_offsets_accumulate_from_their_edge() {
    let columns = vec![
        ColumnDef::new("A", "a").width(40).frozen(Frozen::Left),
        ColumnDef::new("B", "b").width(60).frozen(Frozen::Left),
        ColumnDef::new("C", "c").width(100),
        ColumnDef::new("D", "d").width(70).frozen(Frozen::Right),
        ColumnDef::new("E", "e").width(50).frozen(Frozen::Right),
    ];
    let widths = column_widths(&columns);
    assert_eq!(frozen_left_offsets(&columns, &widths), vec![0, 40, 0, 0, 0]);
    assert_eq!(frozen_right_offsets(&columns, &widths), vec![0, 0, 0, 50, 0]);
    assert_eq!(total_width(&widths), 320);
}

#[test]
fn geometry_of_pet_columns() {
    let g = GridGeometry::new(&pet_columns(), 24.0);
    assert_eq!(g.column_count(), 6);
    assert_eq!(g.x_positions, vec![0, 50, 170, 270, 410, 480]);
    assert_eq!(g.total_width, 570);
    assert!(g.is_frozen(0));
    assert!(!g.is_frozen(1));
    assert_eq!(g.total_height(15), 360.0);
}

#[test]
fn incremental_width_matches_full_recompute() {
    let mut columns = vec![
        ColumnDef::new("A", "a").width(40).frozen(Frozen::Left),
        ColumnDef::new("B", "b").width(60).frozen(Frozen::Left),
        ColumnDef::new("C", "c").width(100),
        ColumnDef::new("D", "d").width(70).frozen(Frozen::Right),
    ];
    let mut geometry = GridGeometry::new(&columns, 20.0);

    for (column, width) in [(1, 90), (2, 33), (3, 120), (0, 30)] {
        assert!(geometry.set_width(column, width).unwrap());
        columns[column].width = Some(width);
        assert_eq!(geometry, GridGeometry::new(&columns, 20.0));
    }
}

#[test]
fn column_lookup_by_x() {
    let widths = [50, 120, 100];
    let xs = x_positions(&widths);
    assert_eq!(column_at_x(&xs, &widths, 0.0), Some(0));
    assert_eq!(column_at_x(&xs, &widths, 169.0), Some(1));
    assert_eq!(column_at_x(&xs, &widths, 170.0), Some(2));
    assert_eq!(column_at_x(&xs, &widths, 270.0), None);
    assert_eq!(column_at_x(&xs, &widths, -1.0), None);
}

#[test]
fn column_window_follows_horizontal_scroll() {
    let xs = x_positions(&[100, 100, 100, 100, 100]);
    let w = visible_column_window(&xs, 500, 150.0, 200.0);
    assert_eq!((w.start, w.end), (1, 4));
    let all = visible_column_window(&xs, 500, 150.0, 0.0);
    assert_eq!((all.start, all.end), (0, 5));
    let past = visible_column_window(&xs, 500, 1000.0, 200.0);
    assert_eq!((past.start, past.end), (5, 5));
}
