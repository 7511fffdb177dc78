//! Derived geometry of a column set.

use serde::Serialize;

use super::geometry::{column_widths, sticky_offsets, total_width, x_positions};
use crate::error::{GridError, Result};
use crate::types::{ColumnDef, Frozen};

/// Sticky placement of a frozen column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sticky {
    pub side: Frozen,
    /// Distance from the pinned edge in pixels.
    pub offset: u32,
}

/// Geometry derived from the column list and row height.
///
/// Every per-column array has exactly one entry per column.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridGeometry {
    pub widths: Vec<u32>,
    pub x_positions: Vec<u32>,
    pub frozen_left: Vec<u32>,
    pub frozen_right: Vec<u32>,
    pub frozen: Vec<Option<Frozen>>,
    pub total_width: u32,
    pub row_height: f64,
}

impl GridGeometry {
    pub fn new(columns: &[ColumnDef], row_height: f64) -> Self {
        let widths = column_widths(columns);
        let frozen: Vec<Option<Frozen>> = columns.iter().map(|c| c.frozen).collect();
        Self {
            x_positions: x_positions(&widths),
            frozen_left: sticky_offsets(&frozen, &widths, Frozen::Left),
            frozen_right: sticky_offsets(&frozen, &widths, Frozen::Right),
            total_width: total_width(&widths),
            widths,
            frozen,
            row_height,
        }
    }

    pub fn column_count(&self) -> usize {
        self.widths.len()
    }

    pub fn width(&self, column: usize) -> Option<u32> {
        self.widths.get(column).copied()
    }

    /// Left edge of a column in content coordinates.
    pub fn x(&self, column: usize) -> Option<u32> {
        self.x_positions.get(column).copied()
    }

    pub fn is_frozen(&self, column: usize) -> bool {
        matches!(self.frozen.get(column), Some(Some(_)))
    }

    pub fn sticky(&self, column: usize) -> Option<Sticky> {
        let side = (*self.frozen.get(column)?)?;
        let offsets = match side {
            Frozen::Left => &self.frozen_left,
            Frozen::Right => &self.frozen_right,
        };
        Some(Sticky {
            side,
            offset: offsets.get(column).copied().unwrap_or(0),
        })
    }

    pub fn row_top(&self, row_index: usize) -> f64 {
        super::geometry::row_top(row_index, self.row_height)
    }

    pub fn total_height(&self, total_rows: usize) -> f64 {
        self.row_top(total_rows)
    }

    /// Change one column's width, re-deriving only what depends on it: the
    /// x-offsets to its right, the total width, and the sticky offsets of
    /// its side when it is frozen.
    ///
    /// Returns `Ok(false)` when the width is unchanged.
    pub fn set_width(&mut self, column: usize, width: u32) -> Result<bool> {
        let len = self.widths.len();
        let slot = self
            .widths
            .get_mut(column)
            .ok_or(GridError::ColumnOutOfRange { index: column, len })?;
        let old = *slot;
        if old == width {
            return Ok(false);
        }
        *slot = width;

        for x in self.x_positions.iter_mut().skip(column + 1) {
            *x = x.saturating_sub(old).saturating_add(width);
        }
        self.total_width = self.total_width.saturating_sub(old).saturating_add(width);

        match self.frozen.get(column).copied().flatten() {
            Some(Frozen::Left) => {
                self.frozen_left = sticky_offsets(&self.frozen, &self.widths, Frozen::Left);
            }
            Some(Frozen::Right) => {
                self.frozen_right = sticky_offsets(&self.frozen, &self.widths, Frozen::Right);
            }
            None => {}
        }
        Ok(true)
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

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("Id", "id").width(50).frozen(Frozen::Left),
            ColumnDef::new("Name", "name").width(120),
            ColumnDef::new("Age", "age").width(80),
            ColumnDef::new("Actions", "actions").width(60).frozen(Frozen::Right),
        ]
    }

    #[test]
    fn test_arrays_match_column_count() {
        let g = GridGeometry::new(&columns(), 24.0);
        assert_eq!(g.column_count(), 4);
        assert_eq!(g.x_positions.len(), 4);
        assert_eq!(g.frozen_left.len(), 4);
        assert_eq!(g.frozen_right.len(), 4);
        assert_eq!(g.total_width, 310);
    }

    #[test]
    fn test_sticky_lookup() {
        let g = GridGeometry::new(&columns(), 24.0);
        assert_eq!(
            g.sticky(0),
            Some(Sticky {
                side: Frozen::Left,
                offset: 0
            })
        );
        assert_eq!(g.sticky(1), None);
        assert_eq!(g.sticky(3).map(|s| s.side), Some(Frozen::Right));
        assert_eq!(g.sticky(9), None);
    }

    #[test]
    fn test_incremental_width_matches_full_recompute() {
        let mut cols = columns();
        let mut g = GridGeometry::new(&cols, 24.0);
        assert!(g.set_width(1, 200).unwrap());

        cols[1].width = Some(200);
        assert_eq!(g, GridGeometry::new(&cols, 24.0));
    }

    #[test]
    fn test_incremental_width_of_frozen_column() {
        let mut cols = columns();
        cols[1].frozen = Some(Frozen::Left);
        let mut g = GridGeometry::new(&cols, 24.0);
        g.set_width(0, 70).unwrap();
        assert_eq!(g.frozen_left[1], 70);

        cols[0].width = Some(70);
        assert_eq!(g, GridGeometry::new(&cols, 24.0));
    }

    #[test]
    fn test_unchanged_width_is_noop() {
        let mut g = GridGeometry::new(&columns(), 24.0);
        assert!(!g.set_width(2, 80).unwrap());
    }

    #[test]
    fn test_out_of_range_width() {
        let mut g = GridGeometry::new(&columns(), 24.0);
        assert!(matches!(
            g.set_width(4, 10),
            Err(GridError::ColumnOutOfRange { index: 4, len: 4 })
        ));
    }

    #[test]
    fn test_row_top_and_height() {
        let g = GridGeometry::new(&columns(), 20.0);
        assert_eq!(g.row_top(5), 100.0);
        assert_eq!(g.total_height(15), 300.0);
    }
}
