//! Construction options and styling tokens.
//!
//! Both structs deserialize from camelCase JSON; any missing key takes its
//! default, so `{}` is a valid configuration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::grid::Grid;
use crate::types::ColumnDef;

/// Row height used when none is configured, in pixels.
pub const DEFAULT_ROW_HEIGHT: f64 = 24.0;

/// Grid construction options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridOptions {
    /// Uniform row height in pixels.
    pub row_height: f64,
    /// Rows rendered past the bottom of the viewport.
    pub extra_rows: usize,
    /// Let every non-frozen column be dragged, regardless of its own flag.
    pub all_columns_draggable: bool,
    /// Rows that fit the initial viewport. Defaults to
    /// [`default_rows_per_page`](crate::layout::default_rows_per_page).
    pub rows_per_page: Option<usize>,
    pub style: GridStyle,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            extra_rows: 0,
            all_columns_draggable: false,
            rows_per_page: None,
            style: GridStyle::default(),
        }
    }
}

impl GridOptions {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Reject options no grid can be laid out with.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            return Err(crate::GridError::Config(format!(
                "rowHeight must be a positive number, got {}",
                self.row_height
            )));
        }
        Ok(())
    }
}

/// Pass-through styling tokens, exposed to the host as CSS custom
/// properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridStyle {
    pub border: String,
    pub header_border_width: String,
    pub header_border_color: String,
    pub head_background: String,
    pub head_color: String,
    pub cell_background: String,
    pub cell_color: String,
    pub textbox_background: String,
    pub textbox_color: String,
    pub select_background: String,
    pub select_color: String,
    pub no_draggable_opacity: String,
    pub no_draggable_foreground: String,
    pub draggable_background: String,
    pub dragging_background: String,
    /// Minimum grid height. `None` means six rows.
    pub min_height: Option<String>,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            border: "1px solid #666".into(),
            header_border_width: "2px".into(),
            header_border_color: "black".into(),
            head_background: "white".into(),
            head_color: "black".into(),
            cell_background: "white".into(),
            cell_color: "black".into(),
            textbox_background: "white".into(),
            textbox_color: "black".into(),
            select_background: "white".into(),
            select_color: "black".into(),
            no_draggable_opacity: "0.4".into(),
            no_draggable_foreground: "rgba(66, 66, 66, 0.5)".into(),
            draggable_background: "rgba(33, 248, 255, 0.5)".into(),
            dragging_background: "rgba(33, 255, 151, 0.5)".into(),
            min_height: None,
        }
    }
}

impl GridStyle {
    /// `(--name, value)` pairs, in a stable order.
    pub fn css_variables(&self, row_height: f64) -> Vec<(&'static str, String)> {
        let min_height = self
            .min_height
            .clone()
            .unwrap_or_else(|| format!("{}px", row_height * 6.0));
        vec![
            ("--grid-border", self.border.clone()),
            ("--grid-header-border-width", self.header_border_width.clone()),
            ("--grid-header-border-color", self.header_border_color.clone()),
            ("--grid-head-background", self.head_background.clone()),
            ("--grid-head-color", self.head_color.clone()),
            ("--grid-cell-background", self.cell_background.clone()),
            ("--grid-cell-color", self.cell_color.clone()),
            ("--grid-textbox-background", self.textbox_background.clone()),
            ("--grid-textbox-color", self.textbox_color.clone()),
            ("--grid-select-background", self.select_background.clone()),
            ("--grid-select-color", self.select_color.clone()),
            ("--grid-no-draggable-opacity", self.no_draggable_opacity.clone()),
            ("--grid-no-draggable-fg", self.no_draggable_foreground.clone()),
            ("--grid-draggable-bg", self.draggable_background.clone()),
            ("--grid-dragging-bg", self.dragging_background.clone()),
            ("--grid-row-height", format!("{row_height}px")),
            ("--grid-min-height", min_height),
        ]
    }
}

/// A whole grid described in JSON: `{ "columns": [...], "rows": [...],
/// "options": {...} }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDocument {
    pub columns: Vec<ColumnDef>,
    /// Left `None` when the key is absent, which [`Grid::new`] rejects.
    #[serde(default)]
    pub rows: Option<Vec<Value>>,
    #[serde(default)]
    pub options: GridOptions,
}

impl GridDocument {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_grid(self) -> crate::Result<Grid<Value>> {
        Grid::new(self.columns, self.rows, self.options)
    }
}
