//! Cell addressing and the per-kind render model.

use serde::Serialize;

use crate::types::{CellKind, CellValue, ColumnDef, RowRecord};

/// DOM id of an editable cell: `grid-data-row-<row_index>-<data_key>`.
///
/// Unique per (row, column) and independent of the cell kind, so tests and
/// focus management can address any cell without knowing how it renders.
pub fn cell_dom_id(row_index: usize, data_key: &str) -> String {
    format!("grid-data-row-{row_index}-{data_key}")
}

/// What a custom cell renderer gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct CellInfo<'a> {
    pub column: &'a ColumnDef,
    pub value: Option<&'a CellValue>,
    pub row_index: usize,
    pub virtual_row_index: usize,
}

/// Host-supplied cell kind.
pub trait CustomCell {
    /// Content drawn for the cell.
    fn render(&self, cell: &CellInfo<'_>) -> String;

    /// Whether a committed value is acceptable. Accepts everything unless
    /// overridden.
    fn accepts(&self, _value: &CellValue) -> bool {
        true
    }
}

/// Host-supplied header renderer.
pub trait HeaderRenderer {
    /// Text drawn in the header cell.
    fn render(&self, column: &ColumnDef) -> String;
}

/// One entry of a rendered select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Render model of a single cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CellView {
    Text { id: String, value: String },
    Checkbox { id: String, checked: bool },
    Select { id: String, options: Vec<OptionView> },
    Custom { id: String, content: String },
}

impl CellView {
    pub fn id(&self) -> &str {
        match self {
            CellView::Text { id, .. }
            | CellView::Checkbox { id, .. }
            | CellView::Select { id, .. }
            | CellView::Custom { id, .. } => id,
        }
    }
}

/// A cell addressed by its row and column.
#[derive(Debug)]
pub struct CellContext<'a, T: ?Sized> {
    pub row: &'a T,
    pub column: &'a ColumnDef,
    /// Index of the row in the full row set.
    pub row_index: usize,
    /// Index of the row inside the rendered window.
    pub virtual_row_index: usize,
}

impl<'a, T: RowRecord + ?Sized> CellContext<'a, T> {
    pub fn new(
        row: &'a T,
        column: &'a ColumnDef,
        row_index: usize,
        virtual_row_index: usize,
    ) -> Self {
        Self {
            row,
            column,
            row_index,
            virtual_row_index,
        }
    }

    pub fn dom_id(&self) -> String {
        cell_dom_id(self.row_index, &self.column.data_key)
    }

    /// Current value of the cell's field.
    pub fn value(&self) -> Option<CellValue> {
        self.row.field(&self.column.data_key)
    }

    /// Render model of the cell, or `None` when there is nothing to draw:
    /// a select column without an `options` list renders no control at all.
    pub fn render(&self) -> Option<CellView> {
        let id = self.dom_id();
        let value = self.value();
        let view = match &self.column.kind {
            CellKind::Text => CellView::Text {
                id,
                value: value.map(|v| v.display()).unwrap_or_default(),
            },
            CellKind::Checkbox => CellView::Checkbox {
                id,
                checked: value.is_some_and(|v| v.is_truthy()),
            },
            CellKind::Select => {
                let options = self.column.options.as_ref()?;
                let current = value.map(|v| v.display());
                CellView::Select {
                    id,
                    options: options
                        .iter()
                        .map(|option| OptionView {
                            selected: current.as_deref() == Some(option.value.as_str()),
                            value: option.value.clone(),
                            label: option.label.text(),
                        })
                        .collect(),
                }
            }
            CellKind::Custom(renderer) => {
                let info = CellInfo {
                    column: self.column,
                    value: value.as_ref(),
                    row_index: self.row_index,
                    virtual_row_index: self.virtual_row_index,
                };
                CellView::Custom {
                    content: renderer.render(&info),
                    id,
                }
            }
        };
        Some(view)
    }
}
