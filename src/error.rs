//! Structured error types for datagrid.
//!
//! Configuration errors are raised at grid construction so host
//! misconfiguration fails loudly; runtime guards name the missing piece
//! instead of handing back an empty value.

/// All errors that can occur while building or driving a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The grid was constructed without any column definitions.
    #[error("Grid configuration: at least one column is required")]
    NoColumns,

    /// The grid was constructed without a rows collection.
    #[error("Grid configuration: rows are required (pass an empty list for no data)")]
    MissingRows,

    /// Invalid construction options.
    #[error("Grid configuration: {0}")]
    Config(String),

    /// JSON (de)serialization of columns, rows or options failed.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A column index outside the current column list.
    #[error("Column index {index} out of range (grid has {len} columns)")]
    ColumnOutOfRange { index: usize, len: usize },

    /// A row index outside the current row set.
    #[error("Row index {index} out of range (grid has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    /// An edit addressed a row that is not part of the rendered window.
    #[error("Row {row_index} is not rendered (visible rows {start}..{end})")]
    RowNotRendered {
        row_index: usize,
        start: usize,
        end: usize,
    },

    /// The committed value does not match the kind of the cell.
    #[error("Column '{data_key}' is a {expected} cell and cannot take a {got} value")]
    EditKindMismatch {
        data_key: String,
        expected: &'static str,
        got: &'static str,
    },

    /// A select cell received a value that is not one of its options.
    #[error("Column '{data_key}' has no option with value '{value}'")]
    UnknownOption { data_key: String, value: String },

    /// A custom cell refused the committed value.
    #[error("Column '{data_key}' rejected the value {value}")]
    EditRejected { data_key: String, value: String },

    /// Grid state requested while it is not reachable (e.g. re-entrant
    /// access from inside an event listener).
    #[error("Grid state unavailable: {0}")]
    StateUnavailable(&'static str),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        js_sys::Error::new(&e.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_missing_context() {
        assert_eq!(
            GridError::NoColumns.to_string(),
            "Grid configuration: at least one column is required"
        );
        let err = GridError::RowNotRendered {
            row_index: 40,
            start: 0,
            end: 12,
        };
        assert_eq!(err.to_string(), "Row 40 is not rendered (visible rows 0..12)");
    }

    #[test]
    fn test_json_errors_convert() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: GridError = match parse {
            Err(e) => e.into(),
            Ok(_) => return,
        };
        assert!(err.to_string().starts_with("JSON: "));
    }
}
