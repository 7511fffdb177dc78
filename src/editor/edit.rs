//! Committing an edited cell value.

use serde::{Deserialize, Serialize};

use super::cell::CellContext;
use crate::error::{GridError, Result};
use crate::types::{CellKind, CellValue, ColumnDef, RowRecord};

/// Raw input produced by an editor widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum EditInput {
    /// Text typed into a text cell.
    Text(String),
    /// New state of a checkbox.
    Checked(bool),
    /// Value of the chosen select option.
    Choice(String),
    /// Arbitrary value from a custom cell.
    Value(CellValue),
}

impl EditInput {
    fn name(&self) -> &'static str {
        match self {
            EditInput::Text(_) => "text",
            EditInput::Checked(_) => "checkbox",
            EditInput::Choice(_) => "select",
            EditInput::Value(_) => "custom",
        }
    }

    fn into_value(self) -> CellValue {
        match self {
            EditInput::Text(s) | EditInput::Choice(s) => CellValue::Text(s),
            EditInput::Checked(b) => CellValue::Bool(b),
            EditInput::Value(v) => v,
        }
    }
}

/// A committed edit, handed to listeners by reference.
#[derive(Debug)]
pub struct CellEdit<'a, T: ?Sized> {
    pub row: &'a T,
    pub column: &'a ColumnDef,
    pub value: CellValue,
    pub row_index: usize,
    pub virtual_row_index: usize,
}

impl<'a, T: RowRecord + ?Sized> CellContext<'a, T> {
    /// Turn widget input into a [`CellEdit`].
    ///
    /// The input must match the column's cell kind; a select value must be
    /// one of the column's options and a custom cell may refuse the value.
    pub fn commit(&self, input: EditInput) -> Result<CellEdit<'a, T>> {
        let column = self.column;
        let value = match (&column.kind, input) {
            (CellKind::Text, EditInput::Text(s)) => CellValue::Text(s),
            (CellKind::Checkbox, EditInput::Checked(b)) => CellValue::Bool(b),
            (CellKind::Select, EditInput::Choice(choice)) => {
                let known = column
                    .options
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .any(|option| option.value == choice);
                if !known {
                    return Err(GridError::UnknownOption {
                        data_key: column.data_key.clone(),
                        value: choice,
                    });
                }
                CellValue::Text(choice)
            }
            (CellKind::Custom(cell), input) => {
                let value = input.into_value();
                if !cell.accepts(&value) {
                    return Err(GridError::EditRejected {
                        data_key: column.data_key.clone(),
                        value: format!("{value:?}"),
                    });
                }
                value
            }
            (kind, input) => {
                return Err(GridError::EditKindMismatch {
                    data_key: column.data_key.clone(),
                    expected: kind.name(),
                    got: input.name(),
                })
            }
        };
        tracing::trace!(
            row_index = self.row_index,
            data_key = %column.data_key,
            "cell value committed"
        );
        Ok(CellEdit {
            row: self.row,
            column,
            value,
            row_index: self.row_index,
            virtual_row_index: self.virtual_row_index,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::editor::{CellInfo, CustomCell};
    use crate::types::ColumnOption;
    use serde_json::json;
    use std::rc::Rc;

    struct Stars;

    impl CustomCell for Stars {
        fn render(&self, cell: &CellInfo<'_>) -> String {
            let n = match cell.value {
                Some(CellValue::Number(n)) => *n,
                _ => 0.0,
            };
            "*".repeat(crate::layout::geometry::to_index(n))
        }

        fn accepts(&self, value: &CellValue) -> bool {
            matches!(value, CellValue::Number(n) if (0.0..=5.0).contains(n))
        }
    }

    #[test]
    fn test_text_commit_carries_indices() {
        let row = json!({ "name": "Rex" });
        let column = ColumnDef::new("Name", "name");
        let ctx = CellContext::new(&row, &column, 9, 1);
        let edit = ctx.commit(EditInput::Text("Max".into())).unwrap();
        assert_eq!(edit.value, CellValue::Text("Max".into()));
        assert_eq!(edit.row_index, 9);
        assert_eq!(edit.virtual_row_index, 1);
        assert_eq!(edit.row, &row);
        // rows are never written back
        assert_eq!(row["name"], "Rex");
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let row = json!({ "active": true });
        let column = ColumnDef::new("Active", "active").kind(CellKind::Checkbox);
        let ctx = CellContext::new(&row, &column, 0, 0);
        let err = ctx.commit(EditInput::Text("yes".into())).unwrap_err();
        assert!(matches!(
            err,
            GridError::EditKindMismatch {
                expected: "checkbox",
                got: "text",
                ..
            }
        ));
        let edit = ctx.commit(EditInput::Checked(false)).unwrap();
        assert_eq!(edit.value, CellValue::Bool(false));
    }

    #[test]
    fn test_select_requires_known_option() {
        let row = json!({ "size": "s" });
        let column = ColumnDef::new("Size", "size")
            .kind(CellKind::Select)
            .options(vec![ColumnOption::new("s", "Small"), ColumnOption::new("l", "Large")]);
        let ctx = CellContext::new(&row, &column, 0, 0);
        assert_eq!(
            ctx.commit(EditInput::Choice("l".into())).unwrap().value,
            CellValue::Text("l".into())
        );
        assert!(matches!(
            ctx.commit(EditInput::Choice("xl".into())),
            Err(GridError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_custom_cell_renders_and_validates() {
        let row = json!({ "rating": 3 });
        let column = ColumnDef::new("Rating", "rating").kind(CellKind::Custom(Rc::new(Stars)));
        let ctx = CellContext::new(&row, &column, 0, 0);
        match ctx.render() {
            Some(crate::editor::CellView::Custom { content, .. }) => assert_eq!(content, "***"),
            other => panic!("unexpected view {other:?}"),
        }
        assert!(ctx.commit(EditInput::Value(CellValue::Number(4.0))).is_ok());
        assert!(matches!(
            ctx.commit(EditInput::Value(CellValue::Number(9.0))),
            Err(GridError::EditRejected { .. })
        ));
    }

    #[test]
    fn test_input_deserializes_from_tagged_json() {
        let input: EditInput =
            serde_json::from_value(json!({ "kind": "checked", "value": true })).unwrap();
        assert_eq!(input, EditInput::Checked(true));
    }
}
