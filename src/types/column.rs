use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::editor::{CustomCell, HeaderRenderer};

/// Side of the grid a frozen column is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frozen {
    Left,
    Right,
}

/// How the cells of a column are drawn and edited.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    /// Free text input (the default).
    #[default]
    Text,
    /// Boolean toggle.
    Checkbox,
    /// Single choice among the column's `options`.
    Select,
    /// Host-supplied renderer. Only constructible from Rust.
    #[serde(skip)]
    Custom(Rc<dyn CustomCell>),
}

impl CellKind {
    /// Short name used in error messages and the render model.
    pub fn name(&self) -> &'static str {
        match self {
            CellKind::Text => "text",
            CellKind::Checkbox => "checkbox",
            CellKind::Select => "select",
            CellKind::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PartialEq for CellKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellKind::Custom(a), CellKind::Custom(b)) => Rc::ptr_eq(a, b),
            (a, b) => a.name() == b.name(),
        }
    }
}

/// Label of a select option: fixed text, or computed each time the option
/// is rendered. Serialized as the evaluated text.
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OptionLabel {
    Static(String),
    Dynamic(Rc<dyn Fn() -> String>),
}

impl OptionLabel {
    /// Evaluate the label text.
    pub fn text(&self) -> String {
        match self {
            OptionLabel::Static(s) => s.clone(),
            OptionLabel::Dynamic(f) => f(),
        }
    }
}

impl From<String> for OptionLabel {
    fn from(s: String) -> Self {
        OptionLabel::Static(s)
    }
}

impl From<&str> for OptionLabel {
    fn from(s: &str) -> Self {
        OptionLabel::Static(s.to_string())
    }
}

impl From<OptionLabel> for String {
    fn from(label: OptionLabel) -> Self {
        label.text()
    }
}

impl fmt::Debug for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionLabel::Static(s) => write!(f, "{s:?}"),
            OptionLabel::Dynamic(_) => f.write_str("<fn>"),
        }
    }
}

impl PartialEq for OptionLabel {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (OptionLabel::Static(a), OptionLabel::Static(b)) => a == b,
            (OptionLabel::Dynamic(a), OptionLabel::Dynamic(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// One entry of a select column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOption {
    pub value: String,
    pub label: OptionLabel,
}

impl ColumnOption {
    pub fn new(value: impl Into<String>, label: impl Into<OptionLabel>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Option whose label is produced at render time.
    pub fn dynamic(value: impl Into<String>, label: impl Fn() -> String + 'static) -> Self {
        Self {
            value: value.into(),
            label: OptionLabel::Dynamic(Rc::new(label)),
        }
    }
}

/// Definition of one grid column.
///
/// Column lists are snapshots: reordering and resizing build a new `Vec`
/// rather than editing a list other holders may still be reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    /// Header text.
    pub label: String,
    /// Field of the row record this column reads and edits.
    pub data_key: String,
    /// Width in pixels. `None` or `0` falls back to the minimum width.
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub draggable: bool,
    #[serde(default)]
    pub resizable: bool,
    #[serde(default)]
    pub frozen: Option<Frozen>,
    #[serde(default)]
    pub kind: CellKind,
    /// Entries for select cells. `None` means the select is not rendered.
    #[serde(default)]
    pub options: Option<Vec<ColumnOption>>,
    #[serde(skip)]
    pub header: Option<HeaderRendererRef>,
}

impl ColumnDef {
    pub fn new(label: impl Into<String>, data_key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data_key: data_key.into(),
            width: None,
            draggable: false,
            resizable: false,
            frozen: None,
            kind: CellKind::Text,
            options: None,
            header: None,
        }
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn draggable(mut self) -> Self {
        self.draggable = true;
        self
    }

    pub fn resizable(mut self) -> Self {
        self.resizable = true;
        self
    }

    pub fn frozen(mut self, side: Frozen) -> Self {
        self.frozen = Some(side);
        self
    }

    pub fn kind(mut self, kind: CellKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn options(mut self, options: Vec<ColumnOption>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn header(mut self, renderer: Rc<dyn HeaderRenderer>) -> Self {
        self.header = Some(HeaderRendererRef(renderer));
        self
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.is_some()
    }

    /// Text shown in the header cell.
    pub fn header_text(&self) -> String {
        match &self.header {
            Some(HeaderRendererRef(renderer)) => renderer.render(self),
            None => self.label.clone(),
        }
    }
}

/// Shared handle to a custom header renderer.
#[derive(Clone)]
pub struct HeaderRendererRef(pub Rc<dyn HeaderRenderer>);

impl fmt::Debug for HeaderRendererRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<header renderer>")
    }
}

impl PartialEq for HeaderRendererRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case_column() {
        let json = r#"{
            "label": "Color",
            "dataKey": "color",
            "width": 120,
            "draggable": true,
            "frozen": "right",
            "kind": "select",
            "options": [{ "value": "red", "label": "Red" }]
        }"#;
        let column: ColumnDef = serde_json::from_str(json).unwrap();
        assert_eq!(column.data_key, "color");
        assert_eq!(column.width, Some(120));
        assert!(column.draggable);
        assert!(!column.resizable);
        assert_eq!(column.frozen, Some(Frozen::Right));
        assert_eq!(column.kind, CellKind::Select);
        let options = column.options.unwrap();
        assert_eq!(options[0].label.text(), "Red");
    }

    #[test]
    fn test_minimal_column_defaults() {
        let column: ColumnDef =
            serde_json::from_str(r#"{ "label": "Name", "dataKey": "name" }"#).unwrap();
        assert_eq!(column.width, None);
        assert_eq!(column.kind, CellKind::Text);
        assert!(column.options.is_none());
        assert!(!column.is_frozen());
    }

    #[test]
    fn test_dynamic_label_evaluated_on_each_call() {
        let counter = Rc::new(std::cell::Cell::new(0));
        let c = Rc::clone(&counter);
        let option = ColumnOption::dynamic("red", move || {
            c.set(c.get() + 1);
            format!("Red #{}", c.get())
        });
        assert_eq!(option.label.text(), "Red #1");
        assert_eq!(option.label.text(), "Red #2");
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn test_dynamic_label_serializes_as_text() {
        let option = ColumnOption::dynamic("red", || "Dynamic Red".to_string());
        let json = serde_json::to_value(&option).unwrap();
        assert_eq!(json["label"], "Dynamic Red");
    }
}
