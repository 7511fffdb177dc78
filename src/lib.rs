//! datagrid - virtualized data grid engine
//!
//! Computes what a scrolling data grid must draw, for native hosts and the
//! browser via WebAssembly:
//! - Column geometry: widths, x-offsets, sticky offsets for frozen columns
//! - Row and column windowing from the scroll position
//! - Drag-to-reorder and pointer resizing of columns
//! - Per-kind cell rendering (text, checkbox, select, custom) and edit events
//!
//! # Usage (Rust)
//!
//! ```
//! use datagrid::{ColumnDef, Grid, GridOptions};
//! use serde_json::json;
//!
//! let columns = vec![ColumnDef::new("Name", "name").width(120)];
//! let rows = vec![json!({ "name": "Ada" }), json!({ "name": "Grace" })];
//! let mut grid = Grid::new(columns, Some(rows), GridOptions::default())?;
//! grid.tick();
//! assert_eq!(grid.frame().rows.len(), 2);
//! # Ok::<(), datagrid::GridError>(())
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { DataGrid } from 'datagrid';
//! await init();
//! const grid = new DataGrid(columns, rows, { rowHeight: 24 });
//! grid.setRenderCallback(() => draw(grid.frame()));
//! grid.scroll(container.scrollTop, container.scrollLeft);
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod grid;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod state;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

use wasm_bindgen::prelude::*;

pub use config::{GridOptions, GridStyle};
pub use error::{GridError, Result};
pub use grid::{ColumnRef, EventRecord, Grid, GridEvent};
pub use render::GridFrame;
pub use types::*;

#[cfg(target_arch = "wasm32")]
pub use wasm::DataGrid;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
