//! JavaScript bindings.
//!
//! `DataGrid` wraps a [`Grid`] over JSON rows. Deferred work is flushed on
//! the next microtask through `spawn_local`, after which the render
//! callback (if any) is invoked so the host can pull a fresh frame.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Function;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

use crate::config::GridOptions;
use crate::editor::EditInput;
use crate::error::{GridError, Result};
use crate::grid::Grid;
use crate::interaction::MouseButton;
use crate::types::ColumnDef;

type SharedGrid = Rc<RefCell<Grid<Value>>>;
type RenderCallback = Rc<RefCell<Option<Function>>>;
type JsResult<T> = std::result::Result<T, JsValue>;

#[wasm_bindgen]
pub struct DataGrid {
    grid: SharedGrid,
    render_callback: RenderCallback,
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> JsResult<T> {
    serde_wasm_bindgen::from_value(value).map_err(JsValue::from)
}

fn to_js<T: serde::Serialize>(value: &T) -> JsResult<JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn schedule_tick(grid: &Weak<RefCell<Grid<Value>>>, render_callback: &RenderCallback) {
    let grid = Weak::clone(grid);
    let render_callback = Rc::clone(render_callback);
    spawn_local(async move {
        let Some(grid) = grid.upgrade() else {
            return;
        };
        let ran = match grid.try_borrow_mut() {
            Ok(mut grid) => grid.tick(),
            Err(_) => {
                tracing::warn!("grid busy at tick, deferred work left pending");
                return;
            }
        };
        let callback = render_callback.borrow().clone();
        if let (true, Some(callback)) = (ran > 0, callback) {
            let _ = callback.call0(&JsValue::NULL);
        }
    });
}

impl DataGrid {
    /// Run `f` against the grid. Fails instead of panicking when called
    /// re-entrantly from an event listener.
    fn with_grid<R>(&self, f: impl FnOnce(&mut Grid<Value>) -> Result<R>) -> JsResult<R> {
        let mut grid = self
            .grid
            .try_borrow_mut()
            .map_err(|_| GridError::StateUnavailable("grid is busy dispatching an event"))?;
        Ok(f(&mut grid)?)
    }

    fn commit(&mut self, row_index: usize, data_key: &str, input: EditInput) -> JsResult<()> {
        self.with_grid(|grid| {
            let column = grid
                .column_index(data_key)
                .ok_or_else(|| GridError::Config(format!("no column with dataKey '{data_key}'")))?;
            grid.commit_edit(row_index, column, input)
        })
    }
}

#[wasm_bindgen]
impl DataGrid {
    /// `columns` is an array of column definitions, `rows` an array of
    /// plain objects (`undefined` is rejected, `[]` is fine), `options` an
    /// optional options object.
    #[wasm_bindgen(constructor)]
    pub fn new(columns: JsValue, rows: JsValue, options: JsValue) -> JsResult<DataGrid> {
        console_error_panic_hook::set_once();

        let columns: Vec<ColumnDef> = from_js(columns)?;
        let rows: Option<Vec<Value>> = if rows.is_undefined() || rows.is_null() {
            None
        } else {
            Some(from_js(rows)?)
        };
        let options: GridOptions = if options.is_undefined() || options.is_null() {
            GridOptions::default()
        } else {
            from_js(options)?
        };

        let grid = Rc::new(RefCell::new(Grid::new(columns, rows, options)?));
        let render_callback = Rc::new(RefCell::new(None));

        let weak = Rc::downgrade(&grid);
        let callback = Rc::clone(&render_callback);
        grid.borrow_mut()
            .set_waker(move || schedule_tick(&weak, &callback));

        Ok(DataGrid {
            grid,
            render_callback,
        })
    }

    /// Called after deferred work has run.
    #[wasm_bindgen(js_name = "setRenderCallback")]
    pub fn set_render_callback(&mut self, callback: Option<Function>) {
        *self.render_callback.borrow_mut() = callback;
    }

    /// Register a listener receiving one plain object per grid event.
    #[wasm_bindgen(js_name = "onEvent")]
    pub fn on_event(&mut self, callback: Function) -> JsResult<()> {
        self.with_grid(|grid| {
            grid.on_event(move |event| {
                if let Ok(record) = serde_wasm_bindgen::to_value(&event.record()) {
                    let _ = callback.call1(&JsValue::NULL, &record);
                }
            });
            Ok(())
        })
    }

    pub fn scroll(&mut self, top: f64, left: f64) -> JsResult<()> {
        self.with_grid(|grid| {
            grid.scroll_to(top, left);
            Ok(())
        })
    }

    #[wasm_bindgen(js_name = "setViewportHeight")]
    pub fn set_viewport_height(&mut self, height: f64) -> JsResult<bool> {
        self.with_grid(|grid| Ok(grid.set_viewport_height(height)))
    }

    #[wasm_bindgen(js_name = "setViewportWidth")]
    pub fn set_viewport_width(&mut self, width: f64) -> JsResult<bool> {
        self.with_grid(|grid| Ok(grid.set_viewport_width(width)))
    }

    /// Read the viewport size from the scroll container element.
    pub fn measure(&mut self, element: &HtmlElement) -> JsResult<()> {
        let height = f64::from(element.client_height());
        let width = f64::from(element.client_width());
        self.with_grid(|grid| {
            grid.set_viewport_height(height);
            grid.set_viewport_width(width);
            Ok(())
        })
    }

    pub fn tick(&mut self) -> JsResult<usize> {
        self.with_grid(|grid| Ok(grid.tick()))
    }

    pub fn frame(&self) -> JsResult<JsValue> {
        let frame = self.with_grid(|grid| Ok(grid.frame()))?;
        to_js(&frame)
    }

    /// CSS custom properties as `[name, value]` pairs.
    #[wasm_bindgen(js_name = "cssVariables")]
    pub fn css_variables(&self) -> JsResult<JsValue> {
        let vars = self.with_grid(|grid| Ok(grid.css_variables()))?;
        to_js(&vars)
    }

    #[wasm_bindgen(js_name = "setActiveRow")]
    pub fn set_active_row(&mut self, row: Option<usize>) -> JsResult<bool> {
        self.with_grid(|grid| grid.set_active_row(row))
    }

    #[wasm_bindgen(js_name = "commitText")]
    pub fn commit_text(&mut self, row_index: usize, data_key: &str, text: String) -> JsResult<()> {
        self.commit(row_index, data_key, EditInput::Text(text))
    }

    #[wasm_bindgen(js_name = "commitCheckbox")]
    pub fn commit_checkbox(
        &mut self,
        row_index: usize,
        data_key: &str,
        checked: bool,
    ) -> JsResult<()> {
        self.commit(row_index, data_key, EditInput::Checked(checked))
    }

    #[wasm_bindgen(js_name = "commitSelect")]
    pub fn commit_select(
        &mut self,
        row_index: usize,
        data_key: &str,
        value: String,
    ) -> JsResult<()> {
        self.commit(row_index, data_key, EditInput::Choice(value))
    }

    #[wasm_bindgen(js_name = "startColumnDrag")]
    pub fn start_column_drag(&mut self, index: usize, pointer_x: f64) -> JsResult<bool> {
        self.with_grid(|grid| grid.start_column_drag(index, pointer_x))
    }

    #[wasm_bindgen(js_name = "dragEnter")]
    pub fn drag_enter(&mut self, index: usize) -> JsResult<Option<usize>> {
        self.with_grid(|grid| grid.drag_enter(index))
    }

    /// Returns `true` when the drop reordered the columns.
    #[wasm_bindgen(js_name = "dropColumn")]
    pub fn drop_column(&mut self) -> JsResult<bool> {
        self.with_grid(|grid| Ok(grid.drop_column()?.is_some()))
    }

    #[wasm_bindgen(js_name = "cancelColumnDrag")]
    pub fn cancel_column_drag(&mut self) -> JsResult<bool> {
        self.with_grid(|grid| Ok(grid.cancel_column_drag()))
    }

    #[wasm_bindgen(js_name = "resizePointerDown")]
    pub fn resize_pointer_down(
        &mut self,
        button: i16,
        column: usize,
        pointer_x: f64,
    ) -> JsResult<bool> {
        let button = MouseButton::from(button);
        self.with_grid(|grid| grid.resize_pointer_down(button, column, pointer_x))
    }

    #[wasm_bindgen(js_name = "resizePointerMove")]
    pub fn resize_pointer_move(&mut self, pointer_x: f64) -> JsResult<Option<u32>> {
        self.with_grid(|grid| grid.resize_pointer_move(pointer_x))
    }

    #[wasm_bindgen(js_name = "resizePointerUp")]
    pub fn resize_pointer_up(&mut self) -> JsResult<Option<u32>> {
        self.with_grid(|grid| grid.resize_pointer_up())
    }
}
