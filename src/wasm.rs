//! WASM API module for browser/JS interop
//!
//! Wraps [`DigitEditor`] so a web front end can drive the swatch inputs
//! directly: every keystroke goes through `assignDigit`, every blur through
//! `resetEmpty`, and the page redraws from `swatchesJson` and
//! `digitGridJson`.

use wasm_bindgen::prelude::*;

use crate::color::ColorKey;
use crate::import::import_png_bytes;
use crate::models::PrimeImageDocument;
use crate::session::{AssignOutcome, DigitEditor};
use crate::validate::validate_editor;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_err)
}

/// Digit editor handle owned by JavaScript.
#[wasm_bindgen]
pub struct WasmEditor {
    inner: DigitEditor,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Build an editor from document JSON (JSON5 accepted).
    #[wasm_bindgen(constructor)]
    pub fn new(document: &str) -> Result<WasmEditor, JsValue> {
        let inner = PrimeImageDocument::from_json(document)
            .and_then(PrimeImageDocument::into_editor)
            .map_err(js_err)?;
        Ok(WasmEditor { inner })
    }

    /// Build an editor from PNG bytes, digits pre-assigned in palette order.
    #[wasm_bindgen(js_name = fromPng)]
    pub fn from_png(bytes: &[u8], max_colors: usize) -> Result<WasmEditor, JsValue> {
        let inner =
            import_png_bytes(bytes, max_colors).map_err(js_err)?.to_document().into_editor();
        Ok(WasmEditor { inner: inner.map_err(js_err)? })
    }

    /// Swap in a new PNG; all digits start over unassigned.
    #[wasm_bindgen(js_name = replaceSourcePng)]
    pub fn replace_source_png(&mut self, bytes: &[u8], max_colors: usize) -> Result<(), JsValue> {
        let result = import_png_bytes(bytes, max_colors).map_err(js_err)?;
        self.inner.replace_source(result.palette, result.grid).map_err(js_err)
    }

    /// Feed a field's raw value; returns "committed", "cleared" or "rejected".
    #[wasm_bindgen(js_name = assignDigit)]
    pub fn assign_digit(&mut self, color: &str, raw: &str) -> Result<String, JsValue> {
        let color = ColorKey::parse(color).map_err(js_err)?;
        let outcome = match self.inner.assign_digit(&color, raw).map_err(js_err)? {
            AssignOutcome::Committed(_) => "committed",
            AssignOutcome::Cleared => "cleared",
            AssignOutcome::Rejected => "rejected",
        };
        Ok(outcome.to_string())
    }

    #[wasm_bindgen(js_name = resetEmpty)]
    pub fn reset_empty(&mut self) {
        self.inner.reset_empty();
    }

    #[wasm_bindgen(js_name = toggleColorized)]
    pub fn toggle_colorized(&mut self) -> bool {
        self.inner.toggle_colorized()
    }

    #[wasm_bindgen(getter)]
    pub fn colorized(&self) -> bool {
        self.inner.is_colorized()
    }

    #[wasm_bindgen(js_name = isValid)]
    pub fn is_valid(&self) -> bool {
        self.inner.is_valid()
    }

    /// The number, or undefined while a color lacks a digit
    #[wasm_bindgen(js_name = digitString)]
    pub fn digit_string(&self) -> Option<String> {
        self.inner.digit_string()
    }

    #[wasm_bindgen(js_name = swatchesJson)]
    pub fn swatches_json(&self) -> Result<String, JsValue> {
        to_json(&self.inner.swatches())
    }

    #[wasm_bindgen(js_name = digitGridJson)]
    pub fn digit_grid_json(&self) -> Result<String, JsValue> {
        to_json(&self.inner.project())
    }

    #[wasm_bindgen(js_name = issuesJson)]
    pub fn issues_json(&self, max_digits: usize) -> Result<String, JsValue> {
        to_json(&validate_editor(&self.inner, max_digits))
    }

    /// Current committed state as document JSON
    #[wasm_bindgen(js_name = toDocument)]
    pub fn to_document(&self) -> Result<String, JsValue> {
        PrimeImageDocument::from_editor(&self.inner).to_json_pretty().map_err(js_err)
    }
}
