//! WebAssembly bindings.
//!
//! Lets a JavaScript host build operations by name, apply them to register
//! values and ask for inverses.

use wasm_bindgen::prelude::*;
use crate::{Operation, Register};
use crate::ops::OPERATION_NAMES;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WebAssembly-friendly operation wrapper.
#[wasm_bindgen]
pub struct WasmOperation {
    op: Operation,
}

#[wasm_bindgen]
impl WasmOperation {
    /// Parse an operation from its name, e.g. "AddConstantModN(3, 5)".
    #[wasm_bindgen(constructor)]
    pub fn new(name: &str) -> Result<WasmOperation, JsError> {
        let op = name.parse::<Operation>()
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { op })
    }

    /// Canonical display name.
    #[wasm_bindgen]
    pub fn name(&self) -> String {
        self.op.name()
    }

    #[wasm_bindgen]
    pub fn is_invertible(&self) -> bool {
        self.op.is_invertible()
    }

    /// The inverse operation, or an error if none is declared.
    #[wasm_bindgen]
    pub fn inverse(&self) -> Result<WasmOperation, JsError> {
        let op = self.op.inverse()
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { op })
    }

    /// Apply to registers given as parallel width and value arrays.
    /// Returns the new values, wrapped to each register's width.
    #[wasm_bindgen]
    pub fn apply(&self, widths: Vec<u32>, values: Vec<u64>) -> Result<Vec<u64>, JsError> {
        if widths.len() != values.len() {
            return Err(JsError::new(&format!(
                "{} widths but {} values", widths.len(), values.len()
            )));
        }

        let regs = widths.iter()
            .zip(&values)
            .map(|(&w, &v)| Register::new(w, v))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| JsError::new(&e.to_string()))?;

        let out = self.op.apply(&regs)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(out.iter().map(Register::value).collect())
    }

    /// JSON string form, as produced by serde.
    #[wasm_bindgen]
    pub fn to_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.op).map_err(|e| JsError::new(&e.to_string()))
    }
}

/// Canonical names of every operation kind.
#[wasm_bindgen]
pub fn wasm_operation_names() -> Vec<String> {
    OPERATION_NAMES.iter().map(|s| s.to_string()).collect()
}
