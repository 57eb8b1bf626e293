//! Browser bindings. Structured results cross the boundary as JSON text.

use cramer_core::{CellPolicy, MatrixSize};
use wasm_bindgen::prelude::*;

use crate::error::CramerError;
use crate::session::Session;
use crate::store::LocalStorageStore;

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|err| CramerError::from(err).into())
}

#[wasm_bindgen]
pub struct WasmSession {
    session: Session,
    rng: fastrand::Rng,
}

#[wasm_bindgen]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmSession {
        WasmSession {
            session: Session::new(),
            rng: fastrand::Rng::new(),
        }
    }

    /// Opt into rejecting non-numeric text instead of reading it as 0.
    #[wasm_bindgen(js_name = setStrict)]
    pub fn set_strict(&mut self, strict: bool) {
        let policy = if strict {
            CellPolicy::Strict
        } else {
            CellPolicy::Lenient
        };
        self.session.set_policy(policy);
    }

    pub fn size(&self) -> usize {
        self.session.size().order()
    }

    #[wasm_bindgen(js_name = setSize)]
    pub fn set_size(&mut self, size: usize) -> Result<(), JsValue> {
        let size = MatrixSize::try_from(size).map_err(CramerError::from)?;
        self.session.set_size(size);
        Ok(())
    }

    /// Column headers for the current size, e.g. `["x", "y", "constant"]`.
    #[wasm_bindgen(js_name = columnLabels)]
    pub fn column_labels(&self) -> Vec<String> {
        self.session
            .size()
            .column_labels()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn cells(&self) -> Vec<String> {
        self.session.cells().to_vec()
    }

    #[wasm_bindgen(js_name = setCell)]
    pub fn set_cell(&mut self, row: usize, col: usize, text: String) -> Result<(), JsValue> {
        Ok(self.session.set_cell(row, col, text)?)
    }

    /// `SolveReport` as JSON.
    pub fn solve(&self) -> Result<String, JsValue> {
        to_json(&self.session.solve()?)
    }

    /// `DeterminantsReport` as JSON.
    pub fn determinants(&self) -> Result<String, JsValue> {
        to_json(&self.session.determinants()?)
    }

    pub fn randomize(&mut self) {
        self.session.randomize(&mut self.rng);
    }

    pub fn save(&self, name: &str) -> Result<(), JsValue> {
        let mut store = LocalStorageStore::new().map_err(CramerError::from)?;
        Ok(self.session.save(&mut store, name)?)
    }

    /// Returns the loaded size. On a missing or corrupt record the session is already reset to size 0.
    pub fn load(&mut self, name: &str) -> Result<usize, JsValue> {
        let store = LocalStorageStore::new().map_err(CramerError::from)?;
        Ok(self.session.load(&store, name)?.order())
    }
}

impl Default for WasmSession {
    fn default() -> Self {
        Self::new()
    }
}
