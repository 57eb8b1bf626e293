mod store_error;

pub use store_error::StoreError;
use derive_more::From;

use cramer_core::error::CramerCoreError;

pub type Result<T> = core::result::Result<T, CramerError>;

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[derive(Debug, From)]
pub enum CramerError {
    // -- Externals
    #[from]
    Json(serde_json::Error),

    #[from]
    Store(StoreError),

    #[from]
    CramerCoreError(CramerCoreError),
}

impl CramerError {
    /// The input failed the blank-cell (or strict numeric) rule.
    pub fn is_validation(&self) -> bool {
        matches!(self, CramerError::CramerCoreError(err) if err.is_validation())
    }
}

// region:    --- Error Boilerplate

impl core::fmt::Display for CramerError {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        match self {
            CramerError::Store(err) => write!(fmt, "{err}"),
            CramerError::CramerCoreError(err) => write!(fmt, "{err}"),
            CramerError::Json(err) => write!(fmt, "JSON error: {err}"),
        }
    }
}

impl std::error::Error for CramerError {}

// endregion: --- Error Boilerplate

// Convert custom error to JsValue for WASM boundary
#[cfg(feature = "wasm")]
impl From<CramerError> for JsValue {
    fn from(err: CramerError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_has_a_source_conversion() {
        let json = serde_json::from_str::<Vec<f64>>("[1,").unwrap_err();
        assert!(CramerError::from(json).to_string().starts_with("JSON error:"));

        let store = CramerError::from(StoreError::NotFound("mine".to_string()));
        assert_eq!(store.to_string(), "No matrix found with the name \"mine\"");
        assert!(!store.is_validation());

        let core = CramerError::from(CramerCoreError::EmptyCell { row: 0, col: 1 });
        assert!(core.is_validation());
    }
}
