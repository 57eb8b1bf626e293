use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CramerCoreError {
    #[error("Invalid matrix dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Unsupported matrix size {0}: supported sizes are 0, 2, 3 and 4")]
    UnsupportedSize(usize),

    /// A raw cell was blank. Row and column are zero-based; the message is 1-based.
    #[error("Please fill in all fields (row {}, column {} is empty)", .row + 1, .col + 1)]
    EmptyCell { row: usize, col: usize },

    #[error("Cell at row {}, column {} is not a number: {value:?}", .row + 1, .col + 1)]
    NonNumericCell {
        row: usize,
        col: usize,
        value: String,
    },

    #[error("Matrix values must be finite, got {value} at row {}, column {}", .row + 1, .col + 1)]
    NonFiniteValue { row: usize, col: usize, value: f64 },

    #[error("Index ({row}, {col}) out of bounds for a {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

impl CramerCoreError {
    /// True for the errors a user can fix by editing the input cells.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CramerCoreError::EmptyCell { .. } | CramerCoreError::NonNumericCell { .. }
        )
    }
}

#[cfg(feature = "wasm")]
impl From<CramerCoreError> for wasm_bindgen::JsValue {
    fn from(err: CramerCoreError) -> Self {
        Self::from_str(&err.to_string())
    }
}
