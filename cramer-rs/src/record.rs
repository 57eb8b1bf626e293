use cramer_core::{AugmentedMatrix, MatrixSize};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// What gets persisted under a name: `{"size": n, "matrix": [[...], ...]}`.
///
/// Fields are kept raw so that any JSON of this shape decodes; `into_matrix` does the checking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMatrixRecord {
    pub size: usize,
    pub matrix: Vec<Vec<f64>>,
}

impl SavedMatrixRecord {
    pub fn from_matrix(matrix: &AugmentedMatrix) -> Self {
        Self {
            size: matrix.order(),
            matrix: matrix.as_rows().to_vec(),
        }
    }

    /// Decodes stored text, reporting anything that is not a record as corrupt.
    pub fn decode(name: &str, text: &str) -> Result<Self, StoreError> {
        serde_json::from_str(text).map_err(|err| StoreError::Corrupt {
            name: name.to_string(),
            reason: err.to_string(),
        })
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Checks that `size` is supported and agrees with the rows.
    pub fn into_matrix(self, name: &str) -> Result<AugmentedMatrix, StoreError> {
        let corrupt = |reason: String| StoreError::Corrupt {
            name: name.to_string(),
            reason,
        };
        let size = MatrixSize::try_from(self.size).map_err(|err| corrupt(err.to_string()))?;
        if self.matrix.len() != size.order() {
            return Err(corrupt(format!(
                "size {} but {} rows",
                self.size,
                self.matrix.len()
            )));
        }
        AugmentedMatrix::from_rows(self.matrix).map_err(|err| corrupt(err.to_string()))
    }
}

impl From<&AugmentedMatrix> for SavedMatrixRecord {
    fn from(matrix: &AugmentedMatrix) -> Self {
        Self::from_matrix(matrix)
    }
}
