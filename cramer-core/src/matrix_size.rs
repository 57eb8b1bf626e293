use std::fmt;

use serde::{Deserialize, Serialize};
#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

use crate::error::CramerCoreError;

const VARIABLE_NAMES: [&str; 4] = ["X", "Y", "Z", "W"];
const COLUMN_LABELS: [&str; 4] = ["x", "y", "z", "w"];

/// Number of unknowns in a system. Only the sizes offered to users are representable;
/// `Empty` is the no-op system shown before a size is picked.
#[cfg_attr(feature = "wasm", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum MatrixSize {
    #[default]
    Empty = 0,
    Two = 2,
    Three = 3,
    Four = 4,
}

impl MatrixSize {
    pub const SUPPORTED: [MatrixSize; 4] = [
        MatrixSize::Empty,
        MatrixSize::Two,
        MatrixSize::Three,
        MatrixSize::Four,
    ];

    /// Number of equations (and unknowns).
    pub fn order(self) -> usize {
        self as usize
    }

    /// Number of columns of the augmented matrix, constants included.
    pub fn augmented_cols(self) -> usize {
        match self {
            MatrixSize::Empty => 0,
            size => size.order() + 1,
        }
    }

    /// Number of raw cells the augmented matrix holds.
    pub fn cell_count(self) -> usize {
        self.order() * self.augmented_cols()
    }

    pub fn is_empty(self) -> bool {
        self == MatrixSize::Empty
    }

    /// Display names of the unknowns, in column order.
    pub fn variable_names(self) -> &'static [&'static str] {
        &VARIABLE_NAMES[..self.order()]
    }

    /// Header labels for the input grid: one per unknown plus `constant`.
    pub fn column_labels(self) -> Vec<&'static str> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut labels = COLUMN_LABELS[..self.order()].to_vec();
        labels.push("constant");
        labels
    }
}

impl TryFrom<usize> for MatrixSize {
    type Error = CramerCoreError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MatrixSize::Empty),
            2 => Ok(MatrixSize::Two),
            3 => Ok(MatrixSize::Three),
            4 => Ok(MatrixSize::Four),
            other => Err(CramerCoreError::UnsupportedSize(other)),
        }
    }
}

impl From<MatrixSize> for usize {
    fn from(size: MatrixSize) -> Self {
        size.order()
    }
}

impl fmt::Display for MatrixSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixSize::Empty => write!(f, "none"),
            size => write!(f, "{0}x{0}", size.order()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_sizes_round_trip_through_usize() {
        for size in MatrixSize::SUPPORTED {
            assert_eq!(MatrixSize::try_from(size.order()), Ok(size));
        }
    }

    #[test]
    fn test_size_one_and_five_are_rejected() {
        assert_eq!(
            MatrixSize::try_from(1),
            Err(CramerCoreError::UnsupportedSize(1))
        );
        assert_eq!(
            MatrixSize::try_from(5),
            Err(CramerCoreError::UnsupportedSize(5))
        );
    }

    #[test]
    fn test_labels_follow_order() {
        assert!(MatrixSize::Empty.column_labels().is_empty());
        assert_eq!(MatrixSize::Two.column_labels(), vec!["x", "y", "constant"]);
        assert_eq!(
            MatrixSize::Four.column_labels(),
            vec!["x", "y", "z", "w", "constant"]
        );
        assert_eq!(MatrixSize::Three.variable_names(), &["X", "Y", "Z"]);
    }

    #[test]
    fn test_cell_count() {
        assert_eq!(MatrixSize::Empty.cell_count(), 0);
        assert_eq!(MatrixSize::Two.cell_count(), 6);
        assert_eq!(MatrixSize::Four.cell_count(), 20);
    }

    #[test]
    fn test_serde_uses_plain_integer() {
        let json = serde_json::to_string(&MatrixSize::Three).unwrap();
        assert_eq!(json, "3");
        let size: MatrixSize = serde_json::from_str("2").unwrap();
        assert_eq!(size, MatrixSize::Two);
        assert!(serde_json::from_str::<MatrixSize>("1").is_err());
    }
}
