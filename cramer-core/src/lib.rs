//! # Cramer Core Library
//!
//! Matrix state and the reference determinant for small linear systems.

// Declare modules
pub mod augmented_matrix;
pub mod determinant;
pub mod error;
pub mod matrix_size;
pub mod square_matrix;
pub mod traits;

// Re-export public types
pub use augmented_matrix::{parse_cell, validate_cells, AugmentedMatrix, CellPolicy};
pub use determinant::determinant;
pub use error::CramerCoreError;
pub use matrix_size::MatrixSize;
pub use square_matrix::SquareMatrix;

pub use traits::Matrix;
