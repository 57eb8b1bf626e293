//! `cramer-solver`: determinant algorithms and Cramer's rule for small dense systems.
//!
//! This library solves systems of linear equations of the form Ax = b given as an
//! augmented matrix, reporting every intermediate determinant alongside the solution.

// Core modules
pub mod algorithms;
pub mod cramer;

pub use cramer::{
    CramerOutcome, CramerSolver, DeterminantTrace, SolutionVector, VariableDeterminant, ZeroCheck,
};

// Re-export from cramer_core
pub use cramer_core::{
    AugmentedMatrix, CellPolicy, CramerCoreError, Matrix, MatrixSize, SquareMatrix,
};
