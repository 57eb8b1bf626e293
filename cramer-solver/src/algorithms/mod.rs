use cramer_core::{CramerCoreError, Matrix};
use num_traits::Float;

// --- Algorithm Trait Definition ---
/// Trait representing a way of computing the determinant of a square matrix.
/// Generic over the Matrix type it supports.
pub trait DeterminantAlgorithm<M: Matrix> {
    /// The numeric type the algorithm operates on (e.g., f32, f64).
    /// Must match the Matrix::Value type.
    type Value: Float + Copy + std::fmt::Debug + Default;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Computes det(a).
    ///
    /// # Errors
    ///
    /// Returns `CramerCoreError::InvalidDimensions` if `a` is not square or is empty.
    fn determinant(&self, a: &M) -> Result<Self::Value, CramerCoreError>;

    // Helper for input validation, can be called by implementations.
    fn validate_input(&self, a: &M) -> Result<(), CramerCoreError> {
        let (rows, cols) = a.dims();
        if !a.is_square() {
            return Err(CramerCoreError::InvalidDimensions(format!(
                "Matrix must be square (dims: {}x{})",
                rows, cols
            )));
        }
        if rows == 0 {
            return Err(CramerCoreError::InvalidDimensions(
                "Determinant of an empty matrix is undefined".to_string(),
            ));
        }
        Ok(())
    }
}

// --- Algorithm Implementations ---

pub mod adaptive; // Cofactor expansion for small orders, LU above
pub mod cofactor; // Recursive cofactor expansion along row 0
pub mod lu; // LU decomposition with partial pivoting

// --- Algorithm Struct Definitions ---
// Define structs that represent specific algorithms and hold their parameters.

/// Recursive cofactor expansion along the first row.
/// The reference algorithm: per-variable determinants shown to users come from it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CofactorExpansion;

/// Gaussian elimination with partial pivoting; det = sign(P) * prod(diag(U)).
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    /// A pivot whose magnitude is at or below this is treated as zero, making det(A) = 0.
    pub pivot_tolerance: f64,
}

impl Default for LuDecomposition {
    fn default() -> Self {
        Self {
            pivot_tolerance: 0.0, // Only an exactly zero column is singular
        }
    }
}

impl LuDecomposition {
    /// Creates a new instance of the LU algorithm with default parameters.
    pub fn new() -> Self {
        Self::default()
    }
    /// Creates a new instance of the LU algorithm with the given pivot tolerance.
    pub fn with_pivot_tolerance(pivot_tolerance: f64) -> Self {
        Self { pivot_tolerance }
    }
}

/// Cofactor expansion up to `cofactor_max_order`, LU decomposition for larger matrices.
#[derive(Debug, Clone)]
pub struct Adaptive {
    pub cofactor_max_order: usize,
    pub lu: LuDecomposition,
}

impl Default for Adaptive {
    fn default() -> Self {
        Self {
            cofactor_max_order: 4, // Largest system offered to users
            lu: LuDecomposition::default(),
        }
    }
}

impl Adaptive {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_cofactor_max_order(cofactor_max_order: usize) -> Self {
        Self {
            cofactor_max_order,
            ..Self::default()
        }
    }
}
