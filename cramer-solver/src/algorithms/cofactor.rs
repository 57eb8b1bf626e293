use cramer_core::{determinant, CramerCoreError, SquareMatrix};
use num_traits::Float;

use crate::algorithms::{CofactorExpansion, DeterminantAlgorithm};

impl<T: Float + std::fmt::Debug + Default> DeterminantAlgorithm<SquareMatrix<T>>
    for CofactorExpansion
{
    type Value = T;

    fn name(&self) -> &'static str {
        "cofactor"
    }

    fn determinant(&self, a: &SquareMatrix<T>) -> Result<T, CramerCoreError> {
        // SquareMatrix is square and non-empty by construction; kept for other callers of the trait
        self.validate_input(a)?;
        Ok(determinant(a))
    }
}
