use cramer_core::{CramerCoreError, SquareMatrix};
use num_traits::Float;

use crate::algorithms::{Adaptive, CofactorExpansion, DeterminantAlgorithm};

impl<T: Float + std::fmt::Debug + Default> DeterminantAlgorithm<SquareMatrix<T>> for Adaptive {
    type Value = T;

    fn name(&self) -> &'static str {
        "adaptive"
    }

    fn determinant(&self, a: &SquareMatrix<T>) -> Result<T, CramerCoreError> {
        if a.order() <= self.cofactor_max_order {
            CofactorExpansion.determinant(a)
        } else {
            log::debug!(
                "Order {} exceeds cofactor limit {}, using LU decomposition",
                a.order(),
                self.cofactor_max_order
            );
            self.lu.determinant(a)
        }
    }
}
