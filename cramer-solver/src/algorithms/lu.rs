use cramer_core::{CramerCoreError, SquareMatrix};
use num_traits::Float;

use crate::algorithms::{DeterminantAlgorithm, LuDecomposition};

impl<T: Float + std::fmt::Debug + Default> DeterminantAlgorithm<SquareMatrix<T>>
    for LuDecomposition
{
    type Value = T;

    fn name(&self) -> &'static str {
        "lu"
    }

    fn determinant(&self, a: &SquareMatrix<T>) -> Result<T, CramerCoreError> {
        self.validate_input(a)?;
        let n = a.order();
        let tolerance = T::from(self.pivot_tolerance).unwrap_or_else(T::zero);
        let mut u = a.to_rows();
        let mut sign = T::one();

        for k in 0..n {
            // Partial pivoting: bring the largest remaining entry of column k up to row k
            let mut pivot_row = k;
            for r in (k + 1)..n {
                if u[r][k].abs() > u[pivot_row][k].abs() {
                    pivot_row = r;
                }
            }
            if u[pivot_row][k].abs() <= tolerance {
                log::trace!("LU: no usable pivot in column {}, determinant is zero", k);
                return Ok(T::zero());
            }
            if pivot_row != k {
                u.swap(pivot_row, k);
                sign = -sign;
            }

            let pivot = u[k][k];
            for r in (k + 1)..n {
                let factor = u[r][k] / pivot;
                if factor == T::zero() {
                    continue;
                }
                for c in k..n {
                    let delta = factor * u[k][c];
                    u[r][c] = u[r][c] - delta;
                }
            }
        }

        let diagonal = (0..n).fold(T::one(), |product, i| product * u[i][i]);
        Ok(sign * diagonal)
    }
}
