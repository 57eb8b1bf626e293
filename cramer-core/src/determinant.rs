//! Reference determinant: recursive cofactor expansion along the first row.
//!
//! Factorial in the order of the matrix, which is fine for the 2x2 to 4x4 systems users enter.
//! The sign of each term alternates starting at `+` for column 0; per-variable determinants
//! reported to users are computed with exactly this expansion.

use num_traits::Float;

use crate::square_matrix::SquareMatrix;

/// Determinant of `matrix` by cofactor expansion along row 0.
///
/// Total for every `SquareMatrix`, since the type cannot be empty.
pub fn determinant<T: Float + std::fmt::Debug + Default>(matrix: &SquareMatrix<T>) -> T {
    let n = matrix.order();
    match n {
        1 => matrix[(0, 0)],
        2 => matrix[(0, 0)] * matrix[(1, 1)] - matrix[(0, 1)] * matrix[(1, 0)],
        _ => {
            let mut det = T::zero();
            for j in 0..n {
                let minor = matrix.minor_unchecked(0, j);
                let term = matrix[(0, j)] * determinant(&minor);
                det = if j % 2 == 0 { det + term } else { det - term };
            }
            det
        }
    }
}
