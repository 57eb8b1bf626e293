use std::ops::Index;

use num_traits::Float;

use crate::error::CramerCoreError;
use crate::traits::Matrix;

/// Represents a dense n×n matrix (n ≥ 1) stored in row-major order on the CPU.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix<T: Float + std::fmt::Debug + Default = f64> {
    order: usize,
    data: Vec<T>, // Data stored row-major: data[row * order + col]
}

impl<T: Float + std::fmt::Debug + Default> SquareMatrix<T> {
    /// Creates a new SquareMatrix from raw row-major data.
    pub fn new(order: usize, data: Vec<T>) -> Result<Self, CramerCoreError> {
        if order == 0 {
            return Err(CramerCoreError::InvalidDimensions(
                "A square matrix needs at least one row".to_string(),
            ));
        }
        if data.len() != order * order {
            return Err(CramerCoreError::InvalidDimensions(format!(
                "Data length ({}) does not match dimensions ({}x{})",
                data.len(),
                order,
                order
            )));
        }
        Ok(Self { order, data })
    }

    /// Creates a SquareMatrix from nested rows, checking every row has `rows.len()` entries.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, CramerCoreError> {
        let order = rows.len();
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != order) {
            return Err(CramerCoreError::InvalidDimensions(format!(
                "Row {} has {} entries, expected {} for a square matrix",
                index,
                row.len(),
                order
            )));
        }
        Self::new(order, rows.iter().flatten().copied().collect())
    }

    /// The n×n identity matrix.
    pub fn identity(order: usize) -> Result<Self, CramerCoreError> {
        let mut data = vec![T::zero(); order * order];
        for i in 0..order {
            data[i * order + i] = T::one();
        }
        Self::new(order, data)
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns a slice view of the underlying data vector.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns row `row` as a slice.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row < self.order {
            Some(&self.data[row * self.order..(row + 1) * self.order])
        } else {
            None
        }
    }

    /// Gets the element at the specified row and column.
    /// Returns None if indices are out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row < self.order && col < self.order {
            self.data.get(row * self.order + col).copied()
        } else {
            None
        }
    }

    /// The submatrix left after deleting `row` and `col`.
    pub fn minor(&self, row: usize, col: usize) -> Result<Self, CramerCoreError> {
        if row >= self.order || col >= self.order {
            return Err(self.out_of_bounds(row, col));
        }
        if self.order < 2 {
            return Err(CramerCoreError::InvalidDimensions(
                "A 1x1 matrix has no minors".to_string(),
            ));
        }
        Ok(self.minor_unchecked(row, col))
    }

    /// Caller guarantees `order >= 2` and both indices are in range.
    pub(crate) fn minor_unchecked(&self, row: usize, col: usize) -> Self {
        let order = self.order - 1;
        let mut data = Vec::with_capacity(order * order);
        for r in (0..self.order).filter(|&r| r != row) {
            for c in (0..self.order).filter(|&c| c != col) {
                data.push(self.data[r * self.order + c]);
            }
        }
        Self { order, data }
    }

    /// A copy of this matrix with column `col` replaced by `values`.
    pub fn with_column(&self, col: usize, values: &[T]) -> Result<Self, CramerCoreError> {
        if col >= self.order {
            return Err(self.out_of_bounds(0, col));
        }
        if values.len() != self.order {
            return Err(CramerCoreError::InvalidDimensions(format!(
                "Replacement column has {} entries, expected {}",
                values.len(),
                self.order
            )));
        }
        let mut data = self.data.clone();
        for (row, value) in values.iter().enumerate() {
            data[row * self.order + col] = *value;
        }
        Ok(Self {
            order: self.order,
            data,
        })
    }

    /// Swaps two rows in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<(), CramerCoreError> {
        if a >= self.order || b >= self.order {
            return Err(self.out_of_bounds(a.max(b), 0));
        }
        if a != b {
            for col in 0..self.order {
                self.data.swap(a * self.order + col, b * self.order + col);
            }
        }
        Ok(())
    }

    /// Nested-row copy, the shape the presentation layer works with.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.data.chunks(self.order).map(<[T]>::to_vec).collect()
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> CramerCoreError {
        CramerCoreError::IndexOutOfBounds {
            row,
            col,
            rows: self.order,
            cols: self.order,
        }
    }
}

impl<T: Float + std::fmt::Debug + Default> Index<(usize, usize)> for SquareMatrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(col < self.order, "column {col} out of bounds");
        &self.data[row * self.order + col]
    }
}

// Implement the generic Matrix trait
impl<T: Float + std::fmt::Debug + Default> Matrix for SquareMatrix<T> {
    type Value = T;

    fn dims(&self) -> (usize, usize) {
        (self.order, self.order)
    }
}
