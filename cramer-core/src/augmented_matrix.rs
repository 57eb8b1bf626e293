use serde::{Deserialize, Serialize};

use crate::error::CramerCoreError;
use crate::matrix_size::MatrixSize;
use crate::square_matrix::SquareMatrix;
use crate::traits::Matrix;

/// How `read_with` treats non-blank text that is not a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellPolicy {
    /// Non-numeric text becomes 0, as the input grid has always behaved.
    #[default]
    Lenient,
    /// Non-numeric text is a validation error, like a blank cell.
    Strict,
}

/// An n×(n+1) linear system: coefficients in columns `0..n`, the constant in column `n`.
///
/// Every value is finite and every row has `n + 1` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct AugmentedMatrix {
    size: MatrixSize,
    rows: Vec<Vec<f64>>,
}

impl AugmentedMatrix {
    /// A zero-filled system of the given size.
    pub fn build(size: MatrixSize) -> Self {
        Self {
            size,
            rows: vec![vec![0.0; size.augmented_cols()]; size.order()],
        }
    }

    /// Checks the shape and values of `rows` and infers the size from the row count.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, CramerCoreError> {
        let size = MatrixSize::try_from(rows.len())?;
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != size.augmented_cols() {
                return Err(CramerCoreError::InvalidDimensions(format!(
                    "Row {} has {} entries, expected {} for a {} system",
                    row_index,
                    row.len(),
                    size.augmented_cols(),
                    size
                )));
            }
            if let Some((col, &value)) = row.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(CramerCoreError::NonFiniteValue {
                    row: row_index,
                    col,
                    value,
                });
            }
        }
        Ok(Self { size, rows })
    }

    /// Validates and parses raw row-major cell text with the lenient policy.
    ///
    /// Any blank cell fails the whole read; unparseable text silently becomes 0.
    pub fn read<S: AsRef<str>>(size: MatrixSize, cells: &[S]) -> Result<Self, CramerCoreError> {
        Self::read_with(size, cells, CellPolicy::Lenient)
    }

    pub fn read_with<S: AsRef<str>>(
        size: MatrixSize,
        cells: &[S],
        policy: CellPolicy,
    ) -> Result<Self, CramerCoreError> {
        validate_cells(size, cells)?;
        if policy == CellPolicy::Strict {
            let cols = size.augmented_cols();
            for (index, cell) in cells.iter().enumerate() {
                let text = cell.as_ref().trim();
                if parse_number(text).is_none() {
                    return Err(CramerCoreError::NonNumericCell {
                        row: index / cols,
                        col: index % cols,
                        value: text.to_string(),
                    });
                }
            }
        }
        Self::parse(size, cells)
    }

    /// Parses raw cells without the blank check; blank and unparseable cells become 0.
    pub fn parse<S: AsRef<str>>(size: MatrixSize, cells: &[S]) -> Result<Self, CramerCoreError> {
        check_cell_count(size, cells.len())?;
        let values: Vec<f64> = cells.iter().map(|cell| parse_cell(cell.as_ref())).collect();
        let rows = if size.is_empty() {
            Vec::new()
        } else {
            values
                .chunks(size.augmented_cols())
                .map(<[f64]>::to_vec)
                .collect()
        };
        log::trace!("Parsed {} cells into a {} system", cells.len(), size);
        Ok(Self { size, rows })
    }

    pub fn size(&self) -> MatrixSize {
        self.size
    }

    pub fn order(&self) -> usize {
        self.size.order()
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// The rows, constants included.
    pub fn as_rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), CramerCoreError> {
        let (rows, cols) = self.dims();
        if !value.is_finite() {
            return Err(CramerCoreError::NonFiniteValue { row, col, value });
        }
        match self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(CramerCoreError::IndexOutOfBounds {
                row,
                col,
                rows,
                cols,
            }),
        }
    }

    /// The coefficient matrix, i.e. every column but the last.
    pub fn coefficients(&self) -> Result<SquareMatrix, CramerCoreError> {
        let n = self.order();
        let data = self
            .rows
            .iter()
            .flat_map(|row| row[..n].iter().copied())
            .collect();
        SquareMatrix::new(n, data)
    }

    /// The constants column.
    pub fn constants(&self) -> Vec<f64> {
        let n = self.order();
        self.rows.iter().map(|row| row[n]).collect()
    }

    /// The coefficient matrix with column `col` replaced by the constants.
    pub fn with_constants_in_column(&self, col: usize) -> Result<SquareMatrix, CramerCoreError> {
        self.coefficients()?.with_column(col, &self.constants())
    }

    /// Row-major text for every cell, the inverse of `read` for finite values.
    pub fn to_cells(&self) -> Vec<String> {
        self.rows
            .iter()
            .flatten()
            .map(|value| value.to_string())
            .collect()
    }
}

impl Matrix for AugmentedMatrix {
    type Value = f64;

    fn dims(&self) -> (usize, usize) {
        (self.size.order(), self.size.augmented_cols())
    }
}

impl TryFrom<Vec<Vec<f64>>> for AugmentedMatrix {
    type Error = CramerCoreError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<AugmentedMatrix> for Vec<Vec<f64>> {
    fn from(matrix: AugmentedMatrix) -> Self {
        matrix.rows
    }
}

/// Rejects the read if any cell is blank. This is the only input rule.
pub fn validate_cells<S: AsRef<str>>(size: MatrixSize, cells: &[S]) -> Result<(), CramerCoreError> {
    check_cell_count(size, cells.len())?;
    let cols = size.augmented_cols().max(1);
    match cells.iter().position(|cell| cell.as_ref().trim().is_empty()) {
        Some(index) => Err(CramerCoreError::EmptyCell {
            row: index / cols,
            col: index % cols,
        }),
        None => Ok(()),
    }
}

/// Parses one raw cell from its longest numeric prefix, so "12abc" reads as 12 and "3 4" as 3.
///
/// Text with no numeric prefix, or a prefix that overflows to infinity, reads as 0.
pub fn parse_cell(raw: &str) -> f64 {
    let text = raw.trim_start();
    parse_number(numeric_prefix(text)).unwrap_or(0.0)
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// `[+-]digits[.digits][(e|E)[+-]digits]`; an incomplete exponent is left out.
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return "";
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    &text[..end]
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn check_cell_count(size: MatrixSize, count: usize) -> Result<(), CramerCoreError> {
    if count != size.cell_count() {
        return Err(CramerCoreError::InvalidDimensions(format!(
            "Expected {} cells for a {} system, got {}",
            size.cell_count(),
            size,
            count
        )));
    }
    Ok(())
}
