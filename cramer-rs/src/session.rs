use cramer_core::{AugmentedMatrix, CellPolicy, CramerCoreError, MatrixSize};
use cramer_solver::{CramerOutcome, CramerSolver, DeterminantTrace};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::narration::{Narration, describe_determinants, narrate};
use crate::record::SavedMatrixRecord;
use crate::store::{self, MatrixStore};

/// Everything the presentation layer shows after "Solve".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    pub outcome: CramerOutcome,
    pub narration: Narration,
}

/// Everything the presentation layer shows after "Determinants".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeterminantsReport {
    pub trace: DeterminantTrace,
    pub lines: Vec<String>,
}

/// The active computation context. Owns the raw cell text of the input grid;
/// changing the size throws the old grid away.
#[derive(Debug, Clone)]
pub struct Session {
    size: MatrixSize,
    cells: Vec<String>,
    policy: CellPolicy,
    solver: CramerSolver,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            size: MatrixSize::Empty,
            cells: Vec::new(),
            policy: CellPolicy::default(),
            solver: CramerSolver::cofactor(),
        }
    }

    pub fn with_policy(mut self, policy: CellPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_solver(mut self, solver: CramerSolver) -> Self {
        self.solver = solver;
        self
    }

    pub fn size(&self) -> MatrixSize {
        self.size
    }

    /// Rebuilds the grid for `size` with every cell set to `"0"`.
    pub fn set_size(&mut self, size: MatrixSize) {
        log::debug!("Session size {} -> {}", self.size, size);
        self.size = size;
        self.cells = vec!["0".to_string(); size.cell_count()];
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.index_of(row, col)
            .map(|index| self.cells[index].as_str())
    }

    pub fn set_cell(&mut self, row: usize, col: usize, text: impl Into<String>) -> Result<()> {
        let index = self
            .index_of(row, col)
            .ok_or(CramerCoreError::IndexOutOfBounds {
                row,
                col,
                rows: self.size.order(),
                cols: self.size.augmented_cols(),
            })?;
        self.cells[index] = text.into();
        Ok(())
    }

    /// Replaces the whole grid with raw row-major text for a system of `size`.
    pub fn set_cells(&mut self, size: MatrixSize, cells: Vec<String>) -> Result<()> {
        if cells.len() != size.cell_count() {
            return Err(CramerCoreError::InvalidDimensions(format!(
                "Expected {} cells for a {} system, got {}",
                size.cell_count(),
                size,
                cells.len()
            ))
            .into());
        }
        self.size = size;
        self.cells = cells;
        Ok(())
    }

    pub fn set_policy(&mut self, policy: CellPolicy) {
        self.policy = policy;
    }

    /// Replaces the whole grid with values from `matrix`, adopting its size.
    pub fn set_matrix(&mut self, matrix: &AugmentedMatrix) {
        self.size = matrix.size();
        self.cells = matrix.to_cells();
    }

    /// Validates and parses the grid.
    pub fn read_matrix(&self) -> Result<AugmentedMatrix> {
        Ok(AugmentedMatrix::read_with(
            self.size,
            &self.cells,
            self.policy,
        )?)
    }

    /// Parses the grid without validation; blank and unparseable cells become 0.
    pub fn parse_matrix(&self) -> Result<AugmentedMatrix> {
        Ok(AugmentedMatrix::parse(self.size, &self.cells)?)
    }

    pub fn determinants(&self) -> Result<DeterminantsReport> {
        let matrix = self.read_matrix()?;
        let trace = self.solver.compute_determinants(&matrix)?;
        let lines = describe_determinants(&trace);
        Ok(DeterminantsReport { trace, lines })
    }

    pub fn solve(&self) -> Result<SolveReport> {
        let matrix = self.read_matrix()?;
        let outcome = self.solver.solve(&matrix)?;
        let narration = narrate(&outcome);
        Ok(SolveReport { outcome, narration })
    }

    /// Fills every cell with a value drawn uniformly from [-10, 10), two decimals.
    pub fn randomize(&mut self, rng: &mut fastrand::Rng) {
        for cell in &mut self.cells {
            *cell = format!("{:.2}", rng.f64() * 20.0 - 10.0);
        }
    }

    /// Saves whatever is in the grid; blank and unparseable cells are stored as 0.
    pub fn save(&self, store: &mut impl MatrixStore, name: &str) -> Result<()> {
        let matrix = self.parse_matrix()?;
        store::save(store, name, &SavedMatrixRecord::from_matrix(&matrix))?;
        Ok(())
    }

    /// Replaces the grid with the record stored under `name`.
    ///
    /// A missing or corrupt record resets the session to the empty system before the
    /// error is returned.
    pub fn load(&mut self, store: &impl MatrixStore, name: &str) -> Result<MatrixSize> {
        let loaded = store::load(store, name).and_then(|record| record.into_matrix(name));
        match loaded {
            Ok(matrix) => {
                self.set_matrix(&matrix);
                Ok(self.size)
            }
            Err(err) => {
                if err.resets_session() {
                    log::warn!("Load of \"{}\" failed, resetting session: {}", name, err);
                    self.set_size(MatrixSize::Empty);
                }
                Err(err.into())
            }
        }
    }

    fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        let cols = self.size.augmented_cols();
        (row < self.size.order() && col < cols).then_some(row * cols + col)
    }
}

/// Names stored so far, for a "load" picker.
pub fn saved_names(store: &impl MatrixStore) -> std::result::Result<Vec<String>, StoreError> {
    store.names()
}
