use cramer_core::{AugmentedMatrix, CramerCoreError, MatrixSize, SquareMatrix};
use serde::{Deserialize, Serialize};

use crate::algorithms::{CofactorExpansion, DeterminantAlgorithm};

/// How the solver decides that the main determinant is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ZeroCheck {
    /// `det == 0.0`, no tolerance.
    #[default]
    Exact,
    /// `|det| <= eps`.
    Tolerance(f64),
}

impl ZeroCheck {
    pub fn is_zero(&self, value: f64) -> bool {
        match *self {
            ZeroCheck::Exact => value == 0.0,
            ZeroCheck::Tolerance(eps) => value.abs() <= eps,
        }
    }
}

/// Determinant of the coefficient matrix with one variable's column replaced by the constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeterminant {
    pub index: usize,
    pub name: String,
    pub value: f64,
}

/// Every determinant Cramer's rule needs: det(A) and det(A_i) for each variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeterminantTrace {
    pub main: f64,
    pub variables: Vec<VariableDeterminant>,
}

impl DeterminantTrace {
    /// The trace of the empty system: no variables and a zero determinant.
    pub fn empty() -> Self {
        Self {
            main: 0.0,
            variables: Vec::new(),
        }
    }

    pub fn variable(&self, index: usize) -> Option<&VariableDeterminant> {
        self.variables.get(index)
    }
}

/// One value per variable, in column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionVector {
    size: MatrixSize,
    values: Vec<f64>,
}

impl SolutionVector {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(name, value)` pairs, e.g. `("X", 5.0)`.
    pub fn iter_named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.size
            .variable_names()
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// Result of `CramerSolver::solve`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CramerOutcome {
    Unique {
        trace: DeterminantTrace,
        solution: SolutionVector,
    },
    /// det(A) is zero: the system is inconsistent or has infinitely many solutions.
    NoUniqueSolution { trace: DeterminantTrace },
}

impl CramerOutcome {
    pub fn trace(&self) -> &DeterminantTrace {
        match self {
            CramerOutcome::Unique { trace, .. } => trace,
            CramerOutcome::NoUniqueSolution { trace } => trace,
        }
    }

    pub fn solution(&self) -> Option<&SolutionVector> {
        match self {
            CramerOutcome::Unique { solution, .. } => Some(solution),
            CramerOutcome::NoUniqueSolution { .. } => None,
        }
    }

    pub fn is_unique(&self) -> bool {
        matches!(self, CramerOutcome::Unique { .. })
    }
}

/// Cramer's rule over an augmented matrix, generic over the determinant algorithm.
#[derive(Debug, Clone, Default)]
pub struct CramerSolver<A = CofactorExpansion> {
    algorithm: A,
    zero_check: ZeroCheck,
}

impl CramerSolver<CofactorExpansion> {
    /// The reference solver: cofactor expansion and an exact zero check.
    pub fn cofactor() -> Self {
        Self::default()
    }
}

impl<A> CramerSolver<A>
where
    A: DeterminantAlgorithm<SquareMatrix<f64>, Value = f64>,
{
    pub fn new(algorithm: A) -> Self {
        Self {
            algorithm,
            zero_check: ZeroCheck::default(),
        }
    }

    pub fn with_zero_check(mut self, zero_check: ZeroCheck) -> Self {
        self.zero_check = zero_check;
        self
    }

    pub fn zero_check(&self) -> ZeroCheck {
        self.zero_check
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// det(A) and every det(A_i), whether or not det(A) is zero.
    pub fn compute_determinants(
        &self,
        matrix: &AugmentedMatrix,
    ) -> Result<DeterminantTrace, CramerCoreError> {
        if matrix.is_empty() {
            log::debug!("Empty system, nothing to compute");
            return Ok(DeterminantTrace::empty());
        }

        let coefficients = matrix.coefficients()?;
        let constants = matrix.constants();
        let main = self.algorithm.determinant(&coefficients)?;
        log::debug!(
            "Main determinant of {} system ({}): {}",
            matrix.size(),
            self.algorithm.name(),
            main
        );

        let names = matrix.size().variable_names();
        let mut variables = Vec::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            let replaced = coefficients.with_column(index, &constants)?;
            let value = self.algorithm.determinant(&replaced)?;
            log::debug!("det|A_{}| = {}", name, value);
            variables.push(VariableDeterminant {
                index,
                name: (*name).to_string(),
                value,
            });
        }

        Ok(DeterminantTrace { main, variables })
    }

    /// Solves the system, or reports that it has no unique solution.
    pub fn solve(&self, matrix: &AugmentedMatrix) -> Result<CramerOutcome, CramerCoreError> {
        let trace = self.compute_determinants(matrix)?;
        if self.zero_check.is_zero(trace.main) {
            log::info!(
                "Main determinant {} is zero, {} system has no unique solution",
                trace.main,
                matrix.size()
            );
            return Ok(CramerOutcome::NoUniqueSolution { trace });
        }

        let values = trace
            .variables
            .iter()
            .map(|variable| {
                let value = variable.value / trace.main;
                // 0 / negative det is -0.0
                if value == 0.0 { 0.0 } else { value }
            })
            .collect();
        let solution = SolutionVector {
            size: matrix.size(),
            values,
        };
        log::debug!("Solution: {:?}", solution.values());
        Ok(CramerOutcome::Unique { trace, solution })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::LuDecomposition;

    fn system(rows: Vec<Vec<f64>>) -> AugmentedMatrix {
        AugmentedMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_two_by_two_system() {
        // 2x + y = 10, x - 3y = 5
        let outcome = CramerSolver::cofactor()
            .solve(&system(vec![vec![2.0, 1.0, 10.0], vec![1.0, -3.0, 5.0]]))
            .unwrap();
        assert_eq!(outcome.trace().main, -7.0);
        assert_eq!(outcome.trace().variables[0].value, -35.0);
        assert_eq!(outcome.trace().variables[1].value, 0.0);
        let solution = outcome.solution().expect("unique solution");
        assert!((solution.values()[0] - 5.0).abs() < 1e-4);
        assert_eq!(solution.values()[1], 0.0);
        assert!(solution.values()[1].is_sign_positive());
        let named: Vec<_> = solution.iter_named().map(|(name, _)| name).collect();
        assert_eq!(named, vec!["X", "Y"]);
    }

    #[test]
    fn test_two_by_two_negative_constant() {
        // 2x + y = 10, x - 3y = -5
        let outcome = CramerSolver::cofactor()
            .solve(&system(vec![vec![2.0, 1.0, 10.0], vec![1.0, -3.0, -5.0]]))
            .unwrap();
        assert_eq!(outcome.trace().main, -7.0);
        assert_eq!(outcome.trace().variables[0].value, -25.0);
        assert_eq!(outcome.trace().variables[1].value, -20.0);
        let solution = outcome.solution().expect("unique solution");
        assert!((solution.values()[0] - 25.0 / 7.0).abs() < 1e-4);
        assert!((solution.values()[1] - 20.0 / 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_dependent_rows_have_no_unique_solution() {
        let outcome = CramerSolver::cofactor()
            .solve(&system(vec![
                vec![1.0, 2.0, 3.0, 4.0],
                vec![2.0, 4.0, 6.0, 8.0],
                vec![0.0, 1.0, 5.0, 2.0],
            ]))
            .unwrap();
        assert!(!outcome.is_unique());
        assert!(outcome.solution().is_none());
        assert_eq!(outcome.trace().main, 0.0);
        assert_eq!(outcome.trace().variables.len(), 3);
    }

    #[test]
    fn test_compute_determinants_ignores_solvability() {
        let trace = CramerSolver::cofactor()
            .compute_determinants(&system(vec![vec![1.0, 1.0, 2.0], vec![1.0, 1.0, 3.0]]))
            .unwrap();
        assert_eq!(trace.main, 0.0);
        assert_eq!(trace.variable(0).map(|v| v.value), Some(-1.0));
        assert_eq!(trace.variable(1).map(|v| v.name.as_str()), Some("Y"));
    }

    #[test]
    fn test_empty_system() {
        let solver = CramerSolver::cofactor();
        let empty = AugmentedMatrix::build(MatrixSize::Empty);
        assert_eq!(
            solver.compute_determinants(&empty).unwrap(),
            DeterminantTrace::empty()
        );
        assert!(!solver.solve(&empty).unwrap().is_unique());
    }

    #[test]
    fn test_tolerance_zero_check() {
        let nearly_singular = system(vec![vec![1.0, 1.0, 2.0], vec![1.0, 1.0 + 1e-13, 2.0]]);
        let exact = CramerSolver::cofactor().solve(&nearly_singular).unwrap();
        assert!(exact.is_unique());
        let tolerant = CramerSolver::cofactor()
            .with_zero_check(ZeroCheck::Tolerance(1e-10))
            .solve(&nearly_singular)
            .unwrap();
        assert!(!tolerant.is_unique());
    }

    #[test]
    fn test_lu_solver_matches() {
        let matrix = system(vec![
            vec![2.0, -1.0, 0.0, 1.0],
            vec![-1.0, 2.0, -1.0, 0.0],
            vec![0.0, -1.0, 2.0, 1.0],
        ]);
        let reference = CramerSolver::cofactor().solve(&matrix).unwrap();
        let lu = CramerSolver::new(LuDecomposition::default())
            .solve(&matrix)
            .unwrap();
        let (a, b) = (reference.solution().unwrap(), lu.solution().unwrap());
        for (x, y) in a.values().iter().zip(b.values()) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = CramerSolver::cofactor()
            .solve(&system(vec![vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0]]))
            .unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "no_unique_solution");
        assert_eq!(json["trace"]["main"], 0.0);
    }
}
