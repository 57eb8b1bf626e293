use cramer_solver::{
    algorithms::{Adaptive, CofactorExpansion, DeterminantAlgorithm, LuDecomposition},
    AugmentedMatrix, CramerCoreError, CramerOutcome, CramerSolver, MatrixSize, SquareMatrix,
    ZeroCheck,
};

// Helper for float comparison in tests
fn assert_approx_eq_vec(a: &[f64], b: &[f64], tolerance: f64) {
    assert_eq!(a.len(), b.len(), "Vector lengths differ");
    for i in 0..a.len() {
        let diff = (a[i] - b[i]).abs();
        assert!(
            diff <= tolerance,
            "Verification failed at index {}: expected {}, got {}, diff {}",
            i,
            b[i],
            a[i],
            diff
        );
    }
}

/// A * x, used to check that solutions satisfy the original equations.
fn residual(matrix: &AugmentedMatrix, x: &[f64]) -> Vec<f64> {
    let n = matrix.order();
    matrix
        .as_rows()
        .iter()
        .map(|row| row[..n].iter().zip(x).map(|(a, b)| a * b).sum::<f64>() - row[n])
        .collect()
}

#[test]
fn test_solve_three_by_three() -> Result<(), CramerCoreError> {
    // x + y + z = 6, 2y + 5z = -4, 2x + 5y - z = 27  =>  (5, 3, -2)
    let matrix = AugmentedMatrix::read(
        MatrixSize::Three,
        &["1", "1", "1", "6", "0", "2", "5", "-4", "2", "5", "-1", "27"],
    )?;

    let outcome = CramerSolver::cofactor().solve(&matrix)?;

    let solution = outcome.solution().expect("system has a unique solution");
    assert_approx_eq_vec(solution.values(), &[5.0, 3.0, -2.0], 1e-9);
    assert_eq!(outcome.trace().main, -21.0);
    Ok(())
}

#[test]
fn test_solve_four_by_four_satisfies_equations() -> Result<(), CramerCoreError> {
    let matrix = AugmentedMatrix::from_rows(vec![
        vec![4.0, -1.0, 0.0, 0.5, 1.0],
        vec![-1.0, 4.0, -1.0, 0.0, 2.0],
        vec![0.0, -1.0, 4.0, -1.0, 3.0],
        vec![0.5, 0.0, -1.0, 4.0, 4.0],
    ])?;

    let outcome = CramerSolver::cofactor().solve(&matrix)?;

    let solution = outcome.solution().expect("diagonally dominant system is regular");
    assert_approx_eq_vec(&residual(&matrix, solution.values()), &[0.0; 4], 1e-9);
    assert_eq!(outcome.trace().variables.len(), 4);
    let names: Vec<&str> = outcome
        .trace()
        .variables
        .iter()
        .map(|v| v.name.as_str())
        .collect();
    assert_eq!(names, ["X", "Y", "Z", "W"]);
    Ok(())
}

#[test]
fn test_every_algorithm_agrees_on_random_systems() -> Result<(), CramerCoreError> {
    let mut rng = fastrand::Rng::with_seed(2024);
    for size in [MatrixSize::Two, MatrixSize::Three, MatrixSize::Four] {
        for _ in 0..20 {
            let cells: Vec<String> = (0..size.cell_count())
                .map(|_| format!("{:.2}", rng.f64() * 20.0 - 10.0))
                .collect();
            let matrix = AugmentedMatrix::read(size, &cells)?;

            let reference = CramerSolver::cofactor().compute_determinants(&matrix)?;
            let lu = CramerSolver::new(LuDecomposition::default()).compute_determinants(&matrix)?;
            let adaptive = CramerSolver::new(Adaptive::default()).compute_determinants(&matrix)?;

            assert_eq!(adaptive, reference);
            let scale = reference.main.abs().max(1.0);
            assert!((lu.main - reference.main).abs() <= 1e-9 * scale);
            for (a, b) in lu.variables.iter().zip(&reference.variables) {
                assert!((a.value - b.value).abs() <= 1e-9 * b.value.abs().max(1.0));
            }
        }
    }
    Ok(())
}

#[test]
fn test_row_swap_negates_determinant() -> Result<(), CramerCoreError> {
    let mut rng = fastrand::Rng::with_seed(99);
    for order in 2..=4 {
        let data: Vec<f64> = (0..order * order).map(|_| rng.f64() * 10.0 - 5.0).collect();
        let original = SquareMatrix::new(order, data)?;
        let det = CofactorExpansion.determinant(&original)?;
        for a in 0..order {
            for b in (a + 1)..order {
                let mut swapped = original.clone();
                swapped.swap_rows(a, b)?;
                let swapped_det = CofactorExpansion.determinant(&swapped)?;
                assert!((swapped_det + det).abs() <= 1e-9 * det.abs().max(1.0));
            }
        }
    }
    Ok(())
}

#[test]
fn test_dependent_rows_never_produce_a_solution() -> Result<(), CramerCoreError> {
    let mut rng = fastrand::Rng::with_seed(5);
    for _ in 0..20 {
        // Third row is an integer combination of the first two, so det(A) is exactly zero
        let r0: Vec<f64> = (0..4).map(|_| rng.i32(-9..=9) as f64).collect();
        let r1: Vec<f64> = (0..4).map(|_| rng.i32(-9..=9) as f64).collect();
        let r2: Vec<f64> = r0.iter().zip(&r1).map(|(a, b)| 2.0 * a - b).collect();
        let matrix = AugmentedMatrix::from_rows(vec![r0, r1, r2])?;

        let outcome = CramerSolver::cofactor().solve(&matrix)?;
        assert!(
            matches!(outcome, CramerOutcome::NoUniqueSolution { .. }),
            "expected no unique solution for {:?}",
            matrix
        );
    }
    Ok(())
}

#[test]
fn test_tolerance_zero_check_on_float_noise() -> Result<(), CramerCoreError> {
    let matrix = AugmentedMatrix::from_rows(vec![
        vec![0.1, 0.2, 0.3, 1.0],
        vec![0.4, 0.5, 0.6, 1.0],
        vec![0.7, 0.8, 0.9, 1.0],
    ])?;
    // Singular in exact arithmetic, but rounding leaves det(A) around 1.7e-17
    assert!(CramerSolver::cofactor().solve(&matrix)?.is_unique());
    let solver = CramerSolver::cofactor().with_zero_check(ZeroCheck::Tolerance(1e-12));
    assert!(!solver.solve(&matrix)?.is_unique());
    Ok(())
}
