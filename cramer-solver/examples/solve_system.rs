use cramer_solver::{
    algorithms::{Adaptive, LuDecomposition},
    AugmentedMatrix, CramerOutcome, CramerSolver, MatrixSize,
};
use std::time::Instant;

/// Creates a pentadiagonal-style augmented system of the given size with constants b[i] = sin(i).
/// Diagonals:
/// - Main: 4.0
/// - Adjacent (+1, -1): -1.0
/// - Outer (+2, -2): -0.5
fn create_system(size: MatrixSize) -> AugmentedMatrix {
    let n = size.order();
    let mut matrix = AugmentedMatrix::build(size);
    for i in 0..n {
        for j in 0..n {
            let value = match i.abs_diff(j) {
                0 => 4.0,
                1 => -1.0,
                2 => -0.5,
                _ => 0.0,
            };
            matrix
                .set(i, j, value)
                .expect("index within a freshly built matrix");
        }
        matrix
            .set(i, n, (i as f64 / n as f64).sin())
            .expect("index within a freshly built matrix");
    }
    matrix
}

fn main() {
    // Initialize logging based on RUST_LOG environment variable
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    for size in [MatrixSize::Two, MatrixSize::Three, MatrixSize::Four] {
        let matrix = create_system(size);
        log::info!("Solving {} system: {:?}", size, matrix.as_rows());

        for (label, result) in [
            ("cofactor", {
                let start = Instant::now();
                (CramerSolver::cofactor().solve(&matrix), start.elapsed())
            }),
            ("lu", {
                let start = Instant::now();
                (
                    CramerSolver::new(LuDecomposition::default()).solve(&matrix),
                    start.elapsed(),
                )
            }),
            ("adaptive", {
                let start = Instant::now();
                (CramerSolver::new(Adaptive::default()).solve(&matrix), start.elapsed())
            }),
        ] {
            let (outcome, duration) = result;
            match outcome {
                Ok(CramerOutcome::Unique { trace, solution }) => {
                    log::info!("  [{}] det|A| = {:.6}", label, trace.main);
                    for (name, value) in solution.iter_named() {
                        log::info!("  [{}] {} = {:.6}", label, name, value);
                    }
                    log::info!("  [{}] Time elapsed: {:?}", label, duration);
                }
                Ok(CramerOutcome::NoUniqueSolution { trace }) => {
                    log::warn!("  [{}] no unique solution, det|A| = {}", label, trace.main);
                }
                Err(e) => {
                    log::error!("  [{}] Solver failed: {:?}", label, e);
                }
            }
        }
    }
}
