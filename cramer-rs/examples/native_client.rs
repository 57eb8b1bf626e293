use cramer_rs::{CramerError, MatrixSize, MemoryStore, Session};

// Use a generic error type for the example
type ExampleError = Box<dyn std::error::Error>;

fn main() -> Result<(), ExampleError> {
    // Initialize logging for native execution
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting native Cramer session example...");

    // --- 1. Fill a 3x3 system the way the input grid would ---
    // x + y + z = 6, 2y + 5z = -4, 2x + 5y - z = 27
    let mut session = Session::new();
    session.set_size(MatrixSize::Three);
    let cells = ["1", "1", "1", "6", "0", "2", "5", "-4", "2", "5", "-1", "27"];
    for (index, text) in cells.iter().enumerate() {
        session.set_cell(index / 4, index % 4, *text)?;
    }

    // --- 2. Determinants, then the full solution ---
    for line in session.determinants()?.lines {
        println!("{}", line);
    }
    let report = session.solve()?;
    println!("{}", report.narration.to_text());

    // --- 3. Save, wipe, load back ---
    let mut store = MemoryStore::new();
    session.save(&mut store, "example")?;
    session.set_size(MatrixSize::Two);
    let size = session.load(&store, "example")?;
    log::info!("Reloaded a {} system", size);

    // --- 4. A missing name resets the session ---
    match session.load(&store, "missing") {
        Err(CramerError::Store(err)) => log::warn!("{}", err),
        other => log::error!("Unexpected load result: {:?}", other),
    }
    log::info!("Session size after failed load: {}", session.size());

    // --- 5. A blank cell is a validation error ---
    session.set_size(MatrixSize::Two);
    session.set_cell(0, 0, "")?;
    if let Err(err) = session.solve() {
        log::warn!("Validation: {}", err);
    }

    Ok(())
}
