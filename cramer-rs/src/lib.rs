pub mod error;
pub mod narration;
pub mod record;
pub mod session;
pub mod store;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod wasm;

pub use error::{CramerError, Result, StoreError};
pub use narration::{Narration, Step};
pub use record::SavedMatrixRecord;
pub use session::{DeterminantsReport, Session, SolveReport};
pub use store::{DefaultStore, FileStore, MatrixStore, MemoryStore};

pub use cramer_core::{AugmentedMatrix, CellPolicy, CramerCoreError, MatrixSize};
pub use cramer_solver::{CramerOutcome, CramerSolver, DeterminantTrace, SolutionVector, ZeroCheck};

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use wasm::WasmSession;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
use wasm_bindgen::prelude::*;

// --- WASM Setup ---
// Initialize logging and panic hook for WASM
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
#[wasm_bindgen(start)]
pub fn wasm_init() {
    // Only run this initialization once.
    static START: std::sync::Once = std::sync::Once::new();
    START.call_once(|| {
        // Use `wasm_logger` for Rust logs -> console.log
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
        // Redirect panics to console.error
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));
        log::info!("Cramer WASM module initialized.");
    });
}
