use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use cramer_core::CramerCoreError;
use cramer_rs::{CellPolicy, FileStore, MatrixSize, Session, session::saved_names};

/// Solve small linear systems with Cramer's rule.
///
/// Matrices are headerless CSV files, one equation per row with the constant last:
/// `2,1,10` reads as `2x + y = 10`.
#[derive(Parser, Debug)]
#[command(name = "cramer", version, about)]
struct Cli {
    /// JSON file holding saved matrices by name.
    #[arg(long, global = true, default_value = "cramer-matrices.json")]
    store: PathBuf,

    /// Reject non-numeric cells instead of reading them as 0.
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve the system and print every step.
    Solve { file: PathBuf },
    /// Print the main determinant and one determinant per variable.
    Determinants { file: PathBuf },
    /// Save the system under a name.
    Save { name: String, file: PathBuf },
    /// Print a saved system as CSV.
    Load { name: String },
    /// List saved names.
    List,
    /// Print a random system with values in [-10, 10).
    Random {
        #[arg(default_value_t = 3)]
        size: usize,
        #[arg(long)]
        seed: Option<u64>,
        /// Also save it under this name.
        #[arg(long)]
        save: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let policy = if cli.strict {
        CellPolicy::Strict
    } else {
        CellPolicy::Lenient
    };
    let mut store = FileStore::new(&cli.store);

    match cli.command {
        Command::Solve { file } => {
            let session = read_session(&file, policy)?;
            let report = session.solve()?;
            println!("{}", report.narration.to_text());
        }
        Command::Determinants { file } => {
            let session = read_session(&file, policy)?;
            for line in session.determinants()?.lines {
                println!("{}", line);
            }
        }
        Command::Save { name, file } => {
            let session = read_session(&file, policy)?;
            session.save(&mut store, &name)?;
            println!("Matrix saved successfully!");
        }
        Command::Load { name } => {
            let mut session = Session::new();
            let size = session.load(&store, &name)?;
            log::info!("Loaded a {} system from {}", size, store.path().display());
            write_cells(&session)?;
        }
        Command::List => {
            for name in saved_names(&store)? {
                println!("{}", name);
            }
        }
        Command::Random { size, seed, save } => {
            let size = MatrixSize::try_from(size)?;
            let mut rng = match seed {
                Some(seed) => fastrand::Rng::with_seed(seed),
                None => fastrand::Rng::new(),
            };
            let mut session = Session::new();
            session.set_size(size);
            session.randomize(&mut rng);
            write_cells(&session)?;
            if let Some(name) = save {
                session.save(&mut store, &name)?;
            }
        }
    }

    Ok(())
}

/// Reads raw cells so blank fields reach the validation rule; the row count is the system size.
fn read_session(path: &Path, policy: CellPolicy) -> Result<Session, Box<dyn Error>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    let size = MatrixSize::try_from(rows.len())?;
    for (index, row) in rows.iter().enumerate() {
        if row.len() != size.augmented_cols() {
            return Err(CramerCoreError::InvalidDimensions(format!(
                "Row {} of {} has {} fields, expected {}",
                index + 1,
                path.display(),
                row.len(),
                size.augmented_cols()
            ))
            .into());
        }
    }
    log::debug!("Read a {} system from {}", size, path.display());

    let mut session = Session::new().with_policy(policy);
    session.set_cells(size, rows.into_iter().flatten().collect())?;
    Ok(session)
}

fn write_cells(session: &Session) -> Result<(), Box<dyn Error>> {
    let cols = session.size().augmented_cols();
    if cols == 0 {
        return Ok(());
    }
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for row in session.cells().chunks(cols) {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_csv(name: &str, text: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("cramer-cli-{}-{}.csv", std::process::id(), name));
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_read_session_infers_size() {
        let path = temp_csv("two", "2,1,10\n1,-3,5\n");
        let session = read_session(&path, CellPolicy::Lenient).unwrap();
        assert_eq!(session.size(), MatrixSize::Two);
        let report = session.solve().unwrap();
        assert!(report.outcome.is_unique());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_read_session_keeps_blank_cells() {
        let path = temp_csv("blank", "2,,10\n1,-3,5\n");
        let session = read_session(&path, CellPolicy::Lenient).unwrap();
        assert_eq!(session.cell(0, 1), Some(""));
        assert!(session.solve().unwrap_err().is_validation());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_read_session_rejects_ragged_rows() {
        let path = temp_csv("ragged", "2,1,10\n1,-3\n");
        assert!(read_session(&path, CellPolicy::Lenient).is_err());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_read_session_rejects_unsupported_size() {
        let path = temp_csv("one", "1,2\n");
        assert!(read_session(&path, CellPolicy::Lenient).is_err());
        std::fs::remove_file(path).unwrap();

        let path = temp_csv("five", &"1,2,3,4,5,6\n".repeat(5));
        assert!(read_session(&path, CellPolicy::Lenient).is_err());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_cli_parses_random() {
        let cli = Cli::try_parse_from(["cramer", "random", "4", "--seed", "7"]).unwrap();
        match cli.command {
            Command::Random { size, seed, save } => {
                assert_eq!(size, 4);
                assert_eq!(seed, Some(7));
                assert!(save.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
