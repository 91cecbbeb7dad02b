//! Generate EQUATIONS.md from the equation registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-equations [OUTPUT]
//! ```
//!
//! Without an argument the file is written to
//! `calc_core/src/equations/EQUATIONS.md` (relative to the workspace root).

use std::path::PathBuf;
use std::process::ExitCode;

use calc_core::equations::generate_equations_markdown;
use calc_core::file_io::write_atomic;

fn main() -> ExitCode {
    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("calc_core/src/equations/EQUATIONS.md"));

    let markdown = generate_equations_markdown();

    match write_atomic(&output_path, markdown.as_bytes()) {
        Ok(()) => {
            println!("Wrote {} bytes to {}", markdown.len(), output_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
