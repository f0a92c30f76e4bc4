//! dashgate CLI entry point
//!
//! Parses arguments and dispatches via `cli::run`, which prints the JSON
//! envelope. Errors are repeated on stderr and the process exits non-zero.

use dashgate::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
