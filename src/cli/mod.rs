//! CLI module for dashgate
//!
//! Provides command-line interface for:
//! - catalog: List registered declarations
//! - resolve: Online resolution against a context file
//! - snapshot: Resolve and freeze into a signed snapshot
//! - verify: Expiry and signature verdict for a snapshot
//! - evaluate: Offline evaluation of a snapshot
//! - isolation: Partner/tenant isolation check between two contexts

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{catalog, evaluate, isolation, resolve, run, run_command, snapshot, verify};
pub use errors::{CliError, CliResult};
pub use io::{read_json_file, write_error, write_response};
