//! CLI argument definitions using clap
//!
//! Commands:
//! - dashgate catalog
//! - dashgate resolve --dashboard <id> [--version <v>] --context <file>
//! - dashgate snapshot --dashboard <id> [--version <v>] --context <file> [--expiration-ms <n>] [--out <file>]
//! - dashgate verify --snapshot <file>
//! - dashgate evaluate --snapshot <file>
//! - dashgate isolation --left <file> --right <file>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dashgate - dashboard section gating with offline snapshots
#[derive(Parser, Debug)]
#[command(name = "dashgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered dashboard declarations
    Catalog,

    /// Resolve a dashboard against a context file
    Resolve {
        /// Dashboard id
        #[arg(long)]
        dashboard: String,

        /// Dashboard version (latest when omitted)
        #[arg(long)]
        version: Option<String>,

        /// Path to a JSON resolution context
        #[arg(long)]
        context: PathBuf,
    },

    /// Resolve a dashboard and freeze the result into a snapshot
    Snapshot {
        /// Dashboard id
        #[arg(long)]
        dashboard: String,

        /// Dashboard version (latest when omitted)
        #[arg(long)]
        version: Option<String>,

        /// Path to a JSON resolution context
        #[arg(long)]
        context: PathBuf,

        /// Validity window in milliseconds (config value when omitted)
        #[arg(long)]
        expiration_ms: Option<u64>,

        /// Write the snapshot here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Check a snapshot's expiry and signature
    Verify {
        /// Path to a snapshot file
        #[arg(long)]
        snapshot: PathBuf,
    },

    /// Verify a snapshot and print its visible and hidden sections
    Evaluate {
        /// Path to a snapshot file
        #[arg(long)]
        snapshot: PathBuf,
    },

    /// Check that two contexts share a partner and tenant scope
    Isolation {
        /// First context file
        #[arg(long)]
        left: PathBuf,

        /// Second context file
        #[arg(long)]
        right: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
