//! CLI argument definitions using clap
//!
//! Commands:
//! - claimmeta metadata <input> [--encoded]
//! - claimmeta fee <input>
//! - claimmeta encode <input>
//! - claimmeta claim <name> <input> --sd-hash <hash> --content-type <type>
//! - claimmeta name <name>

use clap::{Parser, Subcommand};

/// Validate versioned claim metadata and fees
#[derive(Parser, Debug)]
#[command(name = "claimmeta")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Validate a metadata record and print it with its revision
    Metadata {
        /// File to read, or "-" for stdin
        input: String,

        /// Input is encoded with CLAIMMETA_ENCODING instead of plain JSON
        #[arg(long)]
        encoded: bool,
    },

    /// Validate a fee record
    Fee {
        /// File to read, or "-" for stdin
        input: String,
    },

    /// Validate a JSON metadata record and print its encoded form
    Encode {
        /// File to read, or "-" for stdin
        input: String,
    },

    /// Prepare metadata for a name claim
    Claim {
        /// Claim name
        name: String,

        /// JSON metadata file, or "-" for stdin
        input: String,

        /// Stream descriptor hash recorded under sources
        #[arg(long)]
        sd_hash: String,

        /// MIME type of the published content
        #[arg(long)]
        content_type: String,
    },

    /// Check that a claim name uses only allowed characters
    Name { name: String },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
