//! CLI argument definitions using clap
//!
//! Commands:
//! - lingo validate --contract <name> [--config <path>]
//! - lingo contracts [--config <path>]
//! - lingo layouts

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// lingo - API request contracts and app shell declarations
#[derive(Parser, Debug)]
#[command(name = "lingo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate one JSON request read from stdin
    Validate {
        /// Contract name, e.g. organization.update
        #[arg(long)]
        contract: String,

        /// Path to configuration file (defaults to ./lingo.json when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List registered contracts and their fields
    Contracts {
        /// Path to configuration file (defaults to ./lingo.json when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print navigation layouts and the header logo node
    Layouts,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from(["lingo", "validate", "--contract", "post.create"]).unwrap();
        match cli.command {
            Command::Validate { contract, config } => {
                assert_eq!(contract, "post.create");
                assert!(config.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_validate_requires_contract() {
        assert!(Cli::try_parse_from(["lingo", "validate"]).is_err());
    }
}
