//! CLI module for lingo
//!
//! Provides command-line interface for:
//! - validate: Check one JSON request against a contract
//! - contracts: List registered contracts
//! - layouts: Print navigation layouts and the header logo node

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    build_registry, contracts, layouts, run, run_command, validate, validate_with,
};
pub use config::{Config, DEFAULT_CONFIG_PATH};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{
    error_body, ok_body, read_request, write_error, write_json, write_json_to, write_response,
};
