//! CLI command implementations

use std::io::{self, BufRead, Write};

use serde_json::{json, Value};
use uuid::Uuid;

use crate::branding::HeaderLogo;
use crate::contract::{Contract, ContractRegistry, ContractValidator, ExtraFields, Shape};
use crate::navigation::all_layouts;
use crate::observability::{log_event, log_event_with_fields, Event, Logger};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_json, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Validate { contract, config } => {
            let config = Config::resolve(config.as_deref())?;
            validate(&config, &contract)
        }
        Command::Contracts { config } => {
            let config = Config::resolve(config.as_deref())?;
            contracts(&config)
        }
        Command::Layouts => layouts(),
    }
}

/// Builds the registry: built-in catalog plus the configured contract directory.
pub fn build_registry(config: &Config) -> CliResult<ContractRegistry> {
    Logger::set_enabled(config.log_events);
    log_event(Event::BootStart);
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("extra_fields", extra_fields_str(config))],
    );

    let mut registry = ContractRegistry::builtin().map_err(|e| {
        log_event_with_fields(Event::ContractsInvalid, &[("code", e.code())]);
        CliError::contracts_invalid(&e)
    })?;

    if let Some(dir) = &config.contracts_dir {
        registry.load_dir(dir).map_err(|e| {
            log_event_with_fields(Event::ContractsInvalid, &[("code", e.code())]);
            CliError::contracts_invalid(&e)
        })?;
    }

    let count = registry.len().to_string();
    log_event_with_fields(Event::ContractsLoaded, &[("count", count.as_str())]);

    Ok(registry)
}

/// Validate one request from stdin against `contract_name`.
///
/// Writes the normalized value, or the violations, to stdout. A rejection
/// is also returned as an error so the process exits non-zero.
pub fn validate(config: &Config, contract_name: &str) -> CliResult<()> {
    validate_with(config, contract_name, io::stdin().lock(), &mut io::stdout().lock())
}

/// Validate one request read from `input`, writing the response to `output`.
pub fn validate_with<R: BufRead, W: Write>(
    config: &Config,
    contract_name: &str,
    input: R,
    output: &mut W,
) -> CliResult<()> {
    let registry = build_registry(config)?;
    let input = read_request(input)?;

    let validator = ContractValidator::new(&registry).with_extra_fields(config.extra_fields);
    let request_id = Uuid::new_v4().to_string();

    match validator.validate(contract_name, &input) {
        Ok(normalized) => {
            log_event_with_fields(
                Event::RequestValidated,
                &[("contract", contract_name), ("request_id", request_id.as_str())],
            );
            write_response(output, contract_name, normalized)
        }
        Err(e) => {
            let violations = e.violations().len().to_string();
            log_event_with_fields(
                Event::RequestRejected,
                &[
                    ("code", e.code()),
                    ("contract", contract_name),
                    ("request_id", request_id.as_str()),
                    ("violations", violations.as_str()),
                ],
            );
            write_error(output, &e)?;
            Err(CliError::request_rejected(&e))
        }
    }
}

/// List every registered contract as JSON.
pub fn contracts(config: &Config) -> CliResult<()> {
    let registry = build_registry(config)?;
    let listing: Vec<Value> = registry.contracts().map(describe_contract).collect();
    write_json(&json!({ "status": "ok", "data": listing }))
}

/// Print navigation layouts and the header logo node.
pub fn layouts() -> CliResult<()> {
    write_json(&json!({
        "status": "ok",
        "data": {
            "layouts": all_layouts(),
            "headerLogo": HeaderLogo.render()
        }
    }))
}

/// Human-oriented summary of a contract: required and optional field names.
fn describe_contract(contract: &Contract) -> Value {
    match &contract.shape {
        Shape::Object { fields } => {
            let required: Vec<&str> = fields
                .iter()
                .filter(|(_, def)| def.required)
                .map(|(name, _)| name.as_str())
                .collect();
            let optional: Vec<&str> = fields
                .iter()
                .filter(|(_, def)| !def.required)
                .map(|(name, _)| name.as_str())
                .collect();
            json!({
                "name": contract.name,
                "description": contract.description,
                "required": required,
                "optional": optional,
            })
        }
        Shape::OneOf { alternatives } => {
            let one_of: Vec<Value> = alternatives
                .iter()
                .map(|alt| json!({ "alternative": alt.name, "fields": alt.fields }))
                .collect();
            json!({
                "name": contract.name,
                "description": contract.description,
                "one_of": one_of,
            })
        }
    }
}

fn extra_fields_str(config: &Config) -> &'static str {
    match config.extra_fields {
        ExtraFields::Ignore => "ignore",
        ExtraFields::Reject => "reject",
    }
}
