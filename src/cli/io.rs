//! JSON I/O handling for CLI
//!
//! - Input: single JSON value on one stdin line
//! - Output: single JSON object on stdout
//! - UTF-8 only

use std::io::{self, BufRead, Write};

use serde_json::{json, Value};

use crate::contract::ContractError;

use super::errors::{CliError, CliResult};

/// Read a JSON request from the first line of `reader`
pub fn read_request<R: BufRead>(mut reader: R) -> CliResult<Value> {
    let mut line = String::new();
    reader.read_line(&mut line)?;

    if line.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    let value: Value = serde_json::from_str(&line)?;
    Ok(value)
}

/// Body of a success response
pub fn ok_body(contract: &str, data: Value) -> Value {
    json!({
        "status": "ok",
        "contract": contract,
        "data": data
    })
}

/// Body of a rejection; violations are listed per field
pub fn error_body(err: &ContractError) -> Value {
    json!({
        "status": "error",
        "code": err.code(),
        "message": err.to_string(),
        "violations": err.violations()
    })
}

/// Write a success response
pub fn write_response<W: Write>(out: &mut W, contract: &str, data: Value) -> CliResult<()> {
    write_json_to(out, &ok_body(contract, data))
}

/// Write a contract error response
pub fn write_error<W: Write>(out: &mut W, err: &ContractError) -> CliResult<()> {
    write_json_to(out, &error_body(err))
}

/// Write one JSON value as a line on stdout
pub fn write_json(value: &Value) -> CliResult<()> {
    write_json_to(&mut io::stdout().lock(), value)
}

/// Write one JSON value as a line on `out`
pub fn write_json_to<W: Write>(out: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}
