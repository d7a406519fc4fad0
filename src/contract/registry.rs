//! Contract registry
//!
//! Contracts are built once at process start and never mutated afterwards:
//! - the built-in catalog is registered by [`ContractRegistry::builtin`]
//! - extra contracts may be loaded from `*.json` files, one contract per file
//! - registering a name twice is rejected

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use super::catalog;
use super::errors::{ContractError, ContractResult};
use super::types::Contract;

/// In-memory set of contracts indexed by name.
#[derive(Debug, Default)]
pub struct ContractRegistry {
    contracts: BTreeMap<String, Contract>,
}

impl ContractRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in API contract.
    pub fn builtin() -> ContractResult<Self> {
        let mut registry = Self::new();
        for contract in catalog::builtin_contracts() {
            registry.register(contract)?;
        }
        Ok(registry)
    }

    /// Registers a contract.
    ///
    /// Fails with `LINGO_CONTRACT_MALFORMED` if the definition is invalid and
    /// with `LINGO_CONTRACT_IMMUTABLE` if the name is taken.
    pub fn register(&mut self, contract: Contract) -> ContractResult<()> {
        contract
            .validate_structure()
            .map_err(|e| ContractError::malformed(&contract.name, e))?;

        if self.contracts.contains_key(&contract.name) {
            return Err(ContractError::ContractImmutable(contract.name));
        }

        self.contracts.insert(contract.name.clone(), contract);
        Ok(())
    }

    /// Loads every `*.json` contract file in `dir`.
    ///
    /// A missing directory loads nothing. Returns the number of contracts loaded.
    pub fn load_dir(&mut self, dir: &Path) -> ContractResult<usize> {
        if !dir.exists() {
            return Ok(0);
        }

        let entries = fs::read_dir(dir).map_err(|e| {
            ContractError::malformed(
                dir.display().to_string(),
                format!("Failed to read contract directory: {}", e),
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                ContractError::malformed(
                    dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            }
        }

        // Directory order is platform dependent
        paths.sort();

        // Read everything before registering anything
        let mut loaded: Vec<Contract> = Vec::with_capacity(paths.len());
        for path in &paths {
            let contract = read_contract_file(path)?;
            if self.contains(&contract.name) || loaded.iter().any(|c| c.name == contract.name) {
                return Err(ContractError::ContractImmutable(contract.name));
            }
            loaded.push(contract);
        }

        let count = loaded.len();
        for contract in loaded {
            self.contracts.insert(contract.name.clone(), contract);
        }

        Ok(count)
    }

    /// Gets a contract by name.
    pub fn get(&self, name: &str) -> Option<&Contract> {
        self.contracts.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.contracts.contains_key(name)
    }

    /// Returns contract names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.contracts.keys().map(String::as_str)
    }

    /// Returns all contracts in name order.
    pub fn contracts(&self) -> impl Iterator<Item = &Contract> {
        self.contracts.values()
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

/// Top-level keys a contract file may carry, per shape kind.
const OBJECT_KEYS: [&str; 4] = ["name", "description", "kind", "fields"];
const ONE_OF_KEYS: [&str; 4] = ["name", "description", "kind", "alternatives"];

/// Reads, parses and structurally checks one contract file.
fn read_contract_file(path: &Path) -> ContractResult<Contract> {
    let source_name = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|e| {
        ContractError::malformed(&source_name, format!("Failed to read file: {}", e))
    })?;

    let raw: Value = serde_json::from_str(&content)
        .map_err(|e| ContractError::malformed(&source_name, format!("Invalid JSON: {}", e)))?;
    check_top_level_keys(&raw).map_err(|e| ContractError::malformed(&source_name, e))?;

    let contract: Contract = serde_json::from_value(raw)
        .map_err(|e| ContractError::malformed(&source_name, format!("Invalid contract: {}", e)))?;

    contract
        .validate_structure()
        .map_err(|e| ContractError::malformed(&source_name, e))?;

    Ok(contract)
}

/// `Contract` flattens its shape, so serde cannot deny unknown keys there.
fn check_top_level_keys(raw: &Value) -> Result<(), String> {
    let obj = raw
        .as_object()
        .ok_or_else(|| "Contract file must hold a JSON object".to_string())?;

    let allowed: &[&str] = match obj.get("kind").and_then(Value::as_str) {
        Some("one_of") => &ONE_OF_KEYS,
        _ => &OBJECT_KEYS,
    };

    match obj.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(key) => Err(format!("Unknown key '{}'", key)),
        None => Ok(()),
    }
}
