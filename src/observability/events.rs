//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// CLI startup begins
    BootStart,
    /// Configuration loaded
    ConfigLoaded,
    /// Contract registry built (catalog plus any loaded files)
    ContractsLoaded,
    /// Contract registry could not be built (FATAL)
    ContractsInvalid,

    // Requests
    /// Request satisfied its contract
    RequestValidated,
    /// Request violated its contract
    RequestRejected,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ContractsLoaded => "CONTRACTS_LOADED",
            Event::ContractsInvalid => "CONTRACTS_INVALID",
            Event::RequestValidated => "REQUEST_VALIDATED",
            Event::RequestRejected => "REQUEST_REJECTED",
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::ContractsInvalid)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
