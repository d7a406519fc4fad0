//! Observability for lingo
//!
//! Structured JSON logging of lifecycle and request events.
//!
//! # Usage
//!
//! ```ignore
//! use lingo::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::RequestValidated, &[("contract", "post.create")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Severity an event is logged at
fn severity_for(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else if event == Event::RequestRejected {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(severity_for(event), event.as_str(), &[]);
}

/// Log an event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_for(event), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_severity() {
        assert_eq!(severity_for(Event::ContractsInvalid), Severity::Fatal);
        assert_eq!(severity_for(Event::RequestRejected), Severity::Warn);
        assert_eq!(severity_for(Event::RequestValidated), Severity::Info);
    }

    #[test]
    fn test_log_event_with_fields() {
        // Just verifies no panic
        log_event(Event::BootStart);
        log_event_with_fields(Event::ContractsLoaded, &[("count", "15")]);
    }
}
