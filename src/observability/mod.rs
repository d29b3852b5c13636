//! Observability for the translator
//!
//! Structured JSON-line logging of translation events. Logging is read-only
//! and never changes translation results.
//!
//! ```ignore
//! use sqldsl::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Trace);
//! log_event_with_fields(Event::MethodDispatched, &[("method", "range")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a translation event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
