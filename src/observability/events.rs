//! Observable translation events

use std::fmt;

use super::logger::Severity;

/// Events emitted while translating method invocations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded from disk
    ConfigLoaded,
    /// A method parser was added to a registry
    ParserRegistered,
    /// An invocation was translated
    MethodDispatched,
    /// A handler rejected an invocation
    MethodRejected,
    /// No handler claimed an invocation
    MethodUnknown,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ParserRegistered => "PARSER_REGISTERED",
            Event::MethodDispatched => "METHOD_DISPATCHED",
            Event::MethodRejected => "METHOD_REJECTED",
            Event::MethodUnknown => "METHOD_UNKNOWN",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ConfigLoaded => Severity::Info,
            Event::ParserRegistered | Event::MethodDispatched => Severity::Trace,
            Event::MethodRejected | Event::MethodUnknown => Severity::Warn,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
