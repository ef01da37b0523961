//! Offline move logs: text codec and a recovering validator.

pub mod log;
pub mod validator;

pub use log::{LogEntry, ParseError};
pub use validator::{validate_log, ReplayError, ReplayReport, ReplayValidator, Violation};
