#![deny(warnings, rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::missing_errors_doc,      // Internal API
    clippy::module_name_repetitions, // e.g. DeliveryError in sender module
    clippy::must_use_candidate       // Annotated selectively on critical APIs
)]

pub mod config;
pub mod event;
pub mod parser;
pub mod sender;

// Re-export main types for easy access
pub use config::{Config, ConfigError};
pub use event::{DecodeError, LogsPayload, RawLogEvent, decode_awslogs, function_name};
pub use parser::{ExtractedFields, Severity, extract_fields};
pub use sender::{CoralogixLogger, DeliveryError, LogBatch, LogEntry};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
