use serde::{Deserialize, Serialize};

/// Severity of a log entry on the Coralogix ordinal scale.
///
/// The ordinal is used for threshold filtering only; the `level` text
/// serialized into an entry body is always the raw level lower-cased,
/// never the canonical name of the mapped variant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug = 1,
    Verbose = 2,
    #[default]
    Info = 3,
    Warn = 4,
    Error = 5,
    Critical = 6,
}

impl Severity {
    /// Maps a textual level to its severity, case-insensitively. Unknown
    /// level names map to `Info`.
    pub fn from_level_text(text: &str) -> Self {
        match text.to_ascii_lowercase().as_str() {
            "debug" | "trace" => Self::Debug,
            "verbose" | "silly" => Self::Verbose,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            "fatal" | "crit" | "critical" => Self::Critical,
            _ => Self::Info,
        }
    }

    /// Integer code understood by the destination.
    pub fn ordinal(self) -> u32 {
        self as u32
    }
}
