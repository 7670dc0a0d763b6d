use crate::parser::Severity;
use std::time::Duration;
use thiserror::Error;

/// Production ingestion endpoint.
pub const DEFAULT_API_URL: &str = "https://api.coralogix.com/api/v1/logs";

/// Waits applied between consecutive delivery attempts after a transport
/// failure. Length + 1 = maximum attempts.
pub const DEFAULT_RETRY_DELAYS: [Duration; 3] = [
    Duration::from_millis(500),
    Duration::from_secs(1),
    Duration::from_secs(2),
];

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing Coralogix API key")]
    MissingApiKey,
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Invalid HTTP client configuration: {0}")]
    Client(String),
}

/// Resolved configuration for one logger instance. Defaults are applied at
/// construction and the value is immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Coralogix private key, required.
    pub api_key: String,
    pub application_name: String,
    pub subsystem_name: String,
    /// Entries below this severity are dropped before delivery.
    pub min_level: Severity,
    /// Ingestion endpoint, parsed when the delivery client is built.
    pub api_url: String,
    pub retry_delays: Vec<Duration>,
    pub request_timeout: Duration,
    /// Host identifier sent as `computerName`; `None` omits the key.
    pub computer_name: Option<String>,
}

impl Config {
    pub fn new(
        api_key: impl Into<String>,
        application_name: impl Into<String>,
        subsystem_name: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            application_name: application_name.into(),
            subsystem_name: subsystem_name.into(),
            min_level: Severity::Info,
            api_url: DEFAULT_API_URL.to_string(),
            retry_delays: DEFAULT_RETRY_DELAYS.to_vec(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            computer_name: local_hostname(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }
}

fn local_hostname() -> Option<String> {
    hostname::get().ok().and_then(|name| name.into_string().ok())
}
