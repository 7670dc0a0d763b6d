pub mod batch;
pub mod client;

pub use batch::{DEFAULT_INVOCATION_ID, LogBatch, LogEntry, build_entries};
pub use client::{DeliveryClient, DeliveryError};

use crate::config::{Config, ConfigError};
use crate::event::RawLogEvent;
use tracing::debug;

/// High-level logger combining batch construction and delivery.
///
/// One instance per configuration; holds no mutable state, so concurrent
/// invocations can use independent instances without locking.
#[derive(Debug, Clone)]
pub struct CoralogixLogger {
    config: Config,
    client: DeliveryClient,
}

impl CoralogixLogger {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = DeliveryClient::new(&config)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds one batch from the raw events of an invocation and delivers
    /// it. An empty batch (everything unmatched or filtered) succeeds
    /// without touching the network.
    pub async fn send_entries(
        &self,
        function_name: &str,
        events: &[RawLogEvent],
    ) -> Result<(), DeliveryError> {
        let entries = build_entries(events, function_name, self.config.min_level)?;
        if entries.is_empty() {
            debug!("no log entries above threshold, skipping delivery");
            return Ok(());
        }
        let batch = LogBatch {
            private_key: self.config.api_key.clone(),
            application_name: self.config.application_name.clone(),
            subsystem_name: self.config.subsystem_name.clone(),
            computer_name: self.config.computer_name.clone(),
            log_entries: entries,
        };
        self.client.send(&batch).await
    }
}
