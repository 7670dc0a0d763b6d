use super::batch::LogBatch;
use crate::config::{Config, ConfigError};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The destination rejected the batch; never retried.
    #[error("Failed to send logs with status {status}: {body}")]
    Rejected { status: u16, body: String },
    /// Transport-level failure after the retry budget is exhausted.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("Failed to serialize log batch: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Posts batches to the ingestion endpoint, retrying transport failures per
/// the configured delay sequence. HTTP rejections surface immediately.
#[derive(Debug, Clone)]
pub struct DeliveryClient {
    client: Client,
    endpoint: Url,
    retry_delays: Vec<Duration>,
}

impl DeliveryClient {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let endpoint: Url = config.api_url.parse()?;
        let client = ClientBuilder::new()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            retry_delays: config.retry_delays.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one batch atomically. The retry loop is strictly sequential:
    /// one request in flight, a single scheduled wait between attempts.
    pub async fn send(&self, batch: &LogBatch) -> Result<(), DeliveryError> {
        let mut attempt = 0;
        loop {
            debug!(
                attempt = attempt + 1,
                entries = batch.log_entries.len(),
                "sending log batch"
            );
            match self
                .client
                .post(self.endpoint.clone())
                .json(batch)
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => {
                    debug!(status = response.status().as_u16(), "log batch accepted");
                    return Ok(());
                }
                Ok(response) => {
                    let status = response.status().as_u16();
                    let body = response.text().await.unwrap_or_default();
                    return Err(DeliveryError::Rejected { status, body });
                }
                Err(err) => {
                    let Some(delay) = self.retry_delays.get(attempt) else {
                        return Err(DeliveryError::Transport(err));
                    };
                    warn!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transport failure, retrying"
                    );
                    tokio::time::sleep(*delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
