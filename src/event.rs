use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use std::io::Read;
use thiserror::Error;

/// Log groups of Lambda functions always carry this prefix.
const LAMBDA_LOG_GROUP_PREFIX: &str = "/aws/lambda/";

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Invalid gzip payload: {0}")]
    Gzip(#[from] std::io::Error),
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// One log event as delivered by a CloudWatch Logs subscription.
///
/// `message` is the raw line from the function's log stream, usually ending
/// in a newline. `extracted_fields` is only present when the subscription
/// filter pattern already split the line into named fields upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLogEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Event time in epoch milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_fields: Option<RawExtractedFields>,
}

/// Fields pre-extracted by a subscription filter pattern of the shape
/// `[timestamp, request_id, event]`. Key names are fixed by the filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawExtractedFields {
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Decoded CloudWatch Logs subscription payload for one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsPayload {
    /// `DATA_MESSAGE` for log data, `CONTROL_MESSAGE` for keepalives.
    #[serde(default)]
    pub message_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default)]
    pub log_group: String,
    #[serde(default)]
    pub log_stream: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subscription_filters: Vec<String>,
    #[serde(default)]
    pub log_events: Vec<RawLogEvent>,
}

/// Decodes the `awslogs.data` value of a triggering event: base64, then
/// gzip, then JSON.
pub fn decode_awslogs(data: &str) -> Result<LogsPayload, DecodeError> {
    let compressed = BASE64.decode(data)?;
    let mut json = String::new();
    GzDecoder::new(compressed.as_slice()).read_to_string(&mut json)?;
    Ok(serde_json::from_str(&json)?)
}

/// Derives the function name from a log group by stripping the fixed
/// `/aws/lambda/` prefix. Non-Lambda log groups pass through unchanged.
pub fn function_name(log_group: &str) -> &str {
    log_group
        .strip_prefix(LAMBDA_LOG_GROUP_PREFIX)
        .unwrap_or(log_group)
}
