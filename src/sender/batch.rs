use crate::event::RawLogEvent;
use crate::parser::{Severity, extract_fields};
use serde::Serialize;

/// Placeholder invocation id for entries without an extracted request id.
pub const DEFAULT_INVOCATION_ID: &str = "n/a";

/// One outbound log entry. `text` is the JSON-encoded entry body; the
/// destination filters and displays on the integer `severity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Event time in epoch milliseconds, taken from the raw event.
    pub timestamp: i64,
    pub text: String,
    pub severity: u32,
}

/// Outbound batch as posted to the ingestion endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogBatch {
    pub private_key: String,
    pub application_name: String,
    pub subsystem_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computer_name: Option<String>,
    pub log_entries: Vec<LogEntry>,
}

// The entry body is a JSON string inside the entry; existing consumers
// depend on this exact key set and order.
#[derive(Serialize)]
struct EntryBody<'a> {
    inv: EntryInvocation<'a>,
    message: &'a str,
    level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EntryInvocation<'a> {
    invocation_id: &'a str,
    function_name: &'a str,
}

/// Runs extraction and severity filtering over the raw events of one
/// invocation and builds the ordered entry sequence.
///
/// Events with no matching extractor and events below `min_severity` are
/// dropped silently. Input order is preserved.
pub fn build_entries(
    events: &[RawLogEvent],
    function_name: &str,
    min_severity: Severity,
) -> Result<Vec<LogEntry>, serde_json::Error> {
    let mut entries = Vec::new();
    for event in events {
        let Some(fields) = extract_fields(event) else {
            continue;
        };
        let severity = Severity::from_level_text(&fields.level);
        if severity < min_severity {
            continue;
        }
        let body = EntryBody {
            inv: EntryInvocation {
                invocation_id: fields
                    .request_id
                    .as_deref()
                    .unwrap_or(DEFAULT_INVOCATION_ID),
                function_name,
            },
            message: &fields.message,
            level: fields.level.to_lowercase(),
            timestamp: fields.timestamp.as_deref(),
        };
        entries.push(LogEntry {
            timestamp: event.timestamp,
            text: serde_json::to_string(&body)?,
            severity: severity.ordinal(),
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::RawExtractedFields;

    fn pre_extracted(timestamp: i64, event: &str) -> RawLogEvent {
        RawLogEvent {
            id: None,
            timestamp,
            message: String::new(),
            extracted_fields: Some(RawExtractedFields {
                event: event.to_string(),
                request_id: None,
                timestamp: None,
            }),
        }
    }

    #[test]
    fn unknown_level_filters_as_info_but_serializes_verbatim() {
        let events = [
            pre_extracted(1_668_084_827_204, "BLEEP\tthis should end up as INFO message\n"),
            pre_extracted(1_668_084_827_204, "DEBUG\tthis should not be visible\n"),
        ];
        let entries =
            build_entries(&events, "/services/func/v1", Severity::Info).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0],
            LogEntry {
                timestamp: 1_668_084_827_204,
                text: concat!(
                    "{\"inv\":{\"invocationId\":\"n/a\",\"functionName\":\"/services/func/v1\"},",
                    "\"message\":\"this should end up as INFO message\",\"level\":\"bleep\"}"
                )
                .to_string(),
                severity: 3,
            }
        );
    }

    #[test]
    fn threshold_drops_lower_severities() {
        let events = [
            pre_extracted(0, "WARN\tthis should be visible\n"),
            pre_extracted(0, "INFO\tthis should not be visible\n"),
            pre_extracted(0, "DEBUG\tthis should not be visible, either\n"),
        ];
        let entries = build_entries(&events, "func", Severity::Warn).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].severity, 4);
        assert!(entries[0].text.contains("\"level\":\"warn\""));
    }

    #[test]
    fn entries_keep_input_order() {
        let events = [
            pre_extracted(1, "INFO\tfirst\n"),
            pre_extracted(2, "ERROR\tsecond\n"),
            pre_extracted(3, "INFO\tthird\n"),
        ];
        let entries = build_entries(&events, "func", Severity::Info).unwrap();
        let timestamps: Vec<i64> = entries.iter().map(|entry| entry.timestamp).collect();
        assert_eq!(timestamps, vec![1, 2, 3]);
    }

    #[test]
    fn unmatched_lines_are_dropped_silently() {
        let events = [RawLogEvent {
            id: None,
            timestamp: 0,
            message: "not a recognized log line\n".to_string(),
            extracted_fields: None,
        }];
        let entries = build_entries(&events, "func", Severity::Debug).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn timestamp_key_only_present_when_extracted() {
        let with_timestamp = RawLogEvent {
            id: None,
            timestamp: 1_666_708_005_982,
            message: String::new(),
            extracted_fields: Some(RawExtractedFields {
                event: "INFO\tflushing 1 pending requests...\n".to_string(),
                request_id: Some("1aa49921-c9b8-401c-9f3a-f22989ab8505".to_string()),
                timestamp: Some("2022-10-25T14:26:45.982Z".to_string()),
            }),
        };
        let entries = build_entries(&[with_timestamp], "indexer", Severity::Info).unwrap();
        assert_eq!(
            entries[0].text,
            concat!(
                "{\"inv\":{\"invocationId\":\"1aa49921-c9b8-401c-9f3a-f22989ab8505\",",
                "\"functionName\":\"indexer\"},",
                "\"message\":\"flushing 1 pending requests...\",\"level\":\"info\",",
                "\"timestamp\":\"2022-10-25T14:26:45.982Z\"}"
            )
        );

        let without = pre_extracted(0, "INFO\tmessage\n");
        let entries = build_entries(&[without], "indexer", Severity::Info).unwrap();
        assert!(!entries[0].text.contains("\"timestamp\""));
    }

    #[test]
    fn batch_serializes_with_camel_case_keys_and_optional_host() {
        let batch = LogBatch {
            private_key: "foo-id".to_string(),
            application_name: "my-app".to_string(),
            subsystem_name: "my-subsystem".to_string(),
            computer_name: None,
            log_entries: vec![],
        };
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["privateKey"], "foo-id");
        assert_eq!(json["applicationName"], "my-app");
        assert_eq!(json["subsystemName"], "my-subsystem");
        assert!(json.get("computerName").is_none());

        let batch = LogBatch {
            computer_name: Some("ip-10-0-0-1".to_string()),
            ..batch
        };
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["computerName"], "ip-10-0-0-1");
    }
}
