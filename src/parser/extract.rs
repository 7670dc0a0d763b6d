use crate::event::RawLogEvent;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Canonical lowercase-hex 8-4-4-4-12 request id shape.
const UUID_PATTERN: &str =
    "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}";

/// Millisecond-precision UTC ISO-8601 timestamp.
const TIMESTAMP_PATTERN: &str =
    r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z";

/// Structured fields extracted from one raw log event.
///
/// `message` is always set; a `None` result from [`extract_fields`] means no
/// recognizer matched and the line is not a log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    /// Raw level text, case preserved, not validated against any table.
    pub level: String,
    pub message: String,
    pub request_id: Option<String>,
    pub timestamp: Option<String>,
}

type Extract = fn(&Captures<'_>) -> ExtractedFields;

/// Ordered recognizers for the text dialects of the Lambda runtime log
/// stream, first match wins. Adding a dialect is a table change, not a
/// control-flow change.
static RECOGNIZERS: LazyLock<Vec<(Regex, Extract)>> = LazyLock::new(|| {
    [
        (
            "(?s)^INIT_START (?P<text>.+)\n$".to_string(),
            init_start as Extract,
        ),
        (
            [
                "(?s)^(?P<phase>START|END|REPORT) RequestId: (?P<request_id>",
                UUID_PATTERN,
                ")(?P<text>.*)\n$",
            ]
            .concat(),
            lifecycle as Extract,
        ),
        // AWS uses this format to report unexpected runtime errors
        (
            [
                "(?s)^RequestId: (?P<request_id>",
                UUID_PATTERN,
                ") Error: (?P<text>.+)\n$",
            ]
            .concat(),
            runtime_error as Extract,
        ),
        // standard line shape: timestamp <tab> request id <tab> event
        (
            [
                "(?s)^(?P<timestamp>",
                TIMESTAMP_PATTERN,
                ")\t(?P<request_id>",
                UUID_PATTERN,
                ")\t(?P<text>.+)\n$",
            ]
            .concat(),
            structured as Extract,
        ),
    ]
    .into_iter()
    .map(|(pattern, extract)| {
        (
            Regex::new(&pattern).expect("static log dialect pattern"),
            extract,
        )
    })
    .collect()
});

fn init_start(caps: &Captures<'_>) -> ExtractedFields {
    ExtractedFields {
        level: "DEBUG".to_string(),
        message: format!("INIT_START {}", &caps["text"]),
        request_id: None,
        timestamp: None,
    }
}

fn lifecycle(caps: &Captures<'_>) -> ExtractedFields {
    let phase = &caps["phase"];
    let segments: Vec<&str> = caps["text"].split('\t').collect();
    // A `Status:` segment on a REPORT line signals a failed invocation.
    let level = if phase == "REPORT"
        && segments.iter().any(|segment| segment.starts_with("Status: "))
    {
        "ERROR"
    } else {
        "DEBUG"
    };
    ExtractedFields {
        level: level.to_string(),
        message: format!("{phase}{}", segments.join("\t")),
        request_id: Some(caps["request_id"].to_string()),
        timestamp: None,
    }
}

fn runtime_error(caps: &Captures<'_>) -> ExtractedFields {
    ExtractedFields {
        level: "ERROR".to_string(),
        message: caps["text"].to_string(),
        request_id: Some(caps["request_id"].to_string()),
        timestamp: None,
    }
}

fn structured(caps: &Captures<'_>) -> ExtractedFields {
    let mut segments: Vec<&str> = caps["text"].split('\t').collect();
    let message = segments.pop().unwrap_or_default().to_string();
    let level = match segments.pop() {
        Some(level) => level.to_string(),
        None if message.starts_with("Task timed out") => "ERROR".to_string(),
        None => "INFO".to_string(),
    };
    ExtractedFields {
        level,
        message,
        request_id: Some(caps["request_id"].to_string()),
        timestamp: Some(caps["timestamp"].to_string()),
    }
}

/// Extracts structured fields from a log event, either by splitting the
/// pre-extracted `event` value from the subscription filter, or by matching
/// the raw message against the ordered dialect recognizers.
///
/// Returns `None` when no recognizer matches; callers drop such lines
/// silently.
pub fn extract_fields(event: &RawLogEvent) -> Option<ExtractedFields> {
    if let Some(fields) = &event.extracted_fields {
        let raw = fields.event.trim_end_matches('\n');
        let (level, message) = match raw.split_once('\t') {
            Some((level, message)) => (level, message),
            None => ("INFO", raw),
        };
        return Some(ExtractedFields {
            level: level.to_string(),
            message: message.to_string(),
            request_id: fields.request_id.clone(),
            timestamp: fields.timestamp.clone(),
        });
    }
    RECOGNIZERS
        .iter()
        .find_map(|(pattern, extract)| pattern.captures(&event.message).map(|caps| extract(&caps)))
}
