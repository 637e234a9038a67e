//! Per-line classification of decoded stream records.

use serde_json::Value;

use crate::types::{SearchResult, StreamEvent};

/// Parse one complete line and classify it by its `type` discriminator.
///
/// Never fails: anything that is not valid JSON, lacks a recognized `type`,
/// or is missing required fields comes back as [`StreamEvent::Malformed`] so
/// the caller can keep consuming the stream.
#[must_use]
pub fn dispatch_line(line: &str) -> StreamEvent {
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(error = %err, line, "discarding non-JSON stream line");
            return StreamEvent::Malformed {
                raw_line: line.to_owned(),
            };
        }
    };

    match value.get("type").and_then(Value::as_str) {
        Some("progress") => match message_of(&value) {
            Some(message) => StreamEvent::Progress { message },
            None => malformed(line, "progress record without a message"),
        },
        Some("warning") => match message_of(&value) {
            Some(message) => StreamEvent::Warning { message },
            None => malformed(line, "warning record without a message"),
        },
        Some("result") => match serde_json::from_value::<SearchResult>(value.clone()) {
            Ok(payload) => StreamEvent::Result { payload },
            Err(err) => {
                tracing::debug!(error = %err, line, "result record failed to deserialize");
                StreamEvent::Malformed {
                    raw_line: line.to_owned(),
                }
            }
        },
        Some(other) => {
            // Unknown types must never terminate the session; they are
            // counted by the controller but kept out of the visible log.
            tracing::debug!(record_type = other, line, "dropping record with unrecognized type");
            StreamEvent::Malformed {
                raw_line: line.to_owned(),
            }
        }
        None => malformed(line, "record without a type field"),
    }
}

fn message_of(value: &Value) -> Option<String> {
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

fn malformed(line: &str, reason: &str) -> StreamEvent {
    tracing::debug!(reason, line, "malformed stream record");
    StreamEvent::Malformed {
        raw_line: line.to_owned(),
    }
}

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod tests;
