use serde_json::{Map, Value};
use wordscore_logging::score_warn;

use crate::{StatusReport, SubmitReply};

const UNKNOWN_ERROR: &str = "unknown error";

/// Decode a start-job reply. A body that is not a JSON object carries no task id.
/// A numeric `task_id` is accepted as its decimal text.
pub fn parse_submit_body(body: &str) -> SubmitReply {
    let task_id = match parse_object(body, "Submit") {
        Some(fields) => fields.get("task_id").and_then(lenient_string),
        None => None,
    };
    SubmitReply { task_id }
}

/// Decode a task-status reply. Only `status` decides the outcome; the other
/// fields are read leniently and dropped when they cannot be used. Anything that
/// does not fit a known status is `Unrecognized` with the raw body kept for logging.
pub fn parse_status_body(body: &str) -> StatusReport {
    let Some(fields) = parse_object(body, "Status") else {
        return unrecognized(body);
    };

    match fields.get("status").and_then(Value::as_str) {
        Some("pending") => StatusReport::Pending {
            progress: fields.get("progress").and_then(lenient_number),
        },
        Some("success") => match fields.get("total_occurrences").and_then(lenient_count) {
            Some(total_occurrences) => StatusReport::Success {
                total_occurrences,
                all_pages: fields.get("all_pages").map(lenient_pages).unwrap_or_default(),
            },
            None => unrecognized(body),
        },
        Some("error") => StatusReport::Error {
            message: fields
                .get("message")
                .and_then(lenient_string)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        },
        _ => unrecognized(body),
    }
}

fn parse_object(body: &str, what: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => Some(fields),
        Ok(_) => {
            score_warn!("{} reply is not a JSON object", what);
            None
        }
        Err(err) => {
            score_warn!("{} reply is not valid JSON: {}", what, err);
            None
        }
    }
}

/// Strings as-is, numbers and other non-null values as their JSON text.
fn lenient_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn lenient_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}

fn lenient_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn lenient_pages(value: &Value) -> Vec<String> {
    match value {
        Value::Array(pages) => pages.iter().filter_map(lenient_string).collect(),
        _ => Vec::new(),
    }
}

fn unrecognized(body: &str) -> StatusReport {
    StatusReport::Unrecognized {
        body: body.to_string(),
    }
}
