use serde::Serialize;

use super::{EventRow, Formatter, iso8601_timestamp};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonRow<'a> {
    ts: String,
    #[serde(flatten)]
    row: &'a EventRow,
}

impl Formatter for JsonFormatter {
    fn format(&self, row: &EventRow) -> String {
        let line = JsonRow {
            ts: iso8601_timestamp(),
            row,
        };
        serde_json::to_string(&line).unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
    }
}
