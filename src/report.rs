//! Rendering of attempts and run summaries.
//!
//! `text` mirrors classic ping output, `json` prints one object per line.

use serde::{Deserialize, Serialize};

use crate::attempt::AttemptResult;
use crate::stats::AggregateResult;

/// Output format for attempts and the final summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable ping-style lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

#[derive(Serialize)]
struct JsonLine<'a, T: Serialize> {
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<&'a str>,
    #[serde(flatten)]
    body: &'a T,
}

pub fn format_attempt(attempt: &AttemptResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => attempt.to_string(),
        OutputFormat::Json => to_json(&JsonLine { kind: "attempt", host: None, body: attempt }),
    }
}

pub fn format_summary(host: &str, result: &AggregateResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!(
            "--- {} tcplatency statistics ---\n\
             {} packets transmitted, {} successful, {} failed\n\
             min/avg/max/mdev = {:.2}/{:.2}/{:.2}/{:.2} ms",
            host,
            result.count,
            result.successful,
            result.failed,
            result.min,
            result.average,
            result.max,
            result.std_dev,
        ),
        OutputFormat::Json => to_json(&JsonLine { kind: "summary", host: Some(host), body: result }),
    }
}

pub fn print_attempt(attempt: &AttemptResult, format: OutputFormat) {
    println!("{}", format_attempt(attempt, format));
}

pub fn print_summary(host: &str, result: &AggregateResult, format: OutputFormat) {
    println!("{}", format_summary(host, result, format));
}

fn to_json<T: Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("failed to serialize report line: {:?}", e);
            String::new()
        }
    }
}
