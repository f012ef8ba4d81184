//! Output formatting: plain text (human-readable) and JSON.

use flowripple_lib::{Captured, SignedEnvelope};
use serde_json::{json, Value};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable key-value lines
    #[default]
    Plain,
    /// JSON (pretty-printed)
    Json,
}

/// Result of one CLI command, ready to print.
#[derive(Debug)]
pub enum Report {
    Captured {
        event: String,
        url: String,
        outcome: Captured,
    },
    Signed(SignedEnvelope),
    Version(&'static str),
}

impl Report {
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Plain => self.plain(),
            OutputFormat::Json => {
                serde_json::to_string_pretty(&self.to_json()).unwrap_or_else(|e| e.to_string())
            }
        }
    }

    fn plain(&self) -> String {
        match self {
            Report::Captured {
                event,
                url,
                outcome,
            } => format!("{} {} -> {}", outcome_label(*outcome), event, url),
            Report::Signed(envelope) => {
                let mut out = String::new();
                for (name, value) in envelope.headers() {
                    let _ = writeln!(out, "{}: {}", name, value);
                }
                let _ = write!(out, "\n{}", envelope.body);
                out
            }
            Report::Version(version) => format!("flowripple {}", version),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Report::Captured {
                event,
                url,
                outcome,
            } => json!({
                "event": event,
                "url": url,
                "outcome": outcome_label(*outcome),
            }),
            Report::Signed(envelope) => {
                let headers: serde_json::Map<String, Value> = envelope
                    .headers()
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), Value::String(value)))
                    .collect();
                json!({
                    "headers": headers,
                    "body": envelope.body,
                })
            }
            Report::Version(version) => json!({ "version": version }),
        }
    }
}

fn outcome_label(outcome: Captured) -> &'static str {
    match outcome {
        Captured::Delivered => "delivered",
        Captured::Suppressed => "suppressed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope() -> SignedEnvelope {
        SignedEnvelope {
            client_id: 1,
            timestamp: "1700000000000".to_string(),
            signature: "abc123".to_string(),
            body: r#"{"event":"e","payload":{}}"#.to_string(),
        }
    }

    #[test]
    fn captured_plain_and_json() {
        let report = Report::Captured {
            event: "user.signup".to_string(),
            url: "http://x/sdk/v1/capture".to_string(),
            outcome: Captured::Suppressed,
        };
        assert_eq!(
            report.render(OutputFormat::Plain),
            "suppressed user.signup -> http://x/sdk/v1/capture"
        );
        let v: Value = serde_json::from_str(&report.render(OutputFormat::Json)).unwrap();
        assert_eq!(v["outcome"], "suppressed");
        assert_eq!(v["event"], "user.signup");
    }

    #[test]
    fn signed_lists_headers_then_body() {
        let plain = Report::Signed(envelope()).render(OutputFormat::Plain);
        let lines: Vec<&str> = plain.lines().collect();
        assert_eq!(lines[0], "X-Flowripple-Api-Client-Id: 1");
        assert_eq!(lines[1], "X-Flowripple-Signature: abc123");
        assert_eq!(lines[2], "X-Flowripple-Timestamp: 1700000000000");
        assert_eq!(lines[4], r#"{"event":"e","payload":{}}"#);

        let v: Value =
            serde_json::from_str(&Report::Signed(envelope()).render(OutputFormat::Json)).unwrap();
        assert_eq!(v["headers"]["X-Flowripple-Signature"], "abc123");
        assert_eq!(v["body"], r#"{"event":"e","payload":{}}"#);
    }

    #[test]
    fn version_plain() {
        assert_eq!(
            Report::Version("0.1.0").render(OutputFormat::Plain),
            "flowripple 0.1.0"
        );
    }
}
