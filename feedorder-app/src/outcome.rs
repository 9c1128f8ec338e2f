use anyhow::Result;
use feedorder_common::OutputFormat;
use feedorder_core::{CheckError, CheckReport, ViolationReport};
use serde::Serialize;

/// Result of one run as printed on stdout.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome<'a> {
    Pass {
        #[serde(flatten)]
        report: &'a CheckReport,
    },
    Fail {
        kind: &'static str,
        message: String,
        listing_url: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        violation: Option<ViolationReport>,
    },
}

impl<'a> Outcome<'a> {
    pub fn pass(report: &'a CheckReport) -> Self {
        Self::Pass { report }
    }

    pub fn fail(error: &CheckError, listing_url: &'a str) -> Self {
        let violation = match error {
            CheckError::OrderViolation(report) => Some(*report),
            _ => None,
        };
        Self::Fail {
            kind: error.kind(),
            message: error.to_string(),
            listing_url,
            violation,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass { .. })
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        Ok(match (format, self) {
            (OutputFormat::Json, _) => serde_json::to_string(self)?,
            (OutputFormat::Text, Self::Pass { report }) => format!("PASS {}", report.summary()),
            (OutputFormat::Text, Self::Fail { kind, message, .. }) => {
                format!("FAIL [{kind}] {message}")
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::Value;

    fn report() -> CheckReport {
        CheckReport {
            listing_url: "https://listing.test/newest".into(),
            limit: 4,
            entries_checked: 4,
            pages_visited: 2,
            newest: Some(1_742_483_184),
            oldest: Some(1_742_483_000),
            final_url: Some("https://listing.test/newest?p=2".into()),
            duration_ms: 40,
            checked_at: Utc::now(),
        }
    }

    #[test]
    fn pass_renders_summary_line() {
        let report = report();
        let line = Outcome::pass(&report).render(OutputFormat::Text).unwrap();
        assert!(line.starts_with("PASS 4 entries across 2 page(s)"), "{line}");
    }

    #[test]
    fn pass_json_is_flat() {
        let report = report();
        let json = Outcome::pass(&report).render(OutputFormat::Json).unwrap();
        let v: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["status"], "pass");
        assert_eq!(v["entries_checked"], 4);
        assert_eq!(v["newest"], 1_742_483_184i64);
    }

    #[test]
    fn violation_json_carries_positions() {
        let err = CheckError::OrderViolation(ViolationReport {
            position: 3,
            prior: 99,
            offending: 101,
        });
        let outcome = Outcome::fail(&err, "https://listing.test/newest");
        assert!(!outcome.is_pass());

        let v: Value = serde_json::from_str(&outcome.render(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(v["status"], "fail");
        assert_eq!(v["kind"], "order_violation");
        assert_eq!(v["violation"]["position"], 3);
        assert_eq!(v["violation"]["prior"], 99);
        assert_eq!(v["violation"]["offending"], 101);
    }

    #[test]
    fn failure_text_names_kind_and_position() {
        let err = CheckError::MalformedLabel {
            label: "badformat".into(),
            position: 5,
        };
        let line = Outcome::fail(&err, "https://listing.test/newest")
            .render(OutputFormat::Text)
            .unwrap();
        assert_eq!(
            line,
            "FAIL [malformed_label] expected age label to have 2 items, but got \"badformat\" at entry #5"
        );
    }
}
