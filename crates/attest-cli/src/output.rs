//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use attest_domain::Severity;
use attest_runner::{ApplyOutcome, FixPlan, RunReport};
use colored::*;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a run report.
    pub fn format_report(&self, report: &RunReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Text => Ok(self.report_text(report)),
        }
    }

    fn report_text(&self, report: &RunReport) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Datasets: {}\nURLs checked: {}  skipped (out of scope): {}  incomplete: {}\n",
            report.datasets.join(", "),
            report.checked_urls,
            report.skipped_out_of_scope,
            report.incomplete_checks,
        ));

        if report.findings.is_empty() {
            out.push('\n');
            out.push_str(&self.success("No findings."));
            out.push('\n');
            return out;
        }

        out.push('\n');
        for (kind, count) in &report.counts {
            out.push_str(&format!("  {:<30} {}\n", kind, count));
        }
        out.push('\n');
        for finding in &report.findings {
            let line = finding.to_string();
            let line = match finding.severity {
                Severity::Error => self.colorize(&line, "red"),
                Severity::Warning => self.colorize(&line, "yellow"),
            };
            out.push_str(&line);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&format!(
            "{} error(s), {} warning(s)\n",
            report.error_count(),
            report.warning_count()
        ));
        out
    }

    /// Format the outcome of applying a fix plan.
    pub fn format_apply(&self, outcome: &ApplyOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
            OutputFormat::Text => {
                let mut out = String::new();
                for change in &outcome.changes {
                    out.push_str(&format!(
                        "{}/{}: {} -> {}{}\n",
                        change.dataset,
                        change.claim,
                        change.old_url,
                        change.new_url,
                        if change.dropped_excerpt {
                            " (stored excerpt dropped)"
                        } else {
                            ""
                        }
                    ));
                }
                let verb = if outcome.dry_run {
                    "Would apply"
                } else {
                    "Applied"
                };
                out.push_str(&self.success(&format!("{} {} fix(es)", verb, outcome.changes.len())));
                out.push('\n');
                Ok(out)
            }
        }
    }

    /// Format a candidate fix plan as ready-to-edit JSON.
    pub fn format_plan(&self, plan: &FixPlan) -> Result<String> {
        // Always JSON: the output is meant to be reviewed and fed back
        // to `attest apply`.
        Ok(serde_json::to_string_pretty(plan)?)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }
        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_domain::{Finding, FindingKind};
    use chrono::Utc;

    fn sample_report() -> RunReport {
        let mut report = RunReport::started(Utc::now());
        report.datasets = vec!["acme".to_string()];
        report.checked_urls = 3;
        report.add_findings(vec![Finding::new(
            FindingKind::PermanentUnreachable,
            Severity::Error,
            "reachability check failed (HTTP 404)",
        )
        .with_dataset("acme")
        .with_url("https://docs.example.com/gone")]);
        report
    }

    #[test]
    fn test_text_report() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_report(&sample_report()).unwrap();
        assert!(output.contains("permanent-unreachable"));
        assert!(output.contains("1 error(s), 0 warning(s)"));
    }

    #[test]
    fn test_json_report_round_trips() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_report(&sample_report()).unwrap();
        let back: RunReport = serde_json::from_str(&output).unwrap();
        assert_eq!(back.checked_urls, 3);
    }

    #[test]
    fn test_no_findings_message() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let mut report = RunReport::started(Utc::now());
        report.datasets = vec!["acme".to_string()];
        let output = formatter.format_report(&report).unwrap();
        assert!(output.contains("No findings"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        assert_eq!(formatter.success("done"), "✓ done");
    }
}
