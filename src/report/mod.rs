pub mod types;

pub use types::{AnalysisReport, FlagKind, RiskLevel};

use colored::Colorize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report file: {0}")]
    FileWrite(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output the report.
///
/// - no path, not JSON: colored terminal report on stdout
/// - path, not JSON: markdown file
/// - JSON: the wire shape, on stdout or into the file
#[instrument(skip(report), fields(risk = %report.risk_level, flags = report.flags.len()))]
pub fn output(report: &AnalysisReport, json: bool, output_path: Option<&Path>) -> Result<(), ReportError> {
    let rendered = if json {
        debug!("rendering report as JSON");
        let mut text = serde_json::to_string_pretty(report)?;
        text.push('\n');
        text
    } else if output_path.is_some() {
        debug!("rendering report as markdown");
        render_markdown(report)
    } else {
        debug!("rendering report for terminal");
        render_terminal(report)
    };

    match output_path {
        None => {
            print!("{}", rendered);
            Ok(())
        }
        Some(path) => {
            debug!(path = %path.display(), "writing report to file");
            std::fs::write(path, rendered)?;
            Ok(())
        }
    }
}

/// Format the report for the terminal:
///
/// ═══ Risk Assessment ═══
/// High Risk
///
/// ═══ Changes Summary ═══
/// [Database Migration]
///   • General logic update.
///
/// ═══ Detection Flags ═══
///   ▲ Destructive Database Operation detected.
fn render_terminal(report: &AnalysisReport) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str("═══ Risk Assessment ═══\n");
    out.push_str(&format!("{}\n", colorize_risk(report.risk_level)));
    out.push('\n');

    out.push_str("═══ Changes Summary ═══\n");
    if !report.file_types.is_empty() {
        let tags: Vec<String> = report
            .file_types
            .iter()
            .map(|t| format!("[{}]", t).dimmed().to_string())
            .collect();
        out.push_str(&format!("{}\n", tags.join(" ")));
    }
    for line in &report.summary {
        out.push_str(&format!("  • {}\n", line));
    }
    out.push('\n');

    // The flags card is only shown when something was detected.
    if !report.flags.is_empty() {
        out.push_str("═══ Detection Flags ═══\n");
        for flag in &report.flags {
            let line = format!("▲ {}", flag.message);
            let styled = match flag.kind {
                FlagKind::Danger => line.red(),
                FlagKind::Warning => line.yellow(),
                FlagKind::Info => line.blue(),
            };
            out.push_str(&format!("  {}\n", styled));
        }
        out.push('\n');
    }
    out
}

/// Format the report as markdown.
fn render_markdown(report: &AnalysisReport) -> String {
    let mut md = String::new();
    md.push_str("# Diff Risk Assessment\n\n");
    md.push_str(&format!("**Risk Level: {}**\n\n", report.risk_level));

    md.push_str("## Changes Summary\n\n");
    if !report.file_types.is_empty() {
        md.push_str(&format!("**File types:** {}\n\n", report.file_types.join(", ")));
    }
    for line in &report.summary {
        md.push_str(&format!("- {}\n", line));
    }
    md.push('\n');

    if !report.flags.is_empty() {
        md.push_str("## Detection Flags\n\n");
        for flag in &report.flags {
            md.push_str(&format!("- **[{}]** {}\n", flag.kind, flag.message));
        }
        md.push('\n');
    }
    md
}

/// Helper to colorize a risk level for terminal output.
fn colorize_risk(level: RiskLevel) -> colored::ColoredString {
    let label = format!("{} Risk", level);
    match level {
        RiskLevel::High => label.red().bold(),
        RiskLevel::Medium => label.yellow().bold(),
        RiskLevel::Low => label.green().bold(),
    }
}
