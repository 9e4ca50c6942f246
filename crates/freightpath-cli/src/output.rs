//! Output formatting for CLI results.
//!
//! Every command writes exactly one result to stdout: one JSON line in the
//! default format, or a human-readable block otherwise. Logs go to stderr.

use std::io::{self, Write};

use anyhow::Result;
use clap::ValueEnum;
use serde_json::Value;

use freightpath_lib::{
    output::render_ports, AnalysisSummary, ErrorSummary, PortRecord, RouteRenderMode,
    RouteSummary,
};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Single-line JSON.
    #[default]
    Json,
    /// Plain text summary.
    Text,
    /// Markdown-flavoured summary.
    Rich,
}

impl OutputFormat {
    fn render_mode(self) -> RouteRenderMode {
        match self {
            OutputFormat::Rich => RouteRenderMode::RichText,
            _ => RouteRenderMode::PlainText,
        }
    }
}

/// Serialise `value` as one JSON line.
pub fn json_line<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

pub fn format_route(format: OutputFormat, summary: &RouteSummary) -> Result<String> {
    match format {
        OutputFormat::Json => json_line(summary),
        other => Ok(summary.render(other.render_mode())),
    }
}

pub fn format_analysis(format: OutputFormat, summary: &AnalysisSummary) -> Result<String> {
    match format {
        OutputFormat::Json => json_line(summary),
        _ => Ok(summary.render_plain()),
    }
}

pub fn format_ports<'a>(
    format: OutputFormat,
    ports: impl IntoIterator<Item = &'a PortRecord>,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let listing: Vec<&PortRecord> = ports.into_iter().collect();
            json_line(&listing)
        }
        _ => Ok(render_ports(ports)),
    }
}

/// In-band failure: `{"error": "..."}` for JSON, an `error:` line otherwise.
pub fn format_error(format: OutputFormat, error: &dyn std::fmt::Display) -> Result<String> {
    match format {
        OutputFormat::Json => json_line(&ErrorSummary::new(error)),
        _ => Ok(format!("error: {error}")),
    }
}

/// Write a rendered result to stdout, guaranteeing a trailing newline.
pub fn emit(rendered: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

/// Parse a single JSON line back into a generic value; used by tests and
/// callers that post-process CLI output.
pub fn parse_json_line(line: &str) -> Result<Value> {
    Ok(serde_json::from_str(line.trim())?)
}
