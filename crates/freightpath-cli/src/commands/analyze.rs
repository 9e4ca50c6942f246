//! `analyze` handler: mode selection without segment construction.

use anyhow::Result;
use tracing::warn;

use freightpath_lib::{analyze_route, AnalysisSummary, RouteContext, RouteRequest};

use freightpath_cli::output::{emit, format_analysis, format_error, OutputFormat};

pub fn handle_analyze_command(
    context: &RouteContext,
    format: OutputFormat,
    origin: &str,
    destination: &str,
) -> Result<()> {
    let request = RouteRequest::new(origin, destination);
    let rendered = match analyze_route(context, &request) {
        Ok(pair) => format_analysis(format, &AnalysisSummary::from_pair(&request, &pair))?,
        Err(error) => {
            warn!(origin, destination, %error, "route analysis failed");
            format_error(format, &error)?
        }
    };
    emit(&rendered)
}
