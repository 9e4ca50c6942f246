//! `calculate_route` handler.

use anyhow::Result;
use tracing::warn;

use freightpath_lib::{
    plan_route, DatelineMode, RouteContext, RouteRequest, RouteSummary, SeaResolution,
};

use freightpath_cli::output::{emit, format_error, format_route, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    pub origin: String,
    pub destination: String,
    /// Raw resolution argument; validated when the request is built.
    pub resolution: Option<String>,
    pub dateline: DatelineMode,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> freightpath_lib::Result<RouteRequest> {
        let resolution = match self.resolution.as_deref() {
            Some(raw) => raw.parse::<SeaResolution>()?,
            None => SeaResolution::default(),
        };
        Ok(
            RouteRequest::new(self.origin.as_str(), self.destination.as_str())
                .with_resolution(resolution)
                .with_dateline(self.dateline),
        )
    }
}

/// Handle the route subcommand.
///
/// Argument and planning failures are reported in-band on stdout and do not change the
/// exit status; only output errors propagate.
pub fn handle_route_command(
    context: &RouteContext,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let planned = args
        .to_request()
        .and_then(|request| plan_route(context, &request));
    let rendered = match planned {
        Ok(plan) => format_route(format, &RouteSummary::from(&plan.route))?,
        Err(error) => {
            warn!(origin = %args.origin, destination = %args.destination, %error, "route calculation failed");
            format_error(format, &error)?
        }
    };
    emit(&rendered)
}
