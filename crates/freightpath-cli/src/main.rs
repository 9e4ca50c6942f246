mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use freightpath_lib::DatelineMode;

use freightpath_cli::config::SourceArgs;
use freightpath_cli::output::OutputFormat;

use commands::route::RouteCommandArgs;

#[derive(Parser, Debug)]
#[command(author, version, about = "Multimodal (land/sea) freight route planner")]
struct Cli {
    /// Output format for command results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    format: OutputFormat,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    sources: SourceArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a trip between two places into land and sea segments.
    #[command(name = "calculate_route", alias = "route")]
    CalculateRoute {
        /// Origin place name.
        origin: String,
        /// Destination place name.
        destination: String,
        /// Sea network resolution in km (5, 10, 20, 50 or 100). Other values
        /// are reported as an in-band error.
        #[arg(value_name = "RESOLUTION_KM")]
        resolution_km: Option<String>,
        /// Sea network resolution in km; alternative to the positional form.
        #[arg(long = "resolution", conflicts_with = "resolution_km")]
        resolution: Option<String>,
        /// Date-line handling for sea-leg longitudes.
        #[arg(long, default_value_t = DatelineMode::Continuous)]
        dateline: DatelineMode,
    },
    /// Report the transport mode chosen for a place pair.
    Analyze {
        origin: String,
        destination: String,
    },
    /// List the port registry.
    Ports,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::CalculateRoute {
            origin,
            destination,
            resolution_km,
            resolution,
            dateline,
        } => {
            let context = cli.sources.build_context()?;
            let args = RouteCommandArgs {
                origin,
                destination,
                resolution: resolution_km.or(resolution),
                dateline,
            };
            commands::route::handle_route_command(&context, cli.format, &args)
        }
        Command::Analyze {
            origin,
            destination,
        } => {
            let context = cli.sources.build_context()?;
            commands::analyze::handle_analyze_command(&context, cli.format, &origin, &destination)
        }
        Command::Ports => commands::ports::handle_ports_command(&cli.sources, cli.format),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
