//! `ports` handler: list the active port registry.

use anyhow::Result;

use freightpath_cli::config::SourceArgs;
use freightpath_cli::output::{emit, format_ports, OutputFormat};

pub fn handle_ports_command(sources: &SourceArgs, format: OutputFormat) -> Result<()> {
    let registry = sources.load_registry()?;
    emit(&format_ports(format, registry.iter())?)
}
