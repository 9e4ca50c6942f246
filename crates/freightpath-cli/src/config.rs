//! Source configuration for a CLI run.
//!
//! Every override can come from a flag or from its environment variable (clap
//! resolves flag > env); anything left unset falls back to the library's
//! built-in data and the network geocoder.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use freightpath_lib::{
    select_maritime_provider, Gazetteer, Geocoder, HeuristicTables, NominatimGeocoder,
    PortRegistry, RouteContext,
};

/// Data-source overrides accepted by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Directory containing `searoute.jar`.
    #[arg(long, env = "FREIGHTPATH_SEAROUTE_DIR", global = true)]
    pub searoute_dir: Option<PathBuf>,

    /// Nominatim-compatible search endpoint.
    #[arg(long, env = "FREIGHTPATH_GEOCODER_URL", global = true)]
    pub geocoder_url: Option<String>,

    /// JSON gazetteer served instead of the network geocoder.
    #[arg(long, env = "FREIGHTPATH_GAZETTEER", global = true)]
    pub gazetteer: Option<PathBuf>,

    /// CSV port registry (`slug,name,lon,lat,country`) replacing the built-in ports.
    #[arg(long = "ports", env = "FREIGHTPATH_PORTS_FILE", global = true)]
    pub ports_file: Option<PathBuf>,

    /// JSON heuristic tables replacing the built-in ones.
    #[arg(long, env = "FREIGHTPATH_TABLES", global = true)]
    pub tables: Option<PathBuf>,
}

impl SourceArgs {
    /// Port registry to use for this run.
    pub fn load_registry(&self) -> Result<Arc<PortRegistry>> {
        match &self.ports_file {
            Some(path) => {
                let registry = PortRegistry::from_path(path).with_context(|| {
                    format!("failed to load port registry from {}", path.display())
                })?;
                debug!(path = %path.display(), ports = registry.len(), "loaded port registry");
                Ok(Arc::new(registry))
            }
            None => Ok(PortRegistry::builtin()),
        }
    }

    fn load_tables(&self) -> Result<Arc<HeuristicTables>> {
        match &self.tables {
            Some(path) => {
                let tables = HeuristicTables::from_path(path).with_context(|| {
                    format!("failed to load heuristic tables from {}", path.display())
                })?;
                Ok(Arc::new(tables))
            }
            None => Ok(Arc::new(HeuristicTables::default())),
        }
    }

    fn geocoder(&self) -> Result<Box<dyn Geocoder>> {
        if let Some(path) = &self.gazetteer {
            let gazetteer = Gazetteer::from_path(path)
                .with_context(|| format!("failed to load gazetteer from {}", path.display()))?;
            debug!(path = %path.display(), places = gazetteer.len(), "using offline gazetteer");
            return Ok(Box::new(gazetteer));
        }
        let geocoder = match &self.geocoder_url {
            Some(url) => NominatimGeocoder::with_endpoint(url.as_str()),
            None => NominatimGeocoder::new(),
        }
        .context("failed to build the geocoding client")?;
        Ok(Box::new(geocoder))
    }

    /// Assemble the planning context: geocoder, maritime provider, ports, tables.
    pub fn build_context(&self) -> Result<RouteContext> {
        let context = RouteContext::new(
            self.geocoder()?,
            select_maritime_provider(self.searoute_dir.as_deref()),
        )
        .with_registry(self.load_registry()?)
        .with_tables(self.load_tables()?);
        Ok(context)
    }
}
