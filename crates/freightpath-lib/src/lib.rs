//! Freightpath library entry points.
//!
//! This crate decides how freight should move between two named places (by
//! land, by sea, or both), splits the trip into land and sea segments anchored
//! on known ports, and assembles them into a [`Route`] with aggregate totals.
//! Higher-level consumers (the CLI) should only depend on the functions
//! exported here instead of reimplementing behavior.
//!

pub mod analysis;
pub mod error;
pub mod geo;
pub mod geocode;
pub mod heuristics;
pub mod longitude;
pub mod maritime;
pub mod model;
pub mod output;
pub mod ports;
pub mod routing;

#[cfg(test)]
mod test_helpers;

pub use analysis::{ModeRule, RouteAnalysis, RouteAnalyzer, TransportMode, WaterCrossingReason};
pub use error::{Error, Result};
pub use geo::{haversine_km, planar_path_km, BoundingBox};
pub use geocode::{Gazetteer, Geocoder, NominatimGeocoder};
pub use heuristics::HeuristicTables;
pub use longitude::{normalize_longitudes, wrap_longitude, DatelineMode};
pub use maritime::{
    select_maritime_provider, MaritimePathProvider, SeaResolution, SeaRouteTool,
    StraightLineProvider,
};
pub use model::{Coordinate, Route, Segment, SegmentKind};
pub use output::{AnalysisSummary, ErrorSummary, RouteRenderMode, RouteSummary, SegmentSummary};
pub use ports::{PortRecord, PortRegistry};
pub use routing::{
    analyze_route, assemble_route, plan_route, AnalyzedPair, RouteContext, RoutePlan,
    RouteRequest,
};
