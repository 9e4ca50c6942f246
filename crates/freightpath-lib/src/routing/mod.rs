//! Route planning for multimodal freight trips.
//!
//! This module provides:
//! - [`RouteRequest`] - High-level route planning request
//! - [`RouteContext`] - Collaborators and lookup data shared across requests
//! - [`RoutePlan`] - Planned route together with the analysis behind it
//! - [`plan_route`] - Main entry point for computing routes
//!
//! # Strategy Pattern
//!
//! Geocoding and sea-path geometry sit behind the [`Geocoder`] and
//! [`MaritimePathProvider`] traits. Production code wires in Nominatim and the
//! SeaRoute tool; tests and offline runs swap in the gazetteer and the
//! straight-line provider without touching the orchestration below.
//!
//! # Example
//!
//! ```ignore
//! use freightpath_lib::{plan_route, Gazetteer, RouteContext, RouteRequest, StraightLineProvider};
//!
//! let context = RouteContext::new(Box::new(gazetteer), Box::new(StraightLineProvider));
//! let plan = plan_route(&context, &RouteRequest::new("Shanghai", "Rotterdam"))?;
//! println!("{}: {:.0} km", plan.route.description(), plan.route.total_distance_km());
//! ```

mod assembler;
mod segments;

pub use assembler::assemble_route;
pub use segments::{Endpoint, RouteLayout, SegmentBuilder};

use std::sync::Arc;

use tracing::info;

use crate::analysis::{RouteAnalysis, RouteAnalyzer};
use crate::error::Result;
use crate::geocode::Geocoder;
use crate::heuristics::HeuristicTables;
use crate::longitude::DatelineMode;
use crate::maritime::{MaritimePathProvider, SeaResolution};
use crate::model::{Coordinate, Route};
use crate::ports::PortRegistry;

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
    /// Sea network resolution handed to the maritime provider.
    pub resolution: SeaResolution,
    /// How sea-leg longitudes are normalised around the date line.
    pub dateline: DatelineMode,
}

impl RouteRequest {
    /// Request with the default resolution and date-line handling.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            resolution: SeaResolution::default(),
            dateline: DatelineMode::default(),
        }
    }

    pub fn with_resolution(mut self, resolution: SeaResolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_dateline(mut self, dateline: DatelineMode) -> Self {
        self.dateline = dateline;
        self
    }
}

/// Collaborators and read-only lookup data used to plan routes.
pub struct RouteContext {
    geocoder: Box<dyn Geocoder>,
    maritime: Box<dyn MaritimePathProvider>,
    registry: Arc<PortRegistry>,
    tables: Arc<HeuristicTables>,
}

impl RouteContext {
    /// Context backed by the built-in port registry and heuristic tables.
    pub fn new(geocoder: Box<dyn Geocoder>, maritime: Box<dyn MaritimePathProvider>) -> Self {
        Self {
            geocoder,
            maritime,
            registry: PortRegistry::builtin(),
            tables: Arc::new(HeuristicTables::default()),
        }
    }

    /// Replace the port registry.
    pub fn with_registry(mut self, registry: Arc<PortRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the analyzer's lookup tables.
    pub fn with_tables(mut self, tables: Arc<HeuristicTables>) -> Self {
        self.tables = tables;
        self
    }

    pub fn registry(&self) -> &PortRegistry {
        &self.registry
    }

    pub fn tables(&self) -> &HeuristicTables {
        &self.tables
    }

    pub fn maritime_provider(&self) -> &dyn MaritimePathProvider {
        self.maritime.as_ref()
    }

    fn analyzer(&self) -> RouteAnalyzer<'_> {
        RouteAnalyzer::new(&self.registry, &self.tables)
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    pub route: Route,
    pub analysis: RouteAnalysis,
    /// Geocoded origin, as given to the analyzer.
    pub origin: Coordinate,
    /// Geocoded destination, as given to the analyzer.
    pub destination: Coordinate,
}

/// Analysis of a place pair along with the coordinates it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedPair {
    pub analysis: RouteAnalysis,
    pub origin: Coordinate,
    pub destination: Coordinate,
}

/// Geocode both endpoints of `request` and classify the trip without
/// building any segments.
pub fn analyze_route(context: &RouteContext, request: &RouteRequest) -> Result<AnalyzedPair> {
    let origin = context.geocoder.resolve(&request.origin)?;
    let destination = context.geocoder.resolve(&request.destination)?;
    let analysis =
        context
            .analyzer()
            .analyze(&request.origin, &request.destination, origin, destination);
    Ok(AnalyzedPair {
        analysis,
        origin,
        destination,
    })
}

// =============================================================================
// Main Entry Point
// =============================================================================

/// Compute a multimodal route between two named places.
///
/// This is the main entry point for route planning. It:
/// 1. Geocodes both endpoints (any failure aborts the whole request)
/// 2. Runs the analyzer to pick a transport mode
/// 3. Builds segments for that mode, calling the maritime provider once per sea leg
/// 4. Assembles the segments into a [`Route`], failing if none were produced
pub fn plan_route(context: &RouteContext, request: &RouteRequest) -> Result<RoutePlan> {
    let AnalyzedPair {
        analysis,
        origin,
        destination,
    } = analyze_route(context, request)?;

    let origin_endpoint = Endpoint {
        name: &request.origin,
        coordinate: origin,
        is_port: analysis.origin_is_port,
    };
    let destination_endpoint = Endpoint {
        name: &request.destination,
        coordinate: destination,
        is_port: analysis.destination_is_port,
    };

    let segments = SegmentBuilder::new(&context.registry, context.maritime.as_ref())
        .with_resolution(request.resolution)
        .with_dateline(request.dateline)
        .build(
            analysis.recommended_mode,
            &origin_endpoint,
            &destination_endpoint,
        );

    let layout = RouteLayout::select(
        analysis.recommended_mode,
        analysis.origin_is_port,
        analysis.destination_is_port,
    );
    let route = assemble_route(
        segments,
        layout.describe(&request.origin, &request.destination),
    )?;

    info!(
        origin = %request.origin,
        destination = %request.destination,
        mode = %analysis.recommended_mode,
        segments = route.segments().len(),
        distance_km = route.total_distance_km(),
        "route planned"
    );

    Ok(RoutePlan {
        route,
        analysis,
        origin,
        destination,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::TransportMode;
    use crate::error::Error;
    use crate::geocode::Gazetteer;
    use crate::model::SegmentKind;
    use crate::test_helpers::RecordingProvider;

    fn gazetteer() -> Gazetteer {
        Gazetteer::new()
            .with_place("Bogotá, Colombia", Coordinate::new(-74.0721, 4.711))
            .with_place("Medellín, Colombia", Coordinate::new(-75.5636, 6.2442))
            .with_place("Shanghai", Coordinate::new(121.4737, 31.2304))
            .with_place("Rotterdam", Coordinate::new(4.4777, 51.9244))
    }

    #[test]
    fn unknown_place_aborts_planning() {
        let context = RouteContext::new(
            Box::new(gazetteer()),
            Box::new(RecordingProvider::straight()),
        );
        let err = plan_route(&context, &RouteRequest::new("Shanghai", "Atlantis")).unwrap_err();
        assert!(matches!(err, Error::UnknownPlace { ref name } if name == "Atlantis"));
    }

    #[test]
    fn domestic_short_haul_is_single_land_segment() {
        let context = RouteContext::new(
            Box::new(gazetteer()),
            Box::new(RecordingProvider::straight()),
        );
        let plan = plan_route(
            &context,
            &RouteRequest::new("Bogotá, Colombia", "Medellín, Colombia"),
        )
        .unwrap();

        assert_eq!(plan.analysis.recommended_mode, TransportMode::LandOnly);
        assert_eq!(plan.route.kinds(), vec![SegmentKind::Land]);
        assert_eq!(
            plan.route.segments()[0].waypoints(),
            &[plan.origin, plan.destination]
        );
        assert_eq!(
            plan.route.description(),
            "Land only: Bogotá, Colombia -> Medellín, Colombia"
        );
    }

    #[test]
    fn empty_sea_path_fails_with_empty_route() {
        let context =
            RouteContext::new(Box::new(gazetteer()), Box::new(RecordingProvider::empty()));
        let err = plan_route(&context, &RouteRequest::new("Shanghai", "Rotterdam")).unwrap_err();
        assert!(matches!(err, Error::EmptyRoute));
    }

    #[test]
    fn out_of_range_geocode_is_rejected_before_routing() {
        let provider = RecordingProvider::straight();
        let context = RouteContext::new(
            Box::new(gazetteer().with_place("Shanghai", Coordinate::new(1e20, 31.2304))),
            Box::new(provider),
        );
        let err = plan_route(&context, &RouteRequest::new("Shanghai", "Rotterdam")).unwrap_err();
        assert!(matches!(err, Error::InvalidGeocoderResponse { ref name, .. } if name == "Shanghai"));
    }

    #[test]
    fn context_exposes_its_collaborators() {
        let tables = Arc::new(HeuristicTables::default());
        let context = RouteContext::new(
            Box::new(gazetteer()),
            Box::new(RecordingProvider::straight()),
        )
        .with_tables(Arc::clone(&tables));

        assert_eq!(context.maritime_provider().name(), "recording");
        assert_eq!(context.tables(), tables.as_ref());
        assert_eq!(context.registry(), PortRegistry::builtin().as_ref());
    }

    #[test]
    fn analyze_route_reports_coordinates() {
        let context = RouteContext::new(
            Box::new(gazetteer()),
            Box::new(RecordingProvider::straight()),
        );
        let pair = analyze_route(&context, &RouteRequest::new("Shanghai", "Rotterdam")).unwrap();
        assert!(pair.analysis.origin_is_port);
        assert!(pair.analysis.destination_is_port);
        assert_eq!(pair.origin, Coordinate::new(121.4737, 31.2304));
    }
}
