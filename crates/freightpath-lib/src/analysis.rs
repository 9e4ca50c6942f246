//! Heuristic classification of a place pair into a transport mode.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::geo::haversine_km;
use crate::heuristics::HeuristicTables;
use crate::model::Coordinate;
use crate::ports::PortRegistry;

/// Domestic trips shorter than this stay on land.
pub const DOMESTIC_LAND_MAX_KM: f64 = 1500.0;
/// Any trip shorter than this (without a water crossing) stays on land.
pub const SHORT_HAUL_MAX_KM: f64 = 800.0;
/// Port-to-port trips longer than this go by sea.
pub const PORT_TO_PORT_MIN_KM: f64 = 1000.0;
/// Upper bound of the medium-haul band.
pub const LONG_HAUL_MIN_KM: f64 = 2500.0;
/// Longitude separation treated as transoceanic.
pub const TRANSOCEANIC_LON_DELTA: f64 = 60.0;

/// Recommended way of carrying the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    LandOnly,
    SeaOnly,
    Multimodal,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            TransportMode::LandOnly => "land_only",
            TransportMode::SeaOnly => "sea_only",
            TransportMode::Multimodal => "multimodal",
        };
        f.write_str(value)
    }
}

/// Which step of the cascade produced the recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeRule {
    DomesticShortHaul,
    WaterCrossing,
    ShortHaul,
    PortToPortLongHaul,
    LongHaul,
    MediumHaul,
    Fallback,
}

/// Why a water crossing was (or was not) assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterCrossingReason {
    KnownCountryPair,
    Transoceanic,
    EnclosedSea,
}

/// Transient result of analysing one place pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteAnalysis {
    pub recommended_mode: TransportMode,
    pub rule: ModeRule,
    pub is_domestic: bool,
    pub direct_distance_km: f64,
    pub requires_water_crossing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_crossing_reason: Option<WaterCrossingReason>,
    pub origin_is_port: bool,
    pub destination_is_port: bool,
    pub origin_country: Option<String>,
    pub destination_country: Option<String>,
}

/// Classifies place pairs using the port registry and heuristic tables.
#[derive(Debug, Clone, Copy)]
pub struct RouteAnalyzer<'a> {
    registry: &'a PortRegistry,
    tables: &'a HeuristicTables,
}

impl<'a> RouteAnalyzer<'a> {
    pub fn new(registry: &'a PortRegistry, tables: &'a HeuristicTables) -> Self {
        Self { registry, tables }
    }

    /// Analyse a place pair. Never fails: unresolved countries only make the
    /// domestic and continent checks evaluate false.
    pub fn analyze(
        &self,
        origin_name: &str,
        destination_name: &str,
        origin: Coordinate,
        destination: Coordinate,
    ) -> RouteAnalysis {
        let origin_is_port = self.registry.is_port_city(origin_name);
        let destination_is_port = self.registry.is_port_city(destination_name);

        let direct_distance_km = haversine_km(origin, destination);

        let origin_country = self.tables.country_for(origin_name);
        let destination_country = self.tables.country_for(destination_name);

        let is_domestic = match (&origin_country, &destination_country) {
            (Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
            _ => false,
        };

        let water_crossing_reason = self.water_crossing(
            origin_country.as_deref(),
            destination_country.as_deref(),
            origin,
            destination,
        );
        let requires_water_crossing = water_crossing_reason.is_some();

        let (recommended_mode, rule) = self.recommend(
            is_domestic,
            requires_water_crossing,
            direct_distance_km,
            origin_is_port && destination_is_port,
            origin_country.as_deref(),
            destination_country.as_deref(),
        );

        debug!(
            origin = origin_name,
            destination = destination_name,
            distance_km = direct_distance_km,
            mode = %recommended_mode,
            ?rule,
            ?water_crossing_reason,
            "route analysed"
        );

        RouteAnalysis {
            recommended_mode,
            rule,
            is_domestic,
            direct_distance_km,
            requires_water_crossing,
            water_crossing_reason,
            origin_is_port,
            destination_is_port,
            origin_country,
            destination_country,
        }
    }

    fn water_crossing(
        &self,
        origin_country: Option<&str>,
        destination_country: Option<&str>,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Option<WaterCrossingReason> {
        if let (Some(a), Some(b)) = (origin_country, destination_country) {
            if self.tables.is_water_separated(a, b) {
                return Some(WaterCrossingReason::KnownCountryPair);
            }
        }
        if (origin.lon - destination.lon).abs() > TRANSOCEANIC_LON_DELTA {
            return Some(WaterCrossingReason::Transoceanic);
        }
        if self.tables.both_in_enclosed_sea(origin, destination) {
            return Some(WaterCrossingReason::EnclosedSea);
        }
        None
    }

    /// First matching rule wins; the order below is part of the contract.
    fn recommend(
        &self,
        is_domestic: bool,
        requires_water_crossing: bool,
        distance_km: f64,
        both_ports: bool,
        origin_country: Option<&str>,
        destination_country: Option<&str>,
    ) -> (TransportMode, ModeRule) {
        if is_domestic && distance_km < DOMESTIC_LAND_MAX_KM {
            return (TransportMode::LandOnly, ModeRule::DomesticShortHaul);
        }

        if requires_water_crossing {
            let mode = if both_ports {
                TransportMode::SeaOnly
            } else {
                TransportMode::Multimodal
            };
            return (mode, ModeRule::WaterCrossing);
        }

        if distance_km < SHORT_HAUL_MAX_KM {
            return (TransportMode::LandOnly, ModeRule::ShortHaul);
        }

        if both_ports && distance_km > PORT_TO_PORT_MIN_KM {
            return (TransportMode::SeaOnly, ModeRule::PortToPortLongHaul);
        }

        let overland = if self.tables.same_continent(origin_country, destination_country) {
            TransportMode::LandOnly
        } else {
            TransportMode::Multimodal
        };

        if distance_km > LONG_HAUL_MIN_KM {
            return (overland, ModeRule::LongHaul);
        }

        if (SHORT_HAUL_MAX_KM..=LONG_HAUL_MIN_KM).contains(&distance_km) {
            return (overland, ModeRule::MediumHaul);
        }

        (TransportMode::Multimodal, ModeRule::Fallback)
    }
}
