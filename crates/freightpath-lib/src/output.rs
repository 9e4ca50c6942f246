use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::analysis::RouteAnalysis;
use crate::model::{Coordinate, Route, Segment, SegmentKind};
use crate::ports::PortRecord;
use crate::routing::{AnalyzedPair, RouteRequest};

/// Presentation style for turning a summary into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// One segment as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentSummary {
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub waypoints: Vec<Coordinate>,
    pub description: String,
    pub distance_km: f64,
}

impl From<&Segment> for SegmentSummary {
    fn from(segment: &Segment) -> Self {
        Self {
            kind: segment.kind(),
            origin: segment.origin(),
            destination: segment.destination(),
            waypoints: segment.waypoints().to_vec(),
            description: segment.description().to_string(),
            distance_km: segment.distance_km(),
        }
    }
}

/// Structured representation of a route that consumers can serialise.
///
/// Field names form the `calculate_route` JSON contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteSummary {
    pub segments: Vec<SegmentSummary>,
    pub total_distance_km: f64,
    pub total_waypoints: usize,
    pub route_description: String,
}

impl From<&Route> for RouteSummary {
    fn from(route: &Route) -> Self {
        Self {
            segments: route.segments().iter().map(SegmentSummary::from).collect(),
            total_distance_km: route.total_distance_km(),
            total_waypoints: route.total_waypoints(),
            route_description: route.description().to_string(),
        }
    }
}

impl RouteSummary {
    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "{} ({:.1} km, {} waypoints)",
            self.route_description, self.total_distance_km, self.total_waypoints
        );
        for (index, segment) in self.segments.iter().enumerate() {
            let _ = writeln!(
                buffer,
                "{:>3}: [{}] {} ({:.1} km, {} waypoints)",
                index + 1,
                segment.kind,
                segment.description,
                segment.distance_km,
                segment.waypoints.len()
            );
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**{}** ({:.1} km, {} waypoints)",
            self.route_description, self.total_distance_km, self.total_waypoints
        );
        for segment in &self.segments {
            let _ = writeln!(
                buffer,
                "* `{}` {} -> {}: {} ({:.1} km)",
                segment.kind,
                segment.origin,
                segment.destination,
                segment.description,
                segment.distance_km
            );
        }
        buffer
    }
}

/// A named endpoint and where it geocoded to.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EndpointSummary {
    pub name: String,
    pub coordinate: Coordinate,
}

/// Output of the `analyze` command.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisSummary {
    pub origin: EndpointSummary,
    pub destination: EndpointSummary,
    #[serde(flatten)]
    pub analysis: RouteAnalysis,
}

impl AnalysisSummary {
    pub fn from_pair(request: &RouteRequest, pair: &AnalyzedPair) -> Self {
        Self {
            origin: EndpointSummary {
                name: request.origin.clone(),
                coordinate: pair.origin,
            },
            destination: EndpointSummary {
                name: request.destination.clone(),
                coordinate: pair.destination,
            },
            analysis: pair.analysis.clone(),
        }
    }

    pub fn render_plain(&self) -> String {
        let analysis = &self.analysis;
        let country = |value: &Option<String>| value.clone().unwrap_or_else(|| "?".to_string());
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "{} {} -> {} {}",
            self.origin.name, self.origin.coordinate, self.destination.name, self.destination.coordinate
        );
        let _ = writeln!(
            buffer,
            "mode: {} (rule: {:?})",
            analysis.recommended_mode, analysis.rule
        );
        let _ = writeln!(buffer, "direct distance: {:.1} km", analysis.direct_distance_km);
        let _ = writeln!(
            buffer,
            "countries: {} -> {} (domestic: {})",
            country(&analysis.origin_country),
            country(&analysis.destination_country),
            analysis.is_domestic
        );
        let _ = writeln!(
            buffer,
            "ports: origin {}, destination {}",
            analysis.origin_is_port, analysis.destination_is_port
        );
        match analysis.water_crossing_reason {
            Some(reason) => {
                let _ = writeln!(buffer, "water crossing: yes ({reason:?})");
            }
            None => {
                let _ = writeln!(buffer, "water crossing: no");
            }
        }
        buffer
    }
}

/// Render a port listing, one port per line.
pub fn render_ports<'a>(ports: impl IntoIterator<Item = &'a PortRecord>) -> String {
    let mut buffer = String::new();
    for port in ports {
        let _ = writeln!(
            buffer,
            "{:<14} {:<14} {:>8.2} {:>7.2}  {}",
            port.slug, port.name, port.lon, port.lat, port.country
        );
    }
    buffer
}

/// In-band failure payload: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorSummary {
    pub error: String,
}

impl ErrorSummary {
    pub fn new(error: impl ToString) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}
