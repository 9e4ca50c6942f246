//! Shared value types: coordinates, segments and assembled routes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::planar_path_km;

/// Geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Whether `lon` lies in [-180, 180] and `lat` in [-90, 90].
    pub fn is_in_range(&self) -> bool {
        (-180.0..=180.0).contains(&self.lon) && (-90.0..=90.0).contains(&self.lat)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lon, self.lat)
    }
}

/// Transport medium of a single segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Sea,
    Land,
}

impl SegmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SegmentKind::Sea => "sea",
            SegmentKind::Land => "land",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One contiguous leg of a route, entirely by land or entirely by sea.
///
/// The distance is derived from the waypoint list when the segment is
/// constructed and never changes afterwards.
///
/// `origin` and `destination` are the coordinates the leg was requested
/// between. Sea waypoints are longitude-normalised, so with
/// [`DatelineMode::Continuous`](crate::longitude::DatelineMode::Continuous)
/// a path across the date line can end on the destination longitude ±360
/// (Vancouver's -123.12 arrives as 236.88).
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    kind: SegmentKind,
    origin: Coordinate,
    destination: Coordinate,
    waypoints: Vec<Coordinate>,
    description: String,
    distance_km: f64,
}

impl Segment {
    pub fn new(
        kind: SegmentKind,
        origin: Coordinate,
        destination: Coordinate,
        waypoints: Vec<Coordinate>,
        description: impl Into<String>,
    ) -> Self {
        let distance_km = planar_path_km(&waypoints);
        Self {
            kind,
            origin,
            destination,
            waypoints,
            description: description.into(),
            distance_km,
        }
    }

    /// Straight two-point land leg.
    pub fn land(origin: Coordinate, destination: Coordinate, description: impl Into<String>) -> Self {
        Self::new(
            SegmentKind::Land,
            origin,
            destination,
            vec![origin, destination],
            description,
        )
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn destination(&self) -> Coordinate {
        self.destination
    }

    pub fn waypoints(&self) -> &[Coordinate] {
        &self.waypoints
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }
}

/// Ordered collection of segments with aggregate totals.
///
/// Only [`crate::assemble_route`] constructs routes, so the totals always
/// equal the sums over the contained segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    segments: Vec<Segment>,
    total_distance_km: f64,
    total_waypoints: usize,
    description: String,
}

impl Route {
    pub(crate) fn from_segments(segments: Vec<Segment>, description: String) -> Self {
        let total_distance_km = segments.iter().map(Segment::distance_km).sum();
        let total_waypoints = segments.iter().map(|s| s.waypoints().len()).sum();
        Self {
            segments,
            total_distance_km,
            total_waypoints,
            description,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    pub fn total_waypoints(&self) -> usize {
        self.total_waypoints
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Segment kinds in travel order.
    pub fn kinds(&self) -> Vec<SegmentKind> {
        self.segments.iter().map(Segment::kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn land_segment_has_exact_endpoints() {
        let a = Coordinate::new(-74.07, 4.71);
        let b = Coordinate::new(-75.56, 6.25);
        let segment = Segment::land(a, b, "Direct land route: A -> B");

        assert_eq!(segment.kind(), SegmentKind::Land);
        assert_eq!(segment.waypoints(), &[a, b]);
        assert!(segment.distance_km() > 0.0);
    }

    #[test]
    fn route_totals_follow_segments() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 0.0);
        let c = Coordinate::new(1.0, 1.0);
        let route = Route::from_segments(
            vec![Segment::land(a, b, "ab"), Segment::land(b, c, "bc")],
            "test".to_string(),
        );

        assert_eq!(route.total_waypoints(), 4);
        assert!((route.total_distance_km() - 222.0).abs() < 1e-9);
        assert_eq!(route.kinds(), vec![SegmentKind::Land, SegmentKind::Land]);
    }

    #[test]
    fn segment_kind_serializes_lowercase() {
        let json = serde_json::to_string(&SegmentKind::Sea).unwrap();
        assert_eq!(json, "\"sea\"");
    }
}
