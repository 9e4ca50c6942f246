//! Distance metrics.
//!
//! Mode selection uses the great-circle distance. Segment lengths use a flat
//! degrees-to-kilometres approximation summed over the waypoint path. The two
//! figures diverge and are not reconciled.

use serde::{Deserialize, Serialize};

use crate::model::Coordinate;

/// Mean Earth radius used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Flat conversion factor used by [`planar_path_km`].
pub const KM_PER_DEGREE: f64 = 111.0;

/// Great-circle distance between two points.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Sum of flat-approximated distances between consecutive waypoints.
///
/// Returns `0.0` for fewer than two points.
pub fn planar_path_km(waypoints: &[Coordinate]) -> f64 {
    waypoints
        .windows(2)
        .map(|pair| {
            let dx = (pair[1].lon - pair[0].lon) * KM_PER_DEGREE;
            let dy = (pair[1].lat - pair[0].lat) * KM_PER_DEGREE;
            (dx * dx + dy * dy).sqrt()
        })
        .sum()
}

/// Axis-aligned lon/lat rectangle (inclusive bounds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub name: String,
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.min_lon..=self.max_lon).contains(&point.lon)
            && (self.min_lat..=self.max_lat).contains(&point.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_zero_for_identical_points() {
        let p = Coordinate::new(4.5, 51.9);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn haversine_one_degree_of_longitude_on_equator() {
        let d = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert!((d - 111.19).abs() < 0.01, "got {d}");
    }

    #[test]
    fn planar_path_sums_legs() {
        let path = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(3.0, 4.0),
            Coordinate::new(3.0, 5.0),
        ];
        assert!((planar_path_km(&path) - 6.0 * KM_PER_DEGREE).abs() < 1e-9);
    }

    #[test]
    fn planar_path_of_single_point_is_zero() {
        assert_eq!(planar_path_km(&[Coordinate::new(1.0, 1.0)]), 0.0);
        assert_eq!(planar_path_km(&[]), 0.0);
    }

    #[test]
    fn bounding_box_is_inclusive() {
        let bbox = BoundingBox {
            name: "unit".into(),
            min_lon: 0.0,
            max_lon: 1.0,
            min_lat: 0.0,
            max_lat: 1.0,
        };
        assert!(bbox.contains(Coordinate::new(1.0, 0.0)));
        assert!(!bbox.contains(Coordinate::new(1.01, 0.5)));
    }
}
