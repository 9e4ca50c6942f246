//! Longitude normalisation for paths that may cross the antimeridian.
//!
//! Two behaviours are supported:
//!
//! - [`DatelineMode::Wrap`] wraps every longitude into `[-180, 180]` and
//!   leaves path splitting to whatever renders the result.
//! - [`DatelineMode::Continuous`] wraps first, then walks the path and shifts
//!   any point that would jump more than 180° from its predecessor by ∓360°.
//!   Shifted longitudes may leave `[-180, 180]`; that keeps the rendered path
//!   continuous across the map edge.
//!
//! `Continuous` is the default because the maritime router's output is
//! consumed by map renderers that draw straight polylines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::Coordinate;

/// Antimeridian handling applied to sea-leg waypoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatelineMode {
    /// Per-point wrap followed by continuity enforcement.
    #[default]
    Continuous,
    /// Per-point wrap only.
    Wrap,
}

impl fmt::Display for DatelineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            DatelineMode::Continuous => "continuous",
            DatelineMode::Wrap => "wrap",
        };
        f.write_str(value)
    }
}

impl FromStr for DatelineMode {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "continuous" => Ok(DatelineMode::Continuous),
            "wrap" => Ok(DatelineMode::Wrap),
            other => Err(Error::UnsupportedOption {
                option: "dateline".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Wrap a single longitude into `[-180, 180]` by repeated ±360 steps.
///
/// Boundary values are kept as-is: `180.0` stays `180.0` and `-180.0` stays
/// `-180.0`. Non-finite input is returned untouched.
pub fn wrap_longitude(lon: f64) -> f64 {
    if !lon.is_finite() {
        return lon;
    }
    let mut lon = lon;
    while lon > 180.0 {
        lon -= 360.0;
    }
    while lon < -180.0 {
        lon += 360.0;
    }
    lon
}

/// Normalise a path according to `mode`.
///
/// Output has the same length as the input and latitudes are never touched.
/// Empty and single-point paths are returned unchanged.
pub fn normalize_longitudes(points: &[Coordinate], mode: DatelineMode) -> Vec<Coordinate> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let wrapped: Vec<Coordinate> = points
        .iter()
        .map(|p| Coordinate::new(wrap_longitude(p.lon), p.lat))
        .collect();

    match mode {
        DatelineMode::Wrap => wrapped,
        DatelineMode::Continuous => enforce_continuity(wrapped),
    }
}

fn enforce_continuity(wrapped: Vec<Coordinate>) -> Vec<Coordinate> {
    let mut continuous: Vec<Coordinate> = Vec::with_capacity(wrapped.len());
    for point in wrapped {
        let lon = match continuous.last() {
            Some(prev) if point.lon - prev.lon > 180.0 => point.lon - 360.0,
            Some(prev) if point.lon - prev.lon < -180.0 => point.lon + 360.0,
            _ => point.lon,
        };
        continuous.push(Coordinate::new(lon, point.lat));
    }
    continuous
}
