//! Place-name geocoding.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::Coordinate;

/// Environment variable pointing at an offline gazetteer JSON file.
pub const GAZETTEER_ENV: &str = "FREIGHTPATH_GAZETTEER";
/// Environment variable overriding the Nominatim search endpoint.
pub const GEOCODER_URL_ENV: &str = "FREIGHTPATH_GEOCODER_URL";

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
const GEOCODER_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves place names to coordinates.
pub trait Geocoder: Send + Sync {
    /// Coordinate of `place`, or [`Error::UnknownPlace`] when it cannot be resolved.
    fn resolve(&self, place: &str) -> Result<Coordinate>;
}

/// Geocoder backed by a Nominatim-compatible HTTP search endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lon: String,
    lat: String,
}

impl NominatimGeocoder {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(DEFAULT_NOMINATIM_URL)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(GEOCODER_TIMEOUT)
            .user_agent(user_agent())
            .build()
            .map_err(Error::Http)?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl Geocoder for NominatimGeocoder {
    fn resolve(&self, place: &str) -> Result<Coordinate> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", place),
                ("format", "json"),
                ("limit", "1"),
                ("addressdetails", "1"),
            ])
            .send()?
            .error_for_status()?;

        let places = response.json::<Vec<NominatimPlace>>()?;
        let first = places.into_iter().next().ok_or_else(|| Error::UnknownPlace {
            name: place.to_string(),
        })?;

        let parse = |value: &str| {
            value
                .parse::<f64>()
                .map_err(|err| Error::InvalidGeocoderResponse {
                    name: place.to_string(),
                    message: format!("'{value}': {err}"),
                })
        };
        let coordinate = checked(place, Coordinate::new(parse(&first.lon)?, parse(&first.lat)?))?;
        debug!(place, %coordinate, "geocoded via nominatim");
        Ok(coordinate)
    }
}

fn user_agent() -> String {
    format!("freightpath/{version}", version = env!("CARGO_PKG_VERSION"))
}

/// In-memory place table, keyed case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    places: HashMap<String, Coordinate>,
}

impl Gazetteer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a place.
    pub fn with_place(mut self, name: &str, coordinate: Coordinate) -> Self {
        self.places.insert(gazetteer_key(name), coordinate);
        self
    }

    /// Load a JSON object of `{"name": {"lon": .., "lat": ..}}` entries.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| Error::DataFileLoad {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let entries: HashMap<String, Coordinate> = serde_json::from_str(raw)?;
        let places = entries
            .into_iter()
            .map(|(name, coordinate)| -> Result<(String, Coordinate)> {
                Ok((gazetteer_key(&name), checked(&name, coordinate)?))
            })
            .collect::<Result<HashMap<_, _>>>()?;
        Ok(Self { places })
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl Geocoder for Gazetteer {
    fn resolve(&self, place: &str) -> Result<Coordinate> {
        let coordinate = self
            .places
            .get(&gazetteer_key(place))
            .copied()
            .ok_or_else(|| Error::UnknownPlace {
                name: place.to_string(),
            })?;
        checked(place, coordinate)
    }
}

fn gazetteer_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Reject coordinates outside [-180, 180] x [-90, 90] before they reach routing.
fn checked(place: &str, coordinate: Coordinate) -> Result<Coordinate> {
    if coordinate.is_in_range() {
        Ok(coordinate)
    } else {
        Err(Error::InvalidGeocoderResponse {
            name: place.to_string(),
            message: format!("coordinate {coordinate} is out of range"),
        })
    }
}
