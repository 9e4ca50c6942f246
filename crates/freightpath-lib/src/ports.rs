//! Port registry and port-related place heuristics.
//!
//! The registry is an ordered, immutable table. Iteration order matters:
//! nearest-port ties resolve to the first port in the table.

use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use csv::{ReaderBuilder, Trim};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Coordinate;

/// A single port anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortRecord {
    pub slug: String,
    pub name: String,
    pub lon: f64,
    pub lat: f64,
    pub country: String,
}

impl PortRecord {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lon, self.lat)
    }
}

/// (slug, name, lon, lat, country)
const BUILTIN_PORTS: &[(&str, &str, f64, f64, &str)] = &[
    ("shanghai", "Shanghai", 121.8, 31.2, "China"),
    ("rotterdam", "Rotterdam", 4.5, 51.9, "Netherlands"),
    ("singapore", "Singapore", 103.8, 1.3, "Singapore"),
    ("los_angeles", "Los Angeles", -118.2, 34.1, "USA"),
    ("hamburg", "Hamburg", 10.0, 53.6, "Germany"),
    ("buenaventura", "Buenaventura", -77.0, 3.9, "Colombia"),
    ("callao", "Callao", -77.1, -12.1, "Peru"),
    ("antwerp", "Antwerp", 4.4, 51.2, "Belgium"),
    ("hong_kong", "Hong Kong", 114.2, 22.3, "Hong Kong"),
    ("dubai", "Dubai", 55.3, 25.3, "UAE"),
    ("new_york", "New York", -74.0, 40.7, "USA"),
    ("yokohama", "Yokohama", 139.6, 35.4, "Japan"),
    ("cape_town", "Cape Town", 18.4, -33.9, "South Africa"),
    ("durban", "Durban", 31.0, -29.9, "South Africa"),
    ("lagos", "Lagos", 3.4, 6.5, "Nigeria"),
    ("alexandria", "Alexandria", 29.9, 31.2, "Egypt"),
    ("casablanca", "Casablanca", -7.6, 33.6, "Morocco"),
    ("dakar", "Dakar", -17.4, 14.7, "Senegal"),
    ("mumbai", "Mumbai", 72.8, 19.1, "India"),
    ("chennai", "Chennai", 80.3, 13.1, "India"),
    ("sydney", "Sydney", 151.2, -33.9, "Australia"),
    ("vancouver", "Vancouver", -123.1, 49.3, "Canada"),
    ("santos", "Santos", -46.3, -23.9, "Brazil"),
];

const COASTAL_KEYWORDS: &[&str] = &[
    "port", "harbor", "harbour", "bay", "beach", "coast", "marine", "naval", "marina", "wharf",
    "dock", "pier", "cape", "inlet",
];

const KNOWN_COASTAL_CITIES: &[&str] = &[
    "cape town", "lagos", "alexandria", "casablanca", "dakar", "mombasa", "freetown", "accra",
    "cotonou", "libreville", "douala", "luanda", "maputo", "dar es salaam", "djibouti",
    "port said", "suez", "tunis", "algiers", "rabat", "nouakchott", "conakry", "bissau",
    "banjul", "praia", "sao tome", "malabo", "porto novo", "lome", "abidjan", "yamoussoukro",
    "monrovia", "boston", "miami", "seattle", "san francisco", "san diego", "portland",
    "charleston", "savannah", "jacksonville", "tampa", "mobile", "new orleans", "galveston",
    "corpus christi", "brownsville", "baltimore", "philadelphia", "norfolk", "wilmington",
    "barcelona", "valencia", "bilbao", "vigo", "cadiz", "malaga", "almeria", "cartagena",
    "palma", "las palmas", "santa cruz", "marseille", "nice", "toulon", "brest", "le havre",
    "calais", "dunkirk", "bordeaux", "nantes", "saint nazaire", "genoa", "naples", "palermo",
    "venice", "trieste", "livorno", "bari", "brindisi", "taranto", "catania", "messina",
    "cagliari", "olbia", "porto torres", "piraeus", "thessaloniki", "patras", "volos", "kavala",
    "istanbul", "izmir", "mersin", "antalya", "trabzon", "samsun", "sinop", "zonguldak",
];

static BUILTIN_REGISTRY: Lazy<Arc<PortRegistry>> = Lazy::new(|| {
    let ports = BUILTIN_PORTS
        .iter()
        .map(|&(slug, name, lon, lat, country)| PortRecord {
            slug: slug.to_string(),
            name: name.to_string(),
            lon,
            lat,
            country: country.to_string(),
        })
        .collect();
    Arc::new(PortRegistry { ports })
});

/// Normalise a place name the way port slugs are written: lowercase, spaces
/// to underscores. Surrounding whitespace is not trimmed.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Ordered, read-only set of ports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortRegistry {
    ports: Vec<PortRecord>,
}

#[derive(Debug, Deserialize)]
struct PortRow {
    slug: String,
    name: String,
    lon: f64,
    lat: f64,
    country: String,
}

impl PortRegistry {
    /// Shared handle to the compiled-in registry.
    pub fn builtin() -> Arc<PortRegistry> {
        Arc::clone(&BUILTIN_REGISTRY)
    }

    /// Build a registry from records, validating each one.
    pub fn from_records(records: Vec<PortRecord>) -> Result<Self> {
        let mut seen = HashSet::new();
        for record in &records {
            validate_record(record)?;
            if !seen.insert(record.slug.clone()) {
                return Err(Error::DuplicatePortSlug {
                    slug: record.slug.clone(),
                });
            }
        }
        Ok(Self { ports: records })
    }

    /// Load a registry from a CSV file with a `slug,name,lon,lat,country` header.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path).map_err(|err| Error::DataFileLoad {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Self::from_reader(file)
    }

    /// Load a registry from any CSV reader. Row order becomes registry order.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);
        let mut records = Vec::new();
        for row in csv_reader.deserialize::<PortRow>() {
            let row = row?;
            records.push(PortRecord {
                slug: slugify(&row.slug),
                name: row.name,
                lon: row.lon,
                lat: row.lat,
                country: row.country,
            });
        }
        if records.is_empty() {
            return Err(Error::PortDataValidation {
                message: "port file contained no ports".to_string(),
            });
        }
        Self::from_records(records)
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PortRecord> {
        self.ports.iter()
    }

    pub fn get(&self, slug: &str) -> Option<&PortRecord> {
        self.ports.iter().find(|port| port.slug == slug)
    }

    /// Nearest port by planar squared degree distance.
    ///
    /// Ports whose country equals `exclude_country` are skipped. Ties keep the
    /// earliest port in registry order. Returns `None` only when every port was
    /// excluded (or the registry is empty).
    pub fn find_nearest_port(
        &self,
        coord: Coordinate,
        exclude_country: Option<&str>,
    ) -> Option<&PortRecord> {
        let mut best: Option<(&PortRecord, f64)> = None;
        for port in &self.ports {
            if exclude_country.is_some_and(|excluded| port.country == excluded) {
                continue;
            }
            let dlon = coord.lon - port.lon;
            let dlat = coord.lat - port.lat;
            let distance = dlon * dlon + dlat * dlat;
            match best {
                Some((_, current)) if distance >= current => {}
                _ => best = Some((port, distance)),
            }
        }
        best.map(|(port, _)| port)
    }

    /// Whether `name` looks like one of the registered ports.
    ///
    /// Matches when the slugified name contains a port slug or is contained in
    /// one. Loose on purpose: "Port of Shanghai" matches, and so does any name
    /// that happens to contain a slug. An empty name is contained in every slug
    /// and therefore matches; whitespace is kept (" " becomes "_").
    pub fn is_port_city(&self, name: &str) -> bool {
        let normalized = slugify(name);
        self.ports
            .iter()
            .any(|port| normalized.contains(&port.slug) || port.slug.contains(&normalized))
    }

    /// Whether `name` is a registered port, carries a coastal keyword, or is a
    /// known coastal city.
    pub fn is_likely_coastal_city(&self, name: &str) -> bool {
        if self.is_port_city(name) {
            return true;
        }
        let lower = name.trim().to_lowercase();
        if COASTAL_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
            return true;
        }
        KNOWN_COASTAL_CITIES.contains(&lower.as_str())
    }
}

fn validate_record(record: &PortRecord) -> Result<()> {
    if record.slug.is_empty() {
        return Err(Error::PortDataValidation {
            message: format!("port '{}' has an empty slug", record.name),
        });
    }
    if !Coordinate::new(record.lon, record.lat).is_in_range() {
        return Err(Error::PortDataValidation {
            message: format!(
                "port '{}' has out-of-range coordinates ({}, {})",
                record.slug, record.lon, record.lat
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_is_shared() {
        let a = PortRegistry::builtin();
        let b = PortRegistry::builtin();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.len(), 23);
        assert_eq!(a.iter().next().map(|p| p.slug.as_str()), Some("shanghai"));
    }

    #[test]
    fn nearest_port_to_bogota_is_buenaventura() {
        let registry = PortRegistry::builtin();
        let port = registry
            .find_nearest_port(Coordinate::new(-74.07, 4.71), None)
            .unwrap();
        assert_eq!(port.slug, "buenaventura");
    }

    #[test]
    fn nearest_port_respects_country_exclusion() {
        let registry = PortRegistry::builtin();
        let port = registry
            .find_nearest_port(Coordinate::new(-74.07, 4.71), Some("Colombia"))
            .unwrap();
        assert_ne!(port.country, "Colombia");
    }

    #[test]
    fn nearest_port_tie_keeps_first_registered() {
        let registry = PortRegistry::from_records(vec![
            PortRecord {
                slug: "west".into(),
                name: "West".into(),
                lon: -1.0,
                lat: 0.0,
                country: "A".into(),
            },
            PortRecord {
                slug: "east".into(),
                name: "East".into(),
                lon: 1.0,
                lat: 0.0,
                country: "B".into(),
            },
        ])
        .unwrap();

        let port = registry
            .find_nearest_port(Coordinate::new(0.0, 0.0), None)
            .unwrap();
        assert_eq!(port.slug, "west");
    }

    #[test]
    fn nearest_port_none_when_all_excluded() {
        let registry = PortRegistry::from_records(vec![PortRecord {
            slug: "only".into(),
            name: "Only".into(),
            lon: 0.0,
            lat: 0.0,
            country: "A".into(),
        }])
        .unwrap();
        assert!(registry
            .find_nearest_port(Coordinate::new(5.0, 5.0), Some("A"))
            .is_none());
    }

    #[test]
    fn port_city_matching_is_substring_both_ways() {
        let registry = PortRegistry::builtin();
        assert!(registry.is_port_city("Shanghai"));
        assert!(registry.is_port_city("Port of Los Angeles"));
        assert!(registry.is_port_city("hong kong"));
        assert!(registry.is_port_city("York"));
        assert!(!registry.is_port_city("Bogota"));
        assert!(!registry.is_port_city("Miami, USA"));
        assert!(!registry.is_port_city("Havana, Cuba"));
    }

    #[test]
    fn port_city_normalisation_keeps_whitespace() {
        let registry = PortRegistry::builtin();
        assert_eq!(slugify(" Los Angeles "), "_los_angeles_");
        assert!(registry.is_port_city(" Los Angeles "));
        assert!(registry.is_port_city(""));
        assert!(!registry.is_port_city("   "));
    }

    #[test]
    fn coastal_city_heuristics() {
        let registry = PortRegistry::builtin();
        assert!(registry.is_likely_coastal_city("Rotterdam"));
        assert!(registry.is_likely_coastal_city("Miami"));
        assert!(registry.is_likely_coastal_city("Green Bay"));
        assert!(!registry.is_likely_coastal_city("Denver"));
        assert!(!registry.is_likely_coastal_city("Miami, USA"));
    }

    #[test]
    fn csv_registry_loads_in_row_order() {
        let data = "slug,name,lon,lat,country\nPort A,Port A,1.0,2.0,X\nb,B,3.0,4.0,Y\n";
        let registry = PortRegistry::from_reader(data.as_bytes()).unwrap();
        let slugs: Vec<_> = registry.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["port_a", "b"]);
    }

    #[test]
    fn csv_registry_rejects_duplicates_and_bad_coordinates() {
        let dup = "slug,name,lon,lat,country\na,A,1,2,X\na,A2,3,4,Y\n";
        assert!(matches!(
            PortRegistry::from_reader(dup.as_bytes()),
            Err(Error::DuplicatePortSlug { .. })
        ));

        let bad = "slug,name,lon,lat,country\na,A,1,95,X\n";
        assert!(matches!(
            PortRegistry::from_reader(bad.as_bytes()),
            Err(Error::PortDataValidation { .. })
        ));
    }
}
