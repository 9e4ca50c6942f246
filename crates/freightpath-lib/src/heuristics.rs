//! Lookup tables backing the route analyzer.
//!
//! Country, water-crossing, continent and enclosed-sea data live here rather
//! than in the analyzer so they can be extended (or replaced from a JSON
//! file) without touching the mode-selection cascade. Everything is
//! approximate; a miss simply makes the corresponding check evaluate false.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::BoundingBox;
use crate::model::Coordinate;

/// Name fragments that identify a country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryPattern {
    pub country: String,
    pub fragments: Vec<String>,
}

/// Countries considered reachable from one another overland.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinentGroup {
    pub name: String,
    pub countries: Vec<String>,
}

/// Tables consulted by [`crate::RouteAnalyzer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicTables {
    pub country_patterns: Vec<CountryPattern>,
    pub water_crossings: Vec<(String, String)>,
    pub continents: Vec<ContinentGroup>,
    pub enclosed_seas: Vec<BoundingBox>,
}

const COUNTRY_PATTERNS: &[(&str, &[&str])] = &[
    (
        "Colombia",
        &[
            "colombia", "bogota", "bogotá", "medellin", "medellín", "cali", "barranquilla",
            "cartagena", "bucaramanga", "buenaventura", "santa marta",
        ],
    ),
    (
        "USA",
        &[
            "usa", "u.s.a.", "united states", "miami", "new york", "los angeles", "houston",
            "denver", "chicago", "salt lake city", "seattle", "san francisco", "boston",
            "atlanta", "dallas", "phoenix", "new orleans", "new mexico",
        ],
    ),
    ("Cuba", &["cuba", "havana", "la habana"]),
    (
        "Mexico",
        &["mexico", "méxico", "guadalajara", "monterrey", "veracruz", "cancun", "tijuana"],
    ),
    ("Canada", &["canada", "toronto", "vancouver", "montreal", "calgary", "ottawa"]),
    ("Panama", &["panama", "panamá", "colon"]),
    ("Jamaica", &["jamaica", "kingston"]),
    ("Dominican Republic", &["dominican republic", "santo domingo"]),
    ("Venezuela", &["venezuela", "caracas", "maracaibo"]),
    ("Ecuador", &["ecuador", "quito", "guayaquil"]),
    ("Peru", &["peru", "perú", "lima", "callao"]),
    ("Brazil", &["brazil", "brasil", "sao paulo", "são paulo", "rio de janeiro", "santos"]),
    ("Argentina", &["argentina", "buenos aires", "cordoba", "rosario"]),
    ("Chile", &["chile", "santiago", "valparaiso"]),
    (
        "UK",
        &[
            "uk", "united kingdom", "england", "scotland", "wales", "london", "manchester",
            "liverpool", "glasgow", "southampton", "felixstowe",
        ],
    ),
    ("Ireland", &["ireland", "dublin", "cork"]),
    ("France", &["france", "paris", "marseille", "lyon", "le havre", "bordeaux"]),
    ("Netherlands", &["netherlands", "holland", "rotterdam", "amsterdam"]),
    ("Belgium", &["belgium", "antwerp", "brussels"]),
    ("Germany", &["germany", "hamburg", "berlin", "munich", "frankfurt", "bremen"]),
    ("Spain", &["spain", "españa", "madrid", "barcelona", "bilbao", "algeciras"]),
    ("Portugal", &["portugal", "lisbon", "porto"]),
    ("Italy", &["italy", "rome", "milan", "genoa", "naples"]),
    ("Morocco", &["morocco", "casablanca", "rabat", "tangier"]),
    ("Egypt", &["egypt", "cairo", "alexandria", "port said"]),
    ("Nigeria", &["nigeria", "lagos", "abuja"]),
    ("Senegal", &["senegal", "dakar"]),
    ("South Africa", &["south africa", "cape town", "durban", "johannesburg"]),
    ("Kenya", &["kenya", "nairobi", "mombasa"]),
    ("China", &["china", "shanghai", "beijing", "shenzhen", "guangzhou", "ningbo"]),
    ("Hong Kong", &["hong kong"]),
    ("Taiwan", &["taiwan", "taipei", "kaohsiung"]),
    ("Japan", &["japan", "tokyo", "yokohama", "osaka", "kobe"]),
    ("South Korea", &["south korea", "korea", "seoul", "busan"]),
    ("Singapore", &["singapore"]),
    ("India", &["india", "mumbai", "chennai", "delhi", "kolkata"]),
    ("UAE", &["uae", "united arab emirates", "dubai", "abu dhabi"]),
    ("Indonesia", &["indonesia", "jakarta", "surabaya"]),
    ("Philippines", &["philippines", "manila"]),
    ("Australia", &["australia", "sydney", "melbourne", "brisbane", "perth"]),
    ("New Zealand", &["new zealand", "auckland", "wellington"]),
];

const WATER_CROSSINGS: &[(&str, &str)] = &[
    ("USA", "Cuba"),
    ("USA", "Jamaica"),
    ("USA", "Dominican Republic"),
    ("Mexico", "Cuba"),
    ("Cuba", "Jamaica"),
    ("Cuba", "Dominican Republic"),
    ("Colombia", "Panama"),
    ("UK", "France"),
    ("UK", "Netherlands"),
    ("UK", "Belgium"),
    ("UK", "Germany"),
    ("UK", "Ireland"),
    ("France", "Ireland"),
    ("Spain", "Morocco"),
    ("Japan", "China"),
    ("Japan", "South Korea"),
    ("China", "Taiwan"),
    ("Philippines", "China"),
    ("Singapore", "Indonesia"),
    ("Australia", "Indonesia"),
    ("Australia", "New Zealand"),
];

const CONTINENTS: &[(&str, &[&str])] = &[
    ("North America", &["USA", "Canada", "Mexico"]),
    (
        "Central America and Caribbean",
        &["Panama", "Cuba", "Jamaica", "Dominican Republic", "Guatemala", "Costa Rica"],
    ),
    (
        "South America",
        &[
            "Colombia", "Venezuela", "Ecuador", "Peru", "Brazil", "Argentina", "Chile",
            "Bolivia", "Paraguay", "Uruguay",
        ],
    ),
    (
        "Europe",
        &[
            "UK", "Ireland", "France", "Netherlands", "Belgium", "Germany", "Spain", "Portugal",
            "Italy", "Poland", "Austria", "Switzerland",
        ],
    ),
    (
        "Africa",
        &["Morocco", "Egypt", "Nigeria", "Senegal", "South Africa", "Kenya", "Ghana"],
    ),
    (
        "Asia",
        &[
            "China", "Hong Kong", "Taiwan", "Japan", "South Korea", "Singapore", "India", "UAE",
            "Indonesia", "Philippines", "Vietnam", "Thailand", "Malaysia",
        ],
    ),
    ("Oceania", &["Australia", "New Zealand"]),
];

/// (name, min_lon, max_lon, min_lat, max_lat)
const ENCLOSED_SEAS: &[(&str, f64, f64, f64, f64)] = &[
    ("Caribbean Sea", -90.0, -59.0, 8.0, 24.0),
    ("Gulf of Mexico", -98.0, -80.0, 18.0, 31.0),
];

impl Default for HeuristicTables {
    fn default() -> Self {
        Self {
            country_patterns: COUNTRY_PATTERNS
                .iter()
                .map(|(country, fragments)| CountryPattern {
                    country: country.to_string(),
                    fragments: fragments.iter().map(|f| f.to_string()).collect(),
                })
                .collect(),
            water_crossings: WATER_CROSSINGS
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
            continents: CONTINENTS
                .iter()
                .map(|(name, countries)| ContinentGroup {
                    name: name.to_string(),
                    countries: countries.iter().map(|c| c.to_string()).collect(),
                })
                .collect(),
            enclosed_seas: ENCLOSED_SEAS
                .iter()
                .map(|&(name, min_lon, max_lon, min_lat, max_lat)| BoundingBox {
                    name: name.to_string(),
                    min_lon,
                    max_lon,
                    min_lat,
                    max_lat,
                })
                .collect(),
        }
    }
}

impl HeuristicTables {
    /// Load tables from a JSON document shaped like the serialised defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| Error::DataFileLoad {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Country for a place name.
    ///
    /// Table fragments are tried first (whole-word, case-insensitive, table
    /// order). Failing that, the trailing comma-separated token is taken
    /// verbatim. Otherwise `None`.
    pub fn country_for(&self, place: &str) -> Option<String> {
        let lower = place.to_lowercase();
        let matched = self.country_patterns.iter().find(|pattern| {
            pattern
                .fragments
                .iter()
                .any(|fragment| contains_word(&lower, &fragment.to_lowercase()))
        });
        if let Some(pattern) = matched {
            return Some(pattern.country.clone());
        }

        if place.contains(',') {
            let trailing = place.rsplit(',').next().unwrap_or_default().trim();
            if !trailing.is_empty() {
                return Some(trailing.to_string());
            }
        }
        None
    }

    /// Whether the two countries are listed as water-separated (either order).
    pub fn is_water_separated(&self, a: &str, b: &str) -> bool {
        self.water_crossings.iter().any(|(x, y)| {
            (x.eq_ignore_ascii_case(a) && y.eq_ignore_ascii_case(b))
                || (x.eq_ignore_ascii_case(b) && y.eq_ignore_ascii_case(a))
        })
    }

    /// Continental group a country belongs to.
    pub fn continent_of(&self, country: &str) -> Option<&str> {
        self.continents
            .iter()
            .find(|group| group.countries.iter().any(|c| c.eq_ignore_ascii_case(country)))
            .map(|group| group.name.as_str())
    }

    /// Whether both countries are known and share a continental group.
    pub fn same_continent(&self, a: Option<&str>, b: Option<&str>) -> bool {
        match (a.and_then(|a| self.continent_of(a)), b.and_then(|b| self.continent_of(b))) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Whether both points lie inside the enclosed-sea boxes (each point in
    /// any one of them).
    pub fn both_in_enclosed_sea(&self, a: Coordinate, b: Coordinate) -> bool {
        let inside = |p: Coordinate| self.enclosed_seas.iter().any(|bbox| bbox.contains(p));
        inside(a) && inside(b)
    }
}

/// Substring match that only accepts hits bounded by non-alphanumerics.
fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
