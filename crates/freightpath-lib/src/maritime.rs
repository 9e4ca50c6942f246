//! Maritime path providers.
//!
//! A provider turns two coordinates into an ordered list of points along a
//! navigable sea path. Providers never fail: when the underlying tool is
//! missing, errors out, or times out, they hand back the two-point straight
//! line instead, so callers have no "provider unavailable" branch.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use serde_json::Value;
use tracing::{debug, info, warn};
use wait_timeout::ChildExt;

use crate::error::{Error, Result};
use crate::model::Coordinate;

/// Environment variable pointing at the directory that holds `searoute.jar`.
pub const SEAROUTE_DIR_ENV: &str = "FREIGHTPATH_SEAROUTE_DIR";

const SEAROUTE_JAR: &str = "searoute.jar";
const SEAROUTE_TIMEOUT: Duration = Duration::from_secs(30);

/// Sea network resolution accepted by the SeaRoute tool, in kilometres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeaResolution {
    Km5,
    Km10,
    #[default]
    Km20,
    Km50,
    Km100,
}

impl SeaResolution {
    pub fn km(self) -> u32 {
        match self {
            SeaResolution::Km5 => 5,
            SeaResolution::Km10 => 10,
            SeaResolution::Km20 => 20,
            SeaResolution::Km50 => 50,
            SeaResolution::Km100 => 100,
        }
    }

    pub fn from_km(km: u32) -> Result<Self> {
        match km {
            5 => Ok(SeaResolution::Km5),
            10 => Ok(SeaResolution::Km10),
            20 => Ok(SeaResolution::Km20),
            50 => Ok(SeaResolution::Km50),
            100 => Ok(SeaResolution::Km100),
            other => Err(Error::UnsupportedOption {
                option: "resolution".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SeaResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}km", self.km())
    }
}

impl FromStr for SeaResolution {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let trimmed = value.trim().trim_end_matches("km");
        let km = trimmed.parse::<u32>().map_err(|_| Error::UnsupportedOption {
            option: "resolution".to_string(),
            value: value.to_string(),
        })?;
        Self::from_km(km)
    }
}

/// Source of sea-leg geometry.
pub trait MaritimePathProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Ordered path from `origin` to `destination`. Never fails; the
    /// straight line `[origin, destination]` is the universal fallback.
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        resolution: SeaResolution,
    ) -> Vec<Coordinate>;
}

/// Provider that always returns the straight line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLineProvider;

impl MaritimePathProvider for StraightLineProvider {
    fn name(&self) -> &'static str {
        "straight-line"
    }

    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        _resolution: SeaResolution,
    ) -> Vec<Coordinate> {
        vec![origin, destination]
    }
}

/// Provider backed by the SeaRoute Java tool.
///
/// Each call writes a one-row CSV into a temporary directory, runs
/// `java -jar searoute.jar` against it and reads the GeoJSON it produces.
#[derive(Debug, Clone)]
pub struct SeaRouteTool {
    dir: PathBuf,
    java: String,
    timeout: Duration,
}

impl SeaRouteTool {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            java: "java".to_string(),
            timeout: SEAROUTE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_java(mut self, java: impl Into<String>) -> Self {
        self.java = java.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether the jar is present in the configured directory.
    pub fn is_available(&self) -> bool {
        self.dir.join(SEAROUTE_JAR).is_file()
    }

    /// Run the tool once, surfacing every failure.
    pub fn compute(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        resolution: SeaResolution,
    ) -> Result<Vec<Coordinate>> {
        if !self.is_available() {
            return Err(Error::MaritimeTool {
                message: format!("{} not found in {}", SEAROUTE_JAR, self.dir.display()),
            });
        }

        let workdir = tempfile::tempdir()?;
        let input = workdir.path().join("input.csv");
        let output = workdir.path().join("output.geojson");
        fs::write(
            &input,
            format!(
                "route name,olon,olat,dlon,dlat\nroute,{},{},{},{}\n",
                origin.lon, origin.lat, destination.lon, destination.lat
            ),
        )?;

        let mut child = Command::new(&self.java)
            .arg("-jar")
            .arg(SEAROUTE_JAR)
            .arg("-i")
            .arg(&input)
            .arg("-o")
            .arg(&output)
            .arg("-res")
            .arg(resolution.km().to_string())
            .current_dir(&self.dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        let status = match child.wait_timeout(self.timeout)? {
            Some(status) => status,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(Error::MaritimeTool {
                    message: format!("timed out after {}s", self.timeout.as_secs()),
                });
            }
        };

        if !status.success() {
            return Err(Error::MaritimeTool {
                message: format!("exited with {status}"),
            });
        }

        let raw = fs::read_to_string(&output)?;
        parse_geojson_path(&raw)
    }
}

impl MaritimePathProvider for SeaRouteTool {
    fn name(&self) -> &'static str {
        "searoute"
    }

    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        resolution: SeaResolution,
    ) -> Vec<Coordinate> {
        match self.compute(origin, destination, resolution) {
            Ok(path) => {
                debug!(points = path.len(), %resolution, "searoute path computed");
                path
            }
            Err(err) => {
                warn!(
                    error = %err,
                    %origin,
                    %destination,
                    "maritime routing failed; using straight line"
                );
                vec![origin, destination]
            }
        }
    }
}

/// Extract the path from the first feature of a GeoJSON feature collection.
///
/// `LineString` coordinates are used as-is; `MultiLineString` parts are
/// concatenated in order. Extra position members (altitude) are ignored.
pub fn parse_geojson_path(raw: &str) -> Result<Vec<Coordinate>> {
    let document: Value = serde_json::from_str(raw)?;
    let geometry = document
        .get("features")
        .and_then(Value::as_array)
        .and_then(|features| features.first())
        .and_then(|feature| feature.get("geometry"))
        .ok_or_else(|| Error::MaritimeTool {
            message: "output contained no features".to_string(),
        })?;

    let kind = geometry.get("type").and_then(Value::as_str).unwrap_or_default();
    let coordinates = geometry.get("coordinates").and_then(Value::as_array);

    let lines: Vec<&Vec<Value>> = match (kind, coordinates) {
        ("LineString", Some(line)) => vec![line],
        ("MultiLineString", Some(parts)) => parts.iter().filter_map(Value::as_array).collect(),
        _ => {
            return Err(Error::MaritimeTool {
                message: format!("unsupported geometry type '{kind}'"),
            })
        }
    };

    let mut path = Vec::new();
    for line in lines {
        for position in line {
            path.push(parse_position(position)?);
        }
    }

    if path.is_empty() {
        return Err(Error::MaritimeTool {
            message: "output geometry had no coordinates".to_string(),
        });
    }
    Ok(path)
}

fn parse_position(position: &Value) -> Result<Coordinate> {
    let values = position.as_array();
    let lon = values.and_then(|v| v.first()).and_then(Value::as_f64);
    let lat = values.and_then(|v| v.get(1)).and_then(Value::as_f64);
    match (lon, lat) {
        (Some(lon), Some(lat)) => Ok(Coordinate::new(lon, lat)),
        _ => Err(Error::MaritimeTool {
            message: format!("invalid position {position}"),
        }),
    }
}

/// Resolve the SeaRoute directory: explicit path, then
/// `FREIGHTPATH_SEAROUTE_DIR`, then the platform data directory.
pub fn resolve_searoute_dir(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(dir) = env::var_os(SEAROUTE_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    ProjectDirs::from("org", "freightpath", "freightpath")
        .map(|dirs| dirs.data_dir().join("searoute"))
}

/// Pick the SeaRoute tool when its jar is installed, otherwise straight lines.
pub fn select_maritime_provider(searoute_dir: Option<&Path>) -> Box<dyn MaritimePathProvider> {
    match resolve_searoute_dir(searoute_dir).map(SeaRouteTool::new) {
        Some(tool) if tool.is_available() => {
            info!(dir = %tool.dir().display(), "using searoute maritime provider");
            Box::new(tool)
        }
        Some(tool) => {
            info!(
                dir = %tool.dir().display(),
                "searoute.jar not found; sea legs will be straight lines"
            );
            Box::new(StraightLineProvider)
        }
        None => {
            info!("no searoute directory resolvable; sea legs will be straight lines");
            Box::new(StraightLineProvider)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_parses_supported_values() {
        assert_eq!("50".parse::<SeaResolution>().unwrap(), SeaResolution::Km50);
        assert_eq!("5km".parse::<SeaResolution>().unwrap(), SeaResolution::Km5);
        assert!(matches!(
            "7".parse::<SeaResolution>(),
            Err(Error::UnsupportedOption { .. })
        ));
        assert_eq!(SeaResolution::default().km(), 20);
    }

    #[test]
    fn straight_line_provider_returns_endpoints() {
        let a = Coordinate::new(1.0, 2.0);
        let b = Coordinate::new(3.0, 4.0);
        assert_eq!(
            StraightLineProvider.route(a, b, SeaResolution::Km20),
            vec![a, b]
        );
    }

    #[test]
    fn missing_jar_falls_back_to_straight_line() {
        let dir = tempfile::tempdir().unwrap();
        let tool = SeaRouteTool::new(dir.path());
        assert!(!tool.is_available());

        let a = Coordinate::new(121.8, 31.2);
        let b = Coordinate::new(4.5, 51.9);
        assert!(tool.compute(a, b, SeaResolution::Km20).is_err());
        assert_eq!(tool.route(a, b, SeaResolution::Km20), vec![a, b]);
    }

    /// Lay out a SeaRoute directory whose `java` is a shell script.
    #[cfg(unix)]
    fn scripted_tool(dir: &Path, script: &str) -> SeaRouteTool {
        use std::os::unix::fs::PermissionsExt;

        fs::write(dir.join(SEAROUTE_JAR), b"").unwrap();
        let java = dir.join("fake-java.sh");
        fs::write(&java, format!("#!/bin/sh\n{script}\n")).unwrap();
        fs::set_permissions(&java, fs::Permissions::from_mode(0o755)).unwrap();
        SeaRouteTool::new(dir).with_java(java.to_string_lossy())
    }

    // Serialises script creation and spawning so no child inherits a script
    // that another test still has open for writing.
    #[cfg(unix)]
    static SCRIPT_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[cfg(unix)]
    #[test]
    fn hung_tool_is_killed_and_falls_back() {
        let _guard = SCRIPT_LOCK.lock().unwrap_or_else(|err| err.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let tool = scripted_tool(dir.path(), "exec sleep 30")
            .with_timeout(Duration::from_millis(300));
        let a = Coordinate::new(121.8, 31.2);
        let b = Coordinate::new(4.5, 51.9);

        let started = std::time::Instant::now();
        assert!(matches!(
            tool.compute(a, b, SeaResolution::Km20),
            Err(Error::MaritimeTool { .. })
        ));
        assert_eq!(tool.route(a, b, SeaResolution::Km20), vec![a, b]);
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[cfg(unix)]
    #[test]
    fn failing_tool_falls_back() {
        let _guard = SCRIPT_LOCK.lock().unwrap_or_else(|err| err.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let tool = scripted_tool(dir.path(), "exit 1");
        let a = Coordinate::new(121.8, 31.2);
        let b = Coordinate::new(4.5, 51.9);

        let err = tool.compute(a, b, SeaResolution::Km20).unwrap_err();
        assert!(err.to_string().contains("exited with"));
        assert_eq!(tool.route(a, b, SeaResolution::Km20), vec![a, b]);
    }

    #[cfg(unix)]
    #[test]
    fn tool_output_geojson_becomes_the_path() {
        let _guard = SCRIPT_LOCK.lock().unwrap_or_else(|err| err.into_inner());
        let dir = tempfile::tempdir().unwrap();
        // Arguments: -jar searoute.jar -i <input> -o <output> -res <km>
        let script = r#"[ "$8" = "50" ] || exit 3
[ -f "$4" ] || exit 4
cat > "$6" <<'JSON'
{"type":"FeatureCollection","features":[{"type":"Feature","geometry":{"type":"LineString","coordinates":[[121.8,31.2],[103.8,1.3],[4.5,51.9]]}}]}
JSON"#;
        let tool = scripted_tool(dir.path(), script);
        let a = Coordinate::new(121.8, 31.2);
        let b = Coordinate::new(4.5, 51.9);

        let path = tool.route(a, b, SeaResolution::Km50);
        assert_eq!(path, vec![a, Coordinate::new(103.8, 1.3), b]);
    }

    #[test]
    fn geojson_line_string_is_parsed() {
        let raw = r#"{"type":"FeatureCollection","features":[{"type":"Feature",
            "geometry":{"type":"LineString","coordinates":[[1.0,2.0],[3.0,4.0,0.0]]}}]}"#;
        let path = parse_geojson_path(raw).unwrap();
        assert_eq!(path, vec![Coordinate::new(1.0, 2.0), Coordinate::new(3.0, 4.0)]);
    }

    #[test]
    fn geojson_multi_line_string_is_flattened() {
        let raw = r#"{"features":[{"geometry":{"type":"MultiLineString",
            "coordinates":[[[1,1],[2,2]],[[2,2],[3,3]]]}}]}"#;
        let path = parse_geojson_path(raw).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path[3], Coordinate::new(3.0, 3.0));
    }

    #[test]
    fn geojson_without_features_is_an_error() {
        assert!(parse_geojson_path(r#"{"features":[]}"#).is_err());
        assert!(parse_geojson_path(r#"{"features":[{"geometry":{"type":"Point","coordinates":[1,2]}}]}"#).is_err());
        assert!(parse_geojson_path("not json").is_err());
    }

    #[test]
    fn explicit_searoute_dir_wins() {
        let dir = PathBuf::from("/opt/searoute");
        assert_eq!(resolve_searoute_dir(Some(dir.as_path())), Some(dir.clone()));
    }
}
