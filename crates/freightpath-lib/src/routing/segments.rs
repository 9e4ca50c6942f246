//! Turns a mode decision into concrete segments.
//!
//! The mode and the endpoints' port roles select a [`RouteLayout`]; each
//! layout knows which legs to emit. Sea legs go through the configured
//! [`MaritimePathProvider`] exactly once per leg and are normalised before
//! they are stored. A missing anchor port degrades the whole trip to a
//! single direct land segment.

use tracing::{debug, warn};

use crate::analysis::TransportMode;
use crate::longitude::{normalize_longitudes, DatelineMode};
use crate::maritime::{MaritimePathProvider, SeaResolution};
use crate::model::{Coordinate, Segment, SegmentKind};
use crate::ports::{PortRecord, PortRegistry};

/// A named trip endpoint and its port role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoint<'n> {
    pub name: &'n str,
    pub coordinate: Coordinate,
    pub is_port: bool,
}

/// Shape of the route implied by the mode and port roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteLayout {
    /// One land segment, origin to destination.
    DirectLand,
    /// One sea segment between two ports.
    PortToPort,
    /// Land to the nearest port, sea across, land from the far port.
    LandSeaLand,
    /// Sea from the origin port, land from the port nearest the destination.
    SeaLand,
    /// Land to the port nearest the origin, sea into the destination port.
    LandSea,
}

impl RouteLayout {
    pub fn select(mode: TransportMode, origin_is_port: bool, destination_is_port: bool) -> Self {
        match mode {
            TransportMode::LandOnly => RouteLayout::DirectLand,
            TransportMode::SeaOnly => RouteLayout::PortToPort,
            TransportMode::Multimodal => match (origin_is_port, destination_is_port) {
                (true, true) => RouteLayout::PortToPort,
                (false, false) => RouteLayout::LandSeaLand,
                (true, false) => RouteLayout::SeaLand,
                (false, true) => RouteLayout::LandSea,
            },
        }
    }

    /// Human-readable route description.
    pub fn describe(self, origin: &str, destination: &str) -> String {
        let label = match self {
            RouteLayout::DirectLand => "Land only",
            RouteLayout::PortToPort => "Port to Port",
            RouteLayout::LandSeaLand => "Inland to Inland",
            RouteLayout::SeaLand => "Port to Inland",
            RouteLayout::LandSea => "Inland to Port",
        };
        format!("{label}: {origin} -> {destination}")
    }
}

/// Builds segment lists for a given mode.
#[derive(Clone, Copy)]
pub struct SegmentBuilder<'a> {
    registry: &'a PortRegistry,
    maritime: &'a dyn MaritimePathProvider,
    resolution: SeaResolution,
    dateline: DatelineMode,
}

impl<'a> SegmentBuilder<'a> {
    pub fn new(registry: &'a PortRegistry, maritime: &'a dyn MaritimePathProvider) -> Self {
        Self {
            registry,
            maritime,
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

    /// Segments for `mode` in travel order. An empty result means the route
    /// could not be built.
    pub fn build(
        &self,
        mode: TransportMode,
        origin: &Endpoint<'_>,
        destination: &Endpoint<'_>,
    ) -> Vec<Segment> {
        let layout = RouteLayout::select(mode, origin.is_port, destination.is_port);
        debug!(?layout, %mode, "building segments");

        match layout {
            RouteLayout::DirectLand => vec![direct_land(origin, destination)],
            RouteLayout::PortToPort => self
                .sea_leg(
                    origin.coordinate,
                    destination.coordinate,
                    format!("Sea route: {} -> {}", origin.name, destination.name),
                )
                .into_iter()
                .collect(),
            RouteLayout::LandSeaLand => self.land_sea_land(origin, destination),
            RouteLayout::SeaLand => self.sea_land(origin, destination),
            RouteLayout::LandSea => self.land_sea(origin, destination),
        }
    }

    fn land_sea_land(&self, origin: &Endpoint<'_>, destination: &Endpoint<'_>) -> Vec<Segment> {
        let origin_port = self.registry.find_nearest_port(origin.coordinate, None);
        let destination_port = origin_port.and_then(|port| {
            self.registry
                .find_nearest_port(destination.coordinate, Some(port.country.as_str()))
        });

        let (Some(origin_port), Some(destination_port)) = (origin_port, destination_port) else {
            warn!(
                origin = origin.name,
                destination = destination.name,
                "no anchor ports available; falling back to direct land route"
            );
            return vec![direct_land(origin, destination)];
        };
        log_anchor("origin", origin_port);
        log_anchor("destination", destination_port);

        let mut segments = vec![Segment::land(
            origin.coordinate,
            origin_port.coordinate(),
            format!("Land: {} -> {}", origin.name, origin_port.name),
        )];
        segments.extend(self.sea_leg(
            origin_port.coordinate(),
            destination_port.coordinate(),
            format!("Sea: {} -> {}", origin_port.name, destination_port.name),
        ));
        segments.push(Segment::land(
            destination_port.coordinate(),
            destination.coordinate,
            format!("Land: {} -> {}", destination_port.name, destination.name),
        ));
        segments
    }

    fn sea_land(&self, origin: &Endpoint<'_>, destination: &Endpoint<'_>) -> Vec<Segment> {
        let Some(destination_port) = self.registry.find_nearest_port(destination.coordinate, None)
        else {
            warn!(
                destination = destination.name,
                "no port near destination; falling back to direct land route"
            );
            return vec![direct_land(origin, destination)];
        };
        log_anchor("destination", destination_port);

        let mut segments: Vec<Segment> = self
            .sea_leg(
                origin.coordinate,
                destination_port.coordinate(),
                format!("Sea: {} -> {}", origin.name, destination_port.name),
            )
            .into_iter()
            .collect();
        segments.push(Segment::land(
            destination_port.coordinate(),
            destination.coordinate,
            format!("Land: {} -> {}", destination_port.name, destination.name),
        ));
        segments
    }

    fn land_sea(&self, origin: &Endpoint<'_>, destination: &Endpoint<'_>) -> Vec<Segment> {
        let Some(origin_port) = self.registry.find_nearest_port(origin.coordinate, None) else {
            warn!(
                origin = origin.name,
                "no port near origin; falling back to direct land route"
            );
            return vec![direct_land(origin, destination)];
        };
        log_anchor("origin", origin_port);

        let mut segments = vec![Segment::land(
            origin.coordinate,
            origin_port.coordinate(),
            format!("Land: {} -> {}", origin.name, origin_port.name),
        )];
        segments.extend(self.sea_leg(
            origin_port.coordinate(),
            destination.coordinate,
            format!("Sea: {} -> {}", origin_port.name, destination.name),
        ));
        segments
    }

    /// One provider call, normalised. `None` when the provider yields nothing.
    fn sea_leg(&self, from: Coordinate, to: Coordinate, description: String) -> Option<Segment> {
        let raw = self.maritime.route(from, to, self.resolution);
        if raw.is_empty() {
            warn!(
                provider = self.maritime.name(),
                %from,
                %to,
                "maritime provider returned no waypoints; skipping sea leg"
            );
            return None;
        }
        let waypoints = normalize_longitudes(&raw, self.dateline);
        Some(Segment::new(SegmentKind::Sea, from, to, waypoints, description))
    }
}

fn direct_land(origin: &Endpoint<'_>, destination: &Endpoint<'_>) -> Segment {
    Segment::land(
        origin.coordinate,
        destination.coordinate,
        format!("Direct land route: {} -> {}", origin.name, destination.name),
    )
}

fn log_anchor(role: &str, port: &PortRecord) {
    debug!(role, port = %port.name, country = %port.country, "selected anchor port");
}
