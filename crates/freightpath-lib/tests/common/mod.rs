//! Common test utilities and fixture helpers.
//!
//! Integration tests run fully offline: places come from the fixture
//! gazetteer and sea legs from a recording stub instead of the SeaRoute tool.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use freightpath_lib::{
    Coordinate, Gazetteer, MaritimePathProvider, RouteContext, SeaResolution,
};

/// Path to fixtures directory used by tests (gazetteer, sample ports).
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Gazetteer loaded from `docs/fixtures/places.json`.
pub fn fixture_gazetteer() -> Gazetteer {
    Gazetteer::from_path(&fixtures_dir().join("places.json")).expect("load fixture places.json")
}

/// A recorded maritime provider call.
pub type SeaCall = (Coordinate, Coordinate, SeaResolution);

/// Maritime stub that answers with a detour through a fixed midpoint and
/// records every call. Clones share the same call log.
#[derive(Clone, Default)]
pub struct RecordingStub {
    calls: Arc<Mutex<Vec<SeaCall>>>,
}

#[allow(dead_code)]
impl RecordingStub {
    pub fn calls(&self) -> Vec<SeaCall> {
        self.calls.lock().expect("call log lock").clone()
    }
}

impl MaritimePathProvider for RecordingStub {
    fn name(&self) -> &'static str {
        "recording-stub"
    }

    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        resolution: SeaResolution,
    ) -> Vec<Coordinate> {
        self.calls
            .lock()
            .expect("call log lock")
            .push((origin, destination, resolution));
        let midpoint = Coordinate::new(
            (origin.lon + destination.lon) / 2.0,
            (origin.lat + destination.lat) / 2.0 - 5.0,
        );
        vec![origin, midpoint, destination]
    }
}

/// Offline context plus a handle on the stub's call log.
#[allow(dead_code)]
pub fn offline_context() -> (RouteContext, RecordingStub) {
    let stub = RecordingStub::default();
    let context = RouteContext::new(Box::new(fixture_gazetteer()), Box::new(stub.clone()));
    (context, stub)
}
