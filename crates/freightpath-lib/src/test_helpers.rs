// Test-only helpers for `freightpath-lib` unit tests

use std::sync::Mutex;

use crate::maritime::{MaritimePathProvider, SeaResolution};
use crate::model::Coordinate;

/// What the stub answers with.
enum Reply {
    Straight,
    Empty,
    Fixed(Vec<Coordinate>),
}

/// Maritime provider stub that counts calls and answers deterministically.
pub struct RecordingProvider {
    reply: Reply,
    calls: Mutex<Vec<(Coordinate, Coordinate, SeaResolution)>>,
}

impl RecordingProvider {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers `[origin, destination]`.
    pub fn straight() -> Self {
        Self::with_reply(Reply::Straight)
    }

    /// Answers with no waypoints at all.
    pub fn empty() -> Self {
        Self::with_reply(Reply::Empty)
    }

    /// Answers `path` regardless of the endpoints.
    pub fn with_path(path: Vec<Coordinate>) -> Self {
        Self::with_reply(Reply::Fixed(path))
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    pub fn requests(&self) -> Vec<(Coordinate, Coordinate, SeaResolution)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl MaritimePathProvider for RecordingProvider {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        resolution: SeaResolution,
    ) -> Vec<Coordinate> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((origin, destination, resolution));
        }
        match &self.reply {
            Reply::Straight => vec![origin, destination],
            Reply::Empty => Vec::new(),
            Reply::Fixed(path) => path.clone(),
        }
    }
}
