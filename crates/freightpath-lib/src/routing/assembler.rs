use crate::error::{Error, Result};
use crate::model::{Route, Segment};

/// Aggregate segments into a [`Route`].
///
/// Fails with [`Error::EmptyRoute`] when there is nothing to assemble. Totals
/// are the sums of each segment's own distance and waypoint count.
pub fn assemble_route(segments: Vec<Segment>, description: impl Into<String>) -> Result<Route> {
    if segments.is_empty() {
        return Err(Error::EmptyRoute);
    }
    Ok(Route::from_segments(segments, description.into()))
}
