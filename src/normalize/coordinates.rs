use std::sync::Arc;

use crate::domain::{EndLocationSource, Location, Pitch};

/// Place raw provider coordinates on `pitch`
pub fn normalize(raw_x: f64, raw_y: f64, raw_z: Option<f64>, pitch: &Arc<Pitch>) -> Location {
    Location::new(raw_x, raw_y, raw_z, Arc::clone(pitch))
}

/// Ball end point: goal-line crossing at the far length edge when the
/// provider reports one, else the pitch origin.
pub fn end_location(
    crossed_y: Option<f64>,
    crossed_z: Option<f64>,
    pitch: &Arc<Pitch>,
) -> (Location, EndLocationSource) {
    match crossed_y {
        Some(y) => (
            normalize(pitch.length, y, crossed_z, pitch),
            EndLocationSource::GoalCrossing,
        ),
        None => sentinel(pitch),
    }
}

pub fn sentinel(pitch: &Arc<Pitch>) -> (Location, EndLocationSource) {
    (Location::origin(Arc::clone(pitch)), EndLocationSource::Sentinel)
}
