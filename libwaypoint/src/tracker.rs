//! Resolving a selected location and measuring the way to it from a reported position.
//!
//! This is the only place where the store and the calculations in [crate::geo] meet.
//! The calculations only ever see two coordinate pairs.
use crate::{
    Result,
    geo::{Cardinal, Coordinates, relative_bearing},
    store::LocationStore,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A position reported by a client device. It is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Reading {
    #[serde(flatten)]
    pub position: Coordinates,
    /// The compass heading the device is pointing at, in degrees, if the device knows it
    #[serde(default)]
    pub heading: Option<f64>,
}

/// Distance and direction between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Leg {
    /// Great-circle distance in meters
    pub distance: f64,
    /// Initial bearing in degrees, in the range `[0, 360)`
    pub bearing: f64,
    pub direction: Cardinal,
}

impl Leg {
    pub fn between(from: &Coordinates, to: &Coordinates) -> Self {
        let bearing = from.bearing_to(to);
        Self {
            distance: from.distance_to(to),
            bearing,
            direction: Cardinal::from_bearing(bearing),
        }
    }
}

/// The result of tracking a reading against a stored location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackReport {
    pub location_id: i64,
    pub name: String,
    pub target: Coordinates,
    #[serde(flatten)]
    pub leg: Leg,
    /// The bearing relative to the device heading, only present when the reading had one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_bearing: Option<f64>,
}

/// Look up the coordinates of a stored location.
///
/// An unknown id results in [crate::Error::LocationNotFound].
pub async fn lookup(store: &dyn LocationStore, id: i64) -> Result<Coordinates> {
    Ok(store.load(id).await?.coordinates())
}

/// Measure the distance and direction from the reading to the location with the given id
pub async fn track(store: &dyn LocationStore, reading: &Reading, target: i64) -> Result<TrackReport> {
    let location = store.load(target).await?;
    let leg = Leg::between(&reading.position, &location.coordinates());
    trace!(location_id = target, ?leg, "tracked reading");
    Ok(TrackReport {
        location_id: location.id,
        target: location.coordinates(),
        name: location.name,
        leg,
        relative_bearing: reading.heading.map(|h| relative_bearing(leg.bearing, h)),
    })
}

/// Measure the distance and direction between two stored locations
pub async fn between(store: &dyn LocationStore, from: i64, to: i64) -> Result<Leg> {
    let a = lookup(store, from).await?;
    let b = lookup(store, to).await?;
    Ok(Leg::between(&a, &b))
}
