//! Great-circle calculations on a spherical earth.
//!
//! All angles going in and out of this module are in degrees. Latitudes and longitudes
//! are not validated here; every function is total over finite inputs.
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// The radius of the sphere used to model the earth, in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance from this point to `other`, in meters
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        distance(self.latitude, self.longitude, other.latitude, other.longitude)
    }

    /// Initial bearing from this point towards `other`, in degrees clockwise from north
    pub fn bearing_to(&self, other: &Coordinates) -> f64 {
        bearing(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Computes the great-circle distance in meters between two points with the haversine
/// formula. Identical points are 0 meters apart.
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = phi2 - phi1;
    let dlambda = lon2.to_radians() - lon1.to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    // rounding can push `a` slightly past 1 for nearly antipodal points
    let a = a.min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Computes the initial bearing in the range `[0, 360)` for travelling from the first
/// point to the second along a great circle.
///
/// When both points are the same there is no meaningful direction. `atan2(0, 0)` is 0,
/// so the result is a bearing of 0 (north) rather than an error.
pub fn bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let y = dlambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Wraps any angle into the range `[0, 360)`
pub fn normalize_degrees(angle: f64) -> f64 {
    ((angle % 360.0) + 360.0) % 360.0
}

/// The direction to a target relative to the direction the device is pointing. This
/// is the angle a compass needle on the device should be rotated by.
pub fn relative_bearing(bearing: f64, heading: f64) -> f64 {
    normalize_degrees(bearing - heading)
}

/// One of the eight principal compass directions, each covering a 45° sector
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
pub enum Cardinal {
    #[strum(serialize = "N")]
    #[serde(rename = "N")]
    North,
    #[strum(serialize = "NE")]
    #[serde(rename = "NE")]
    NorthEast,
    #[strum(serialize = "E")]
    #[serde(rename = "E")]
    East,
    #[strum(serialize = "SE")]
    #[serde(rename = "SE")]
    SouthEast,
    #[strum(serialize = "S")]
    #[serde(rename = "S")]
    South,
    #[strum(serialize = "SW")]
    #[serde(rename = "SW")]
    SouthWest,
    #[strum(serialize = "W")]
    #[serde(rename = "W")]
    West,
    #[strum(serialize = "NW")]
    #[serde(rename = "NW")]
    NorthWest,
}

impl Cardinal {
    const ALL: [Cardinal; 8] = [
        Cardinal::North,
        Cardinal::NorthEast,
        Cardinal::East,
        Cardinal::SouthEast,
        Cardinal::South,
        Cardinal::SouthWest,
        Cardinal::West,
        Cardinal::NorthWest,
    ];

    /// Rounds the bearing to the nearest multiple of 45° and returns the matching
    /// direction, so sector boundaries sit at odd multiples of 22.5°.
    pub fn from_bearing(bearing: f64) -> Self {
        let index = (normalize_degrees(bearing) / 45.0).round() as usize % 8;
        Self::ALL[index]
    }
}
