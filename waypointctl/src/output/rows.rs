use libwaypoint::{
    geo::Cardinal,
    location::Location,
    tracker::{Leg, TrackReport},
};
use serde::Serialize;
use tabled::Tabled;

#[derive(Tabled, Serialize)]
#[tabled(rename_all = "PascalCase")]
pub(crate) struct LocationRow {
    id: i64,
    name: String,
    latitude: f64,
    longitude: f64,
}

impl LocationRow {
    pub(crate) fn new(location: &Location) -> Self {
        Self {
            id: location.id,
            name: location.name.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

/// Distances are rounded to centimeters and bearings to hundredths of a degree
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Tabled, Serialize)]
#[tabled(rename_all = "PascalCase")]
pub(crate) struct TrackRow {
    #[tabled(rename = "Location")]
    location_id: i64,
    name: String,
    #[tabled(rename = "Distance (m)")]
    distance: f64,
    bearing: f64,
    direction: Cardinal,
    #[tabled(display("tabled::derive::display::option", ""))]
    relative_bearing: Option<f64>,
}

impl TrackRow {
    pub(crate) fn new(report: &TrackReport) -> Self {
        Self {
            location_id: report.location_id,
            name: report.name.clone(),
            distance: round2(report.leg.distance),
            bearing: round2(report.leg.bearing),
            direction: report.leg.direction,
            relative_bearing: report.relative_bearing.map(round2),
        }
    }
}

#[derive(Tabled, Serialize)]
#[tabled(rename_all = "PascalCase")]
pub(crate) struct LegRow {
    from: String,
    to: String,
    #[tabled(rename = "Distance (m)")]
    distance: f64,
    bearing: f64,
    direction: Cardinal,
}

impl LegRow {
    pub(crate) fn new(from: &Location, to: &Location, leg: &Leg) -> Self {
        Self {
            from: from.name.clone(),
            to: to.name.clone(),
            distance: round2(leg.distance),
            bearing: round2(leg.bearing),
            direction: leg.direction,
        }
    }
}
