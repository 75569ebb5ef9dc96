use crate::{error::Error, state::AppState};
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use libwaypoint::tracker::{self, Leg, Reading, TrackReport};
use serde::{Deserialize, Deserializer};

/// Clients send the id of the selected location straight from a form control, so
/// it may arrive as a string
fn id_from_number_or_string<'de, D>(de: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(i64),
        Text(String),
    }

    match Id::deserialize(de)? {
        Id::Number(n) => Ok(n),
        Id::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackParams {
    #[serde(flatten)]
    reading: Reading,
    #[serde(deserialize_with = "id_from_number_or_string")]
    location_id: i64,
}

pub(crate) async fn track(
    State(state): State<AppState>,
    payload: Result<Json<TrackParams>, JsonRejection>,
) -> Result<Json<TrackReport>, Error> {
    let Json(params) = payload?;
    let report = tracker::track(state.store.as_ref(), &params.reading, params.location_id).await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub(crate) struct DistanceParams {
    from: Option<i64>,
    to: Option<i64>,
}

pub(crate) async fn distance(
    State(state): State<AppState>,
    params: Result<Query<DistanceParams>, QueryRejection>,
) -> Result<Json<Leg>, Error> {
    let Query(params) = params?;
    let from = params
        .from
        .ok_or_else(|| Error::RequiredParameterMissing("from".into()))?;
    let to = params
        .to
        .ok_or_else(|| Error::RequiredParameterMissing("to".into()))?;
    Ok(Json(tracker::between(state.store.as_ref(), from, to).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_params() {
        let p: TrackParams = serde_json::from_str(
            r#"{"latitude": 51.5, "longitude": -0.12, "location_id": 3}"#,
        )
        .unwrap();
        assert_eq!(p.location_id, 3);
        assert_eq!(p.reading.heading, None);

        let p: TrackParams = serde_json::from_str(
            r#"{"latitude": 51.5, "longitude": -0.12, "location_id": "12", "heading": 90}"#,
        )
        .unwrap();
        assert_eq!(p.location_id, 12);
        assert_eq!(p.reading.heading, Some(90.0));
        assert_eq!(p.reading.position.latitude, 51.5);

        assert!(
            serde_json::from_str::<TrackParams>(r#"{"latitude": 51.5, "longitude": -0.12}"#)
                .is_err()
        );
        assert!(
            serde_json::from_str::<TrackParams>(
                r#"{"latitude": 51.5, "longitude": -0.12, "location_id": "north"}"#
            )
            .is_err()
        );
        assert!(
            serde_json::from_str::<TrackParams>(r#"{"latitude": "x", "location_id": 1}"#).is_err()
        );
    }
}
