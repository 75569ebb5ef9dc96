use crate::{error::Error, state::AppState};
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use libwaypoint::{
    core::query::SortOrder,
    empty_string_as_none,
    geo::Coordinates,
    location::{Location, LocationQuery, SortField},
    tracker,
};
use serde::Deserialize;
use tracing::info;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_locations).post(add_location))
        .route(
            "/{id}",
            get(show_location)
                .put(modify_location)
                .delete(delete_location),
        )
        .route("/{id}/coords", get(show_coords))
}

#[derive(Deserialize)]
struct ListParams {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    filter: Option<String>,
    sort: Option<SortField>,
    order: Option<SortOrder>,
}

async fn list_locations(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<impl IntoResponse, Error> {
    let Query(params) = params?;
    let query = LocationQuery::new(
        params.filter,
        params.sort.unwrap_or_default(),
        params.order.unwrap_or_default(),
    );
    let locations = state.store.list(&query).await?;
    Ok(Json(locations))
}

async fn show_location(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Location>, Error> {
    let Path(id) = id?;
    Ok(Json(state.store.load(id).await?))
}

async fn show_coords(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Coordinates>, Error> {
    let Path(id) = id?;
    Ok(Json(tracker::lookup(state.store.as_ref(), id).await?))
}

#[derive(Deserialize)]
struct NewLocationParams {
    name: String,
    latitude: f64,
    longitude: f64,
}

async fn add_location(
    State(state): State<AppState>,
    payload: Result<Json<NewLocationParams>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(params) = payload?;
    let mut location = Location::new(params.name, params.latitude, params.longitude);
    let id = state.store.insert(&mut location).await?;
    info!(id, %location.name, "Added location");
    Ok((StatusCode::CREATED, Json(location)))
}

#[derive(Deserialize)]
struct ModifyParams {
    name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

async fn modify_location(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ModifyParams>, JsonRejection>,
) -> Result<Json<Location>, Error> {
    let Path(id) = id?;
    let Json(params) = payload?;
    if params.name.is_none() && params.latitude.is_none() && params.longitude.is_none() {
        return Err(Error::Rejected(
            StatusCode::UNPROCESSABLE_ENTITY,
            "No parameters given".to_string(),
        ));
    }
    let mut loc = state.store.load(id).await?;
    if let Some(name) = params.name {
        loc.name = name;
    }
    if let Some(n) = params.latitude {
        loc.latitude = n;
    }
    if let Some(n) = params.longitude {
        loc.longitude = n;
    }
    state.store.update(&loc).await?;
    Ok(Json(state.store.load(id).await?))
}

async fn delete_location(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, Error> {
    let Path(id) = id?;
    state.store.delete(id).await?;
    info!(id, "Deleted location");
    Ok(StatusCode::NO_CONTENT)
}
