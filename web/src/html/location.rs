use crate::{error::Error, html::error_page, state::AppState, util::app_url};
use axum::{
    Form, Json, Router,
    extract::{FromRequest, Path, Request, State, rejection::PathRejection},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Redirect, Response},
    routing::post,
};
use libwaypoint::{empty_string_as_none, location::Location};
use serde::Deserialize;
use tracing::info;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/new", post(new_location))
        .route("/{id}/edit", post(edit_location))
        .route("/{id}/delete", post(delete_location))
}

/// Redirect back to the main page after a form submission, or show the error page
fn finish(state: &AppState, result: Result<(), Error>) -> Response {
    match result {
        Ok(()) => Redirect::to(&app_url("/")).into_response(),
        Err(e) => error_page(state, e),
    }
}

#[derive(Debug, Deserialize)]
struct NewLocationParams {
    name: String,
    latitude: f64,
    longitude: f64,
}

/// The add form posts url-encoded data, while the "use current position" button
/// in the page script posts json
async fn parse_new_location(request: Request) -> Result<NewLocationParams, Error> {
    let is_json = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));
    if is_json {
        let Json(params) = Json::<NewLocationParams>::from_request(request, &()).await?;
        Ok(params)
    } else {
        let Form(params) = Form::<NewLocationParams>::from_request(request, &()).await?;
        Ok(params)
    }
}

async fn new_location(State(state): State<AppState>, request: Request) -> Response {
    let result = async {
        let params = parse_new_location(request).await?;
        let mut location = Location::new(params.name, params.latitude, params.longitude);
        let id = state.store.insert(&mut location).await?;
        info!(id, %location.name, "Added location");
        Ok::<(), Error>(())
    }
    .await;
    finish(&state, result)
}

#[derive(Debug, Deserialize)]
struct EditParams {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    latitude: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    longitude: Option<f64>,
}

async fn edit_location(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    request: Request,
) -> Response {
    let result = async {
        let Path(id) = id?;
        let Form(params) = Form::<EditParams>::from_request(request, &()).await?;
        let mut loc = state.store.load(id).await?;
        // blank fields keep their current value
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
        info!(id, "Updated location");
        Ok::<(), Error>(())
    }
    .await;
    finish(&state, result)
}

async fn delete_location(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let result = async {
        let Path(id) = id?;
        state.store.delete(id).await?;
        info!(id, "Deleted location");
        Ok::<(), Error>(())
    }
    .await;
    finish(&state, result)
}
