use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

mod location;
mod track;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/location", location::router())
        .route("/track", post(track::track))
        .route("/distance", get(track::distance))
}
