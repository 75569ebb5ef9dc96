use crate::{error::Error, state::AppState};
use axum::{
    Router,
    extract::{OriginalUri, Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
    routing::get,
};
use libwaypoint::{
    core::query::SortOrder,
    empty_string_as_none,
    location::{LocationQuery, SortField},
};
use minijinja::context;
use serde::{Deserialize, Serialize};
use tracing::warn;

mod location;
#[cfg(test)]
mod tests;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .nest("/location", location::router())
}

/// Renders the error page for an error that happened while handling a request
/// from the html app
pub(crate) fn error_page(state: &AppState, error: Error) -> Response {
    warn!("Got error for html response: {error:?}");
    let (status, message) = error.to_client_status();
    (
        status,
        state.render_template(
            "error.html.j2",
            context!(
                status => status.as_u16(),
                reason => status.canonical_reason(),
                message => message,
            ),
        ),
    )
        .into_response()
}

#[derive(Deserialize)]
struct RootParams {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    filter: Option<String>,
    sort: Option<SortField>,
    order: Option<SortOrder>,
}

async fn root(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    params: Result<Query<RootParams>, QueryRejection>,
) -> Response {
    match render_root(&state, uri.to_string(), params).await {
        Ok(response) => response,
        Err(e) => error_page(&state, e),
    }
}

async fn render_root(
    state: &AppState,
    uri: String,
    params: Result<Query<RootParams>, QueryRejection>,
) -> Result<Response, Error> {
    let Query(params) = params?;
    let sort = params.sort.unwrap_or_default();
    let order = params.order.unwrap_or_default();
    let query = LocationQuery::new(params.filter.clone(), sort, order);
    let locations = state.store.list(&query).await?;
    let total = state.store.count().await?;
    Ok(state
        .render_template(
            "index.html.j2",
            context!(
                locations => locations,
                total => total,
                request_uri => uri,
                options => FilterSortSpec {
                    filter: params.filter.unwrap_or_default(),
                    sort_fields: sort_fields(sort),
                    sort_dirs: sort_dirs(order),
                },
            ),
        )
        .into_response())
}

#[derive(Serialize)]
pub(crate) struct FilterSortSpec<T: Serialize> {
    filter: String,
    sort_fields: Vec<FilterSortOption<T>>,
    sort_dirs: Vec<FilterSortOption<SortOrder>>,
}

/// A utility type for specifying an option for sorting
#[derive(Serialize)]
pub(crate) struct FilterSortOption<T: Serialize> {
    name: String,
    value: T,
    selected: bool,
}

/// A utility function for creating the sort order options
pub(crate) fn sort_dirs(selected: SortOrder) -> Vec<FilterSortOption<SortOrder>> {
    <SortOrder as strum::IntoEnumIterator>::iter()
        .map(|val| FilterSortOption {
            name: val.to_string(),
            value: val,
            selected: val == selected,
        })
        .collect()
}

fn sort_fields(selected: SortField) -> Vec<FilterSortOption<SortField>> {
    <SortField as strum::IntoEnumIterator>::iter()
        .map(|val| FilterSortOption {
            name: match val {
                SortField::Id => "Order added".to_string(),
                SortField::Name => "Name".to_string(),
            },
            value: val,
            selected: val == selected,
        })
        .collect()
}
