use crate::{API_PREFIX, APP_PREFIX};
use axum::http::Uri;
use minijinja::ErrorKind;
use std::collections::BTreeMap;

fn prefixed(prefix: &str, value: &str) -> String {
    match value.trim_start_matches('/') {
        "" => prefix.to_string(),
        path => [prefix, path].join("/"),
    }
}

/// A minijinja template filter for turning a path into a url within the html app
pub(crate) fn app_url(value: &str) -> String {
    prefixed(APP_PREFIX, value)
}

/// A minijinja template filter for turning a path into a url within the json api
pub(crate) fn api_url(value: &str) -> String {
    prefixed(API_PREFIX, value)
}

/// A minijinja template filter for appending (or replacing) a given query param
/// to a url.
pub(crate) fn append_query_param(
    uristr: &str,
    key: &str,
    value: &str,
) -> Result<String, minijinja::Error> {
    let uri = uristr.parse::<Uri>().map_err(|e| {
        minijinja::Error::new(ErrorKind::InvalidOperation, "Unable to parse uri string")
            .with_source(e)
    })?;
    let mut query: BTreeMap<String, String> = match uri.query() {
        Some(q) => serde_urlencoded::from_str(q).map_err(|e| {
            minijinja::Error::new(ErrorKind::InvalidOperation, "Unable to decode query params")
                .with_source(e)
        })?,
        None => BTreeMap::new(),
    };
    query.insert(key.to_string(), value.to_string());
    let querystring = serde_urlencoded::to_string(query).map_err(|e| {
        minijinja::Error::new(ErrorKind::InvalidOperation, "Unable to encode query params")
            .with_source(e)
    })?;

    Ok(format!("{path}?{querystring}", path = uri.path()))
}

/// A minijinja template filter for showing a latitude or longitude with a fixed
/// precision. Five decimal places is roughly one meter.
pub(crate) fn format_coordinate(value: f64) -> String {
    format!("{value:.5}")
}
