use crate::{test_app, util::app_url};
use axum::{
    Router,
    body::{Body, Bytes, HttpBody},
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use libwaypoint::{
    Database,
    store::{LocationStore, MemoryStore},
};
use sqlx::{Pool, Sqlite};
use std::sync::Arc;
use test_log::test;
use tower::Service;

mod location;

/// usage:
/// let (_parts, body) = response.into_parts();
/// print_response_body(body).await;
///
/// note that this consumes body, so it can't be used again
#[allow(dead_code)]
async fn print_response_body<B>(body: B)
where
    B: HttpBody<Data = Bytes>,
    B::Error: std::fmt::Display,
{
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            tracing::warn!("failed to collect body: {err}");
            return;
        }
    };

    if let Ok(body) = std::str::from_utf8(&bytes) {
        tracing::debug!("body = {body:?}");
    } else {
        tracing::warn!("Couldn't convert body to utf8");
    }
}

/// Collects the whole body of a response into a string
async fn body_text(body: Body) -> String {
    let bytes = body
        .collect()
        .await
        .expect("failed to collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body is not utf8")
}

async fn get(app: &mut Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .expect("Failed to build request");
    let response = app
        .as_service()
        .call(req)
        .await
        .expect("Failed to execute request");
    let status = response.status();
    (status, body_text(response.into_body()).await)
}

/// Posts an url-encoded form, the way a browser submits the forms on the page
async fn post_form(app: &mut Router, uri: &str, fields: &[(&str, &str)]) -> axum::response::Response {
    let body = serde_urlencoded::to_string(fields).expect("Failed to encode form");
    let req = Request::builder()
        .uri(uri)
        .method("POST")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .expect("Failed to build request");
    app.as_service()
        .call(req)
        .await
        .expect("Failed to execute request")
}

#[test(sqlx::test(
    migrations = "../db/migrations/",
    fixtures(path = "../../../../db/fixtures", scripts("locations"))
))]
async fn test_index(pool: Pool<Sqlite>) {
    let (mut app, _state) = test_app(Arc::new(Database::from(pool)));

    let (status, body) = get(&mut app, &app_url("/")).await;
    assert_eq!(status, StatusCode::OK);
    for name in ["Big Ben", "Paris", "Null Island", "Quarter Way East"] {
        assert!(body.contains(name), "{name} missing from page");
    }
    assert!(body.contains(r#"<option value="2">Paris</option>"#));
    assert!(body.contains("waypoint.js"));
    assert!(body.contains(r#"<option value="id" selected>Order added</option>"#));

    let (status, body) = get(&mut app, &app_url("/?filter=ben&sort=name&order=desc")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Big Ben"));
    assert!(!body.contains("Quarter Way East"));
    assert!(body.contains(r#"value="ben""#));
    assert!(body.contains(r#"<option value="id">Order added</option>"#));

    // wildcards in the filter are matched literally
    let (status, body) = get(&mut app, &app_url("/?filter=_")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("Big Ben"));
    assert!(body.contains("No locations match"));

    let (status, body) = get(&mut app, &app_url("/?order=sideways")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("400"));
}

#[test(tokio::test)]
async fn test_index_empty() {
    let store = Arc::new(MemoryStore::new());
    let (mut app, state) = test_app(store);
    let (status, body) = get(&mut app, &app_url("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No locations"));
    assert_eq!(state.store.count().await.unwrap(), 0);
}

#[test(tokio::test)]
async fn test_static_files() {
    let (mut app, _state) = test_app(Arc::new(MemoryStore::new()));
    let (status, body) = get(&mut app, "/static/waypoint.js").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("watchPosition"));
    let (status, _) = get(&mut app, "/static/style.css").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&mut app, "/static/nothing.txt").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
