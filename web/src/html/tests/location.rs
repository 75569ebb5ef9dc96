use super::*;
use axum::http::header::LOCATION;
use libwaypoint::location::{Location, LocationQuery};

fn assert_redirect_home(response: &axum::response::Response) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], app_url("/"));
}

#[test(sqlx::test(
    migrations = "../db/migrations/",
    fixtures(path = "../../../../db/fixtures", scripts("locations"))
))]
async fn test_add_location(pool: Pool<Sqlite>) {
    let (mut app, state) = test_app(Arc::new(Database::from(pool)));

    let response = post_form(
        &mut app,
        &app_url("/location/new"),
        &[("name", "Home"), ("latitude", "44.97"), ("longitude", "-93.26")],
    )
    .await;
    assert_redirect_home(&response);
    let home = state.store.load(5).await.expect("location was not added");
    assert_eq!(home, Location { id: 5, name: "Home".into(), latitude: 44.97, longitude: -93.26 });

    // the "use current position" button posts json
    let req = Request::builder()
        .uri(app_url("/location/new"))
        .method("POST")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"name": "Current Position", "latitude": -33.8568, "longitude": 151.2153}"#,
        ))
        .expect("Failed to build request");
    let response = app
        .as_service()
        .call(req)
        .await
        .expect("Failed to execute request");
    assert_redirect_home(&response);
    assert_eq!(state.store.load(6).await.unwrap().name, "Current Position");

    let response = post_form(
        &mut app,
        &app_url("/location/new"),
        &[("name", "Nowhere"), ("latitude", "100"), ("longitude", "0")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(response.into_body()).await;
    assert!(body.contains("invalid latitude"), "{body}");

    let response = post_form(
        &mut app,
        &app_url("/location/new"),
        &[("name", "Nowhere"), ("latitude", ""), ("longitude", "0")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = post_form(
        &mut app,
        &app_url("/location/new"),
        &[("name", "  "), ("latitude", "1"), ("longitude", "0")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(state.store.count().await.unwrap(), 6);
}

#[test(sqlx::test(
    migrations = "../db/migrations/",
    fixtures(path = "../../../../db/fixtures", scripts("locations"))
))]
async fn test_edit_location(pool: Pool<Sqlite>) {
    let (mut app, state) = test_app(Arc::new(Database::from(pool)));

    // blank fields are left alone
    let response = post_form(
        &mut app,
        &app_url("/location/1/edit"),
        &[("name", ""), ("latitude", "10.5"), ("longitude", "")],
    )
    .await;
    assert_redirect_home(&response);
    let loc = state.store.load(1).await.unwrap();
    assert_eq!(loc.name, "Big Ben");
    assert_eq!(loc.latitude, 10.5);
    assert_eq!(loc.longitude, -0.1246);

    let response = post_form(
        &mut app,
        &app_url("/location/1/edit"),
        &[("name", "Elizabeth Tower")],
    )
    .await;
    assert_redirect_home(&response);
    assert_eq!(state.store.load(1).await.unwrap().name, "Elizabeth Tower");

    let response = post_form(
        &mut app,
        &app_url("/location/1/edit"),
        &[("longitude", "181")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(state.store.load(1).await.unwrap().longitude, -0.1246);

    let response = post_form(
        &mut app,
        &app_url("/location/99/edit"),
        &[("name", "Ghost")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_text(response.into_body()).await;
    assert!(body.contains("Location not found"));
}

#[test(sqlx::test(
    migrations = "../db/migrations/",
    fixtures(path = "../../../../db/fixtures", scripts("locations"))
))]
async fn test_delete_location(pool: Pool<Sqlite>) {
    let (mut app, state) = test_app(Arc::new(Database::from(pool)));

    let response = post_form(&mut app, &app_url("/location/2/delete"), &[]).await;
    assert_redirect_home(&response);
    assert_eq!(state.store.get(2).await.unwrap(), None);

    let response = post_form(&mut app, &app_url("/location/2/delete"), &[]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // removing every location is allowed, nothing gets re-seeded until restart
    for id in [1, 3, 4] {
        let response = post_form(&mut app, &app_url(&format!("/location/{id}/delete")), &[]).await;
        assert_redirect_home(&response);
    }
    assert!(state.store.list(&LocationQuery::default()).await.unwrap().is_empty());
    let (status, body) = get(&mut app, &app_url("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No locations"));
}
