// [apps/cube-server/tests/scenarios.rs]
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use cube_server::routes::build_router;
use cube_server::Bootstrap;
use http_body_util::BodyExt;
use tower::ServiceExt;

fn app() -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let state = Bootstrap::ignite(dir.path()).unwrap();
    (dir, build_router(state))
}

async fn send(app: &Router, client: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("X-Client-Name", client)
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn root_get_says_hello() {
    let (_dir, app) = app();
    let response = app.clone().oneshot(Request::builder().uri("/").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"Hello");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (_dir, app) = app();
    let response = app.clone().oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_client_name_header_is_rejected() {
    let (_dir, app) = app();
    let request = Request::builder().method("POST").uri("/").body(Body::from("GET x")).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ERR X-Client-Name header required");
}

// Scenario 1: new key, round-trip.
#[tokio::test]
async fn scenario_new_key_round_trip() {
    let (_dir, app) = app();
    let (status, body) = send(&app, "alice", r#"SET name "Alice""#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "NIL Alice");

    let (status, body) = send(&app, "alice", "GET name").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Alice");
}

// Scenario 2: overwrite returns old.
#[tokio::test]
async fn scenario_overwrite_returns_old_value() {
    let (_dir, app) = app();
    assert_eq!(send(&app, "c", "SET x 1").await.1, "NIL 1");
    assert_eq!(send(&app, "c", "SET x 2").await.1, "1 2");
    assert_eq!(send(&app, "c", "GET x").await.1, "2");
}

// Scenario 3: snapshot isolation across clients.
#[tokio::test]
async fn scenario_snapshot_isolation_across_clients() {
    let (_dir, app) = app();
    assert_eq!(send(&app, "a", "GET x").await.1, "NIL");
    assert_eq!(send(&app, "b", "SET x 1").await.1, "NIL 1");
    assert_eq!(send(&app, "a", "BEGIN").await.1, "OK");
    assert_eq!(send(&app, "a", "GET x").await.1, "1");
    assert_eq!(send(&app, "b", "SET x 2").await.1, "1 2");
    assert_eq!(send(&app, "a", "GET x").await.1, "1", "a's snapshot must not see b's write");
    let (status, body) = send(&app, "a", "COMMIT").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "ERR Atomicity failure (x)");
}

// Scenario 4: first-committer-wins.
#[tokio::test]
async fn scenario_first_committer_wins() {
    let (_dir, app) = app();
    send(&app, "seed", "SET x 10").await;

    send(&app, "a", "BEGIN").await;
    assert_eq!(send(&app, "a", "GET x").await.1, "10");
    assert_eq!(send(&app, "a", "SET x 20").await.1, "10 20");

    send(&app, "b", "BEGIN").await;
    assert_eq!(send(&app, "b", "GET x").await.1, "10");
    assert_eq!(send(&app, "b", "SET x 30").await.1, "10 30");
    assert_eq!(send(&app, "b", "COMMIT").await.1, "OK");

    let (status, body) = send(&app, "a", "COMMIT").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "ERR Atomicity failure (x)");

    assert_eq!(send(&app, "anyone", "GET x").await.1, "30");
}

// Scenario 5: rollback.
#[tokio::test]
async fn scenario_rollback() {
    let (_dir, app) = app();
    assert_eq!(send(&app, "c", r#"SET k "v0""#).await.1, "NIL v0");
    assert_eq!(send(&app, "c", "BEGIN").await.1, "OK");
    assert_eq!(send(&app, "c", r#"SET k "v1""#).await.1, "v0 v1");
    assert_eq!(send(&app, "c", "ROLLBACK").await.1, "OK");
    assert_eq!(send(&app, "c", "GET k").await.1, "v0");
}

// Scenario 8: key-prefix distinctness.
#[tokio::test]
async fn scenario_key_prefix_distinctness() {
    let (_dir, app) = app();
    assert_eq!(send(&app, "c", r#"SET key1 "a""#).await.1, "NIL a");
    assert_eq!(send(&app, "c", r#"SET key12 "b""#).await.1, "NIL b");
    assert_eq!(send(&app, "c", "GET key1").await.1, "a");
    assert_eq!(send(&app, "c", "GET key12").await.1, "b");
}

#[tokio::test]
async fn begin_twice_and_commit_without_begin_are_rejected() {
    let (_dir, app) = app();
    send(&app, "c", "BEGIN").await;
    assert_eq!(send(&app, "c", "BEGIN").await.1, "ERR Already in transaction");
    send(&app, "c", "ROLLBACK").await;
    assert_eq!(send(&app, "c", "COMMIT").await.1, "ERR No transaction in progress");
}

#[tokio::test]
async fn set_nil_is_explicitly_rejected() {
    let (_dir, app) = app();
    let (status, body) = send(&app, "c", "SET k nil").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "ERR cannot SET a key to nil");
}
