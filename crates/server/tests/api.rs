//! Drives the full router over a temporary SQLite database.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use clap::Parser;
use serde_json::{json, Value};
use server::{cli::Cli, db, routes, AppState};
use shared::api::Object;
use tempfile::TempDir;
use tower::ServiceExt;

async fn setup_app(extra_args: &[&str]) -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.sqlite");
    let db_path = db_path.to_str().unwrap().to_owned();
    let assets_dir = dir.path().join("public");
    std::fs::create_dir(&assets_dir).unwrap();
    std::fs::write(assets_dir.join("index.html"), "<h1>Exercise tracker</h1>").unwrap();

    let mut args = vec![
        "exercise-tracker",
        "--sqlite-connection-string",
        &db_path,
        "--assets-dir",
        assets_dir.to_str().unwrap(),
    ];
    args.extend_from_slice(extra_args);
    let cli = Cli::parse_from(args);

    db::run_migrations(&cli.sqlite_connection_string).unwrap();
    let pool = db::create_pool(&cli.sqlite_connection_string).unwrap();

    let app = routes::router(AppState::new(pool, cli)).unwrap();
    (app, dir)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_form(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

async fn create_user(app: &Router, username: &str) -> String {
    let (status, json) = send(app, post_json(Object::Users.path(), json!({ "username": username }))).await;
    assert_eq!(status, StatusCode::OK);
    json["id"].as_str().unwrap().to_owned()
}

async fn seed_log(app: &Router) -> String {
    let id = create_user(app, "alice").await;
    for (description, date) in [("run", "2024-01-01"), ("swim", "2024-01-15"), ("row", "2024-02-01")] {
        let body = json!({ "description": description, "duration": 30, "date": date });
        let (status, _) = send(app, post_json(&Object::UserExercises.id_path(&id), body)).await;
        assert_eq!(status, StatusCode::OK);
    }
    id
}

fn descriptions(json: &Value) -> Vec<&str> {
    json["log"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["description"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_ping() {
    let (app, _dir) = setup_app(&[]).await;
    let (status, json) = send(&app, get(Object::Ping.path())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "status": "ok", "users": 0 }));
}

#[tokio::test]
async fn test_create_and_list_users() {
    let (app, _dir) = setup_app(&[]).await;

    let (status, alice) = send(&app, post_json(Object::Users.path(), json!({ "username": "alice" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(alice["username"], "alice");

    let (status, bob) = send(&app, post_form(Object::Users.path(), "username=bob")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bob["username"], "bob");

    let (status, users) = send(&app, get(Object::Users.path())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users, json!([alice, bob]));
}

#[tokio::test]
async fn test_create_user_without_username() {
    let (app, _dir) = setup_app(&[]).await;

    let (status, json) = send(&app, post_json(Object::Users.path(), json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "error": "username is required" }));
}

#[tokio::test]
async fn test_add_exercise_json() {
    let (app, _dir) = setup_app(&[]).await;
    let id = create_user(&app, "alice").await;

    let body = json!({ "description": "run", "duration": 30, "date": "2024-01-01" });
    let (status, json) = send(&app, post_json(&Object::UserExercises.id_path(&id), body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "username": "alice",
            "description": "run",
            "duration": 30,
            "date": "Mon Jan 01 2024",
            "id": id,
        })
    );
}

#[tokio::test]
async fn test_add_exercise_form() {
    let (app, _dir) = setup_app(&[]).await;
    let id = create_user(&app, "alice").await;

    let request = post_form(&Object::UserExercises.id_path(&id), "description=swim&duration=45&date=2024-3-7");
    let (status, json) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["duration"], 45);
    assert_eq!(json["date"], "Thu Mar 07 2024");
}

#[tokio::test]
async fn test_add_exercise_validation() {
    let (app, _dir) = setup_app(&[]).await;
    let id = create_user(&app, "alice").await;
    let uri = Object::UserExercises.id_path(&id);

    let (status, json) = send(&app, post_json(&uri, json!({ "description": "run", "duration": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "duration must be a positive whole number of minutes");

    let body = json!({ "description": "run", "duration": 10, "date": "2024-13-01" });
    let (status, _) = send(&app, post_json(&uri, body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, json) = send(&app, get(&Object::UserLogs.id_path(&id))).await;
    assert_eq!(json["count"], 0);
}

#[tokio::test]
async fn test_lenient_dates_roll_over() {
    let (app, _dir) = setup_app(&["--date-parsing", "lenient"]).await;
    let id = create_user(&app, "alice").await;

    let body = json!({ "description": "run", "duration": 10, "date": "2024-13-01" });
    let (status, json) = send(&app, post_json(&Object::UserExercises.id_path(&id), body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["date"], "Wed Jan 01 2025");
}

#[tokio::test]
async fn test_unknown_user() {
    let (app, _dir) = setup_app(&[]).await;
    let missing = "6f1c0b1e-8f7a-4a59-9a59-2f1b3c4d5e6f";

    let body = json!({ "description": "run", "duration": 30 });
    let (status, json) = send(&app, post_json(&Object::UserExercises.id_path(missing), body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "error": format!("user {missing} not found") }));

    let (status, _) = send(&app, get(&Object::UserLogs.id_path("61c0ceb68de38dbb2f5d8c04"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_log_without_filters() {
    let (app, _dir) = setup_app(&[]).await;
    let id = seed_log(&app).await;

    let (status, json) = send(&app, get(&Object::UserLogs.id_path(&id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["username"], "alice");
    assert_eq!(json["id"], id);
    assert_eq!(json["count"], 3);
    assert_eq!(descriptions(&json), ["run", "swim", "row"]);
    assert_eq!(
        json["log"][0],
        json!({ "description": "run", "duration": 30, "date": "Mon Jan 01 2024" })
    );

    let (_, empty_params) = send(&app, get(&format!("{}?from=&to=&limit=", Object::UserLogs.id_path(&id)))).await;
    assert_eq!(empty_params, json);
}

#[tokio::test]
async fn test_log_range_and_limit() {
    let (app, _dir) = setup_app(&[]).await;
    let id = seed_log(&app).await;

    let (_, json) = send(&app, get(&format!("{}?from=2024-01-01&to=2024-01-31", Object::UserLogs.id_path(&id)))).await;
    assert_eq!(descriptions(&json), ["run", "swim"]);
    assert_eq!(json["count"], 2);

    let (_, json) = send(&app, get(&format!("{}?limit=1", Object::UserLogs.id_path(&id)))).await;
    assert_eq!(descriptions(&json), ["run"]);
    assert_eq!(json["count"], 1);

    // limit takes the head of the whole log, not of the range
    let (_, json) = send(&app, get(&format!("{}?from=2024-02-01&limit=1", Object::UserLogs.id_path(&id)))).await;
    assert_eq!(descriptions(&json), ["run"]);

    let (status, _) = send(&app, get(&format!("{}?limit=many", Object::UserLogs.id_path(&id)))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_log_limit_compose() {
    let (app, _dir) = setup_app(&["--log-limit", "compose"]).await;
    let id = seed_log(&app).await;

    let (_, json) = send(&app, get(&format!("{}?from=2024-01-10&limit=1", Object::UserLogs.id_path(&id)))).await;
    assert_eq!(descriptions(&json), ["swim"]);
    assert_eq!(json["count"], 1);
}

#[tokio::test]
async fn test_assets_fallback() {
    let (app, _dir) = setup_app(&[]).await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"<h1>Exercise tracker</h1>");
}
