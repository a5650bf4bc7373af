//! API integration tests

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use tower::ServiceExt;

use books_server::{
    api,
    config::{AppConfig, DatabaseConfig},
    repository, AppState,
};

/// In-memory pool pinned to one connection so the database outlives each query
async fn memory_pool() -> Pool<Sqlite> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database")
}

async fn app_with_pool(pool: Pool<Sqlite>) -> Router {
    let state = AppState::initialize(AppConfig::default(), pool)
        .await
        .expect("Failed to initialize state");
    api::create_router(state).expect("Failed to build router")
}

async fn app() -> Router {
    app_with_pool(memory_pool().await).await
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, value)
}

fn dune() -> Value {
    json!({"title": "Dune", "author": "Herbert", "year": 1965, "genre": "SciFi"})
}

#[tokio::test]
async fn test_health_check() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_book_lifecycle() {
    let app = app().await;

    let (status, created) = send(&app, Method::POST, "/books", Some(dune())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        created,
        json!({"id": 1, "title": "Dune", "author": "Herbert", "year": 1965, "genre": "SciFi"})
    );

    let (status, fetched) = send(&app, Method::GET, "/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, body) = send(&app, Method::DELETE, "/books/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, "/books/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Book with id 1 not found");
}

#[tokio::test]
async fn test_optional_fields_are_null() {
    let app = app().await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"title": "Emma", "author": "Austen"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["year"].is_null());
    assert!(created["genre"].is_null());
}

#[tokio::test]
async fn test_update_is_full_replacement() {
    let app = app().await;
    send(&app, Method::POST, "/books", Some(dune())).await;

    let replacement = json!({"title": "Dune Messiah", "author": "Frank Herbert"});
    let (status, updated) = send(&app, Method::PUT, "/books/1", Some(replacement)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({"id": 1, "title": "Dune Messiah", "author": "Frank Herbert", "year": null, "genre": null})
    );

    let (_, fetched) = send(&app, Method::GET, "/books/1", None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_missing_book_is_not_found_everywhere() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/books/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchBook");

    let (status, _) = send(&app, Method::PUT, "/books/42", Some(dune())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/books/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, books) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(books, json!([]));
}

#[tokio::test]
async fn test_list_counts_creates_minus_deletes() {
    let app = app().await;

    for i in 0..5 {
        let book = json!({"title": format!("Volume {}", i), "author": "Anon"});
        let (status, _) = send(&app, Method::POST, "/books", Some(book)).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    for id in [2, 4] {
        let (status, _) = send(&app, Method::DELETE, &format!("/books/{}", id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    let (status, books) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = books
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3, 5]);
}

#[tokio::test]
async fn test_invalid_payloads_never_reach_storage() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"title": "", "author": "X"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "BadValue");
    assert!(body["details"]["title"].is_array());

    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"title": "X", "author": "Y", "year": 50})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["details"]["year"].is_array());

    let (status, _) = send(&app, Method::POST, "/books", Some(json!({"title": "X"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let long_genre = "g".repeat(51);
    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"title": "X", "author": "Y", "genre": long_genre})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["details"]["genre"].is_array());

    // Nothing was inserted, so the first accepted book still gets id 1
    let (_, books) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(books, json!([]));
    let (_, created) = send(&app, Method::POST, "/books", Some(dune())).await;
    assert_eq!(created["id"], 1);
}

#[tokio::test]
async fn test_invalid_update_leaves_book_untouched() {
    let app = app().await;
    let (_, created) = send(&app, Method::POST, "/books", Some(dune())).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/books/1",
        Some(json!({"title": "Dune", "author": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, fetched) = send(&app, Method::GET, "/books/1", None).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_malformed_requests_are_structured_errors() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/books/abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "BadValue");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/books")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_storage_failure_is_generic_500() {
    let pool = memory_pool().await;
    let app = app_with_pool(pool.clone()).await;
    pool.close().await;

    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Database error");

    let (status, _) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_cors_allows_configured_origin_with_credentials() {
    let app = app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/books/1")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "DELETE");
}

#[tokio::test]
async fn test_books_survive_restart() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("books.db").display()),
        ..DatabaseConfig::default()
    };

    let pool = repository::connect(&config).await.expect("Failed to open database");
    let app = app_with_pool(pool.clone()).await;
    let (status, created) = send(&app, Method::POST, "/books", Some(dune())).await;
    assert_eq!(status, StatusCode::CREATED);
    pool.close().await;

    let pool = repository::connect(&config).await.expect("Failed to reopen database");
    let app = app_with_pool(pool).await;
    let (status, fetched) = send(&app, Method::GET, "/books/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}
