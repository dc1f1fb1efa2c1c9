//! End-to-end tests for the catalog API against a seeded in-memory database.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

use catalog_api::auth::jwt::{sign_token, verify_token};
use catalog_api::{app, database, seed, AppState};

const SECRET: &str = "integration-secret";

/// Helper: build the app over a fresh, seeded in-memory store.
async fn test_app() -> Router {
    test_app_with_pool().await.0
}

/// Helper: same as [`test_app`], also handing back the pool for extra fixtures.
async fn test_app_with_pool() -> (Router, SqlitePool) {
    let pool = database::create_pool("sqlite::memory:").await.unwrap();
    database::create_schema(&pool).await.unwrap();
    seed::seed(&pool, 4).await.unwrap();
    let state = AppState::new(pool.clone(), SECRET, 4).unwrap();
    (app(state), pool)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

fn login_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        login_request(json!({ "username": seed::SEED_USERNAME, "password": seed::SEED_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

fn categories_of(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|p| p["data_category"].as_str().unwrap())
        .collect()
}

// -- Health -------------------------------------------------------------------

#[tokio::test]
async fn health_is_open() {
    let app = test_app().await;
    let (status, body) = send(&app, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".into()));
}

// -- Login --------------------------------------------------------------------

#[tokio::test]
async fn login_issues_verifiable_token() {
    let app = test_app().await;
    let token = login(&app).await;

    let claims = verify_token(&token, SECRET, Utc::now()).unwrap();
    assert_eq!(claims.sub, seed::SEED_USERNAME);
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        login_request(json!({ "username": "business", "password": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Invalid username or password" }));
    assert!(body.get("access_token").is_none());
}

#[tokio::test]
async fn unknown_user_is_indistinguishable_from_wrong_password() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        login_request(json!({ "username": "ghost", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Invalid username or password" }));
}

#[tokio::test]
async fn missing_or_empty_fields_are_bad_requests() {
    let app = test_app().await;
    for payload in [
        json!({ "username": "business" }),
        json!({ "password": "password123" }),
        json!({ "username": "", "password": "password123" }),
        json!({ "username": "business", "password": "" }),
        json!({}),
    ] {
        let (status, body) = send(&app, login_request(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Missing username or password" }));
    }
}

#[tokio::test]
async fn non_json_bodies_are_bad_requests() {
    let app = test_app().await;

    let no_content_type = Request::builder()
        .method("POST")
        .uri("/login")
        .body(Body::from(r#"{"username":"business","password":"password123"}"#))
        .unwrap();
    let (status, body) = send(&app, no_content_type).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing JSON in request" }));

    let broken = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = send(&app, broken).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// -- Token guard --------------------------------------------------------------

#[tokio::test]
async fn catalog_requires_a_token_regardless_of_query() {
    let app = test_app().await;
    for uri in [
        "/products",
        "/products?search=Demo",
        "/products?category=Geographic&search=geo",
        "/products/1",
        "/products/999",
        "/categories",
    ] {
        let (status, body) = send(&app, get(uri, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body, json!({ "error": "Missing or invalid token" }));
    }
}

#[tokio::test]
async fn invalid_tokens_are_rejected() {
    let app = test_app().await;
    let expired = sign_token("business", SECRET, Utc::now() - Duration::hours(2)).unwrap();
    let foreign = sign_token("business", "some-other-secret", Utc::now()).unwrap();

    for token in [expired.as_str(), foreign.as_str(), "garbage"] {
        let (status, _) = send(&app, get("/products", Some(token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    let token = login(&app).await;
    let wrong_scheme = Request::builder()
        .uri("/categories")
        .header(header::AUTHORIZATION, format!("Token {token}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, wrong_scheme).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// -- Products -----------------------------------------------------------------

#[tokio::test]
async fn list_without_filters_returns_whole_catalog_in_order() {
    let app = test_app().await;
    let token = login(&app).await;

    for uri in ["/products", "/products?search=&category="] {
        let (status, body) = send(&app, get(uri, Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            categories_of(&body),
            vec!["Firmographic", "Demographic", "Technographic", "Geographic", "Behavioral"]
        );
    }
}

#[tokio::test]
async fn search_is_case_insensitive_substring() {
    let app = test_app().await;
    let token = login(&app).await;

    for uri in ["/products?search=Demo", "/products?search=demo", "/products?search=DEMO"] {
        let (status, body) = send(&app, get(uri, Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(categories_of(&body), vec!["Demographic"]);
    }

    let (_, body) = send(&app, get("/products?search=GRAPHIC", Some(&token))).await;
    assert_eq!(
        categories_of(&body),
        vec!["Firmographic", "Demographic", "Technographic", "Geographic"]
    );
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
    let app = test_app().await;
    let token = login(&app).await;

    for uri in ["/products?search=%25", "/products?search=_"] {
        let (status, body) = send(&app, get(uri, Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}

#[tokio::test]
async fn category_filter_is_exact() {
    let app = test_app().await;
    let token = login(&app).await;

    let (status, body) = send(&app, get("/products?category=Geographic", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["record_count"], json!(12000));
    assert_eq!(products[0]["fields"], json!(["Country", "City", "Region", "Postal code"]));

    let (status, body) = send(&app, get("/products?category=geographic", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn filters_combine_conjunctively() {
    let app = test_app().await;
    let token = login(&app).await;

    let (_, body) = send(&app, get("/products?search=Demo&category=Geographic", Some(&token))).await;
    assert_eq!(body, json!([]));

    let (_, body) = send(&app, get("/products?search=geo&category=Geographic", Some(&token))).await;
    assert_eq!(categories_of(&body), vec!["Geographic"]);
}

#[tokio::test]
async fn get_product_returns_split_fields() {
    let app = test_app().await;
    let token = login(&app).await;

    let (status, body) = send(&app, get("/products/1", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": 1,
            "data_category": "Firmographic",
            "record_count": 5250,
            "fields": ["Company name", "Company address", "Website"],
        })
    );
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let app = test_app().await;
    let token = login(&app).await;

    for uri in ["/products/999", "/products/0", "/products/abc"] {
        let (status, body) = send(&app, get(uri, Some(&token))).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({ "error": "Product not found" }));
    }
}

// -- Categories ---------------------------------------------------------------

#[tokio::test]
async fn categories_are_distinct_and_complete() {
    let app = test_app().await;
    let token = login(&app).await;

    let (status, body) = send(&app, get("/categories", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!(["Firmographic", "Demographic", "Technographic", "Geographic", "Behavioral"])
    );
}

#[tokio::test]
async fn categories_collapse_repeated_values() {
    let (app, pool) = test_app_with_pool().await;
    sqlx::query("INSERT INTO products (data_category, record_count, fields) VALUES (?, ?, ?)")
        .bind("Geographic")
        .bind(400_i64)
        .bind("Country,Timezone")
        .execute(&pool)
        .await
        .unwrap();
    let token = login(&app).await;

    let (_, body) = send(&app, get("/products?category=Geographic", Some(&token))).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = send(&app, get("/categories", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!(["Firmographic", "Demographic", "Technographic", "Geographic", "Behavioral"])
    );
}
