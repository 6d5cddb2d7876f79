//! Handler tests for Products domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses
//!
//! They exercise only the products router, without the `/api/v1` prefix,
//! versioning middleware or docs added by the application.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use domain_products::*;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

fn setup() -> (Router, Arc<ProductStore>) {
    let store = Arc::new(ProductStore::without_expiry());
    let repository = InMemoryProductRepository::new(Arc::clone(&store));
    let app = handlers::router(ProductService::new(repository));
    (app, store)
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create_widget(app: &Router) -> ProductDto {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "Widget", "description": "", "price": 9.99 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_product_handler_returns_201_with_location() {
    let (app, store) = setup();

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "Widget", "description": "Blue", "price": 9.99 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();

    let product: ProductDto = json_body(response.into_body()).await;
    assert_eq!(product.name, "Widget");
    assert_eq!(product.description, "Blue");
    assert_eq!(product.price, Decimal::new(999, 2));
    assert_eq!(location, format!("/{}", product.id));
    assert!(store.exists(product.id).await);
}

#[tokio::test]
async fn test_create_product_handler_reports_every_violation() {
    let (app, store) = setup();

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "", "description": "", "price": -5 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(
        body["details"],
        json!([
            { "field": "name", "message": "Product name is required." },
            { "field": "price", "message": "Price must be greater than zero." }
        ])
    );
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_create_product_handler_rejects_malformed_json() {
    let (app, _) = setup();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_get_product_handler_returns_product() {
    let (app, _) = setup();
    let created = create_widget(&app).await;

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", created.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let fetched: ProductDto = json_body(response.into_body()).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_product_handler_missing_is_404() {
    let (app, _) = setup();

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", Uuid::new_v4())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_product_handler_rejects_bad_uuid() {
    let (app, _) = setup();

    let response = app
        .oneshot(empty_request("GET", "/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_UUID");
}

#[tokio::test]
async fn test_list_products_handler_returns_all() {
    let (app, _) = setup();
    create_widget(&app).await;
    create_widget(&app).await;

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<ProductDto> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 2);
}

#[tokio::test]
async fn test_update_product_handler_replaces_fields() {
    let (app, _) = setup();
    let created = create_widget(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({ "name": "Widget2", "description": "Bigger", "price": 19.99 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: ProductDto = json_body(response.into_body()).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Widget2");
    assert_eq!(updated.price, Decimal::new(1999, 2));
}

#[tokio::test]
async fn test_update_product_handler_missing_is_404() {
    let (app, _) = setup();

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", Uuid::new_v4()),
            json!({ "name": "Widget2", "price": 19.99 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_product_handler_validates_input() {
    let (app, store) = setup();
    let created = create_widget(&app).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({ "name": "x".repeat(101), "price": 0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["details"].as_array().unwrap().len(), 2);

    let stored = store.get(created.id).await.unwrap();
    assert_eq!(stored.name, "Widget");
}

#[tokio::test]
async fn test_update_product_handler_rejects_mismatched_body_id() {
    let (app, _) = setup();
    let created = create_widget(&app).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({ "id": Uuid::new_v4(), "name": "Widget2", "price": 19.99 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(
        body["details"],
        json!([{ "field": "id", "message": validation::ID_MISMATCH }])
    );
}

#[tokio::test]
async fn test_update_product_handler_accepts_matching_body_id() {
    let (app, _) = setup();
    let created = create_widget(&app).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({ "id": created.id, "name": "Widget2", "price": 19.99 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_product_handler_returns_204_then_404() {
    let (app, store) = setup();
    let created = create_widget(&app).await;
    let uri = format!("/{}", created.id);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!store.exists(created.id).await);

    let response = app.oneshot(empty_request("DELETE", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsupported_method_is_405() {
    let (app, _) = setup();

    let response = app
        .oneshot(empty_request("PATCH", &format!("/{}", Uuid::new_v4())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "METHOD_NOT_ALLOWED");
}
