//! Router tests for the versioned catalog API.
//!
//! Every request goes through the full router (version resolver, handlers,
//! views, error envelope) over the in-memory store, via `oneshot`.

#![allow(clippy::panic, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use catalog_gateway::api;
use catalog_gateway::app_state::AppState;
use catalog_gateway::domain::NotificationChannel;
use catalog_gateway::notify::{Notifiers, RecordingNotifier};
use catalog_gateway::persistence::InMemoryCatalogStore;

const HOST: &str = "catalog.test";
const SHAWN: &str = "fd1574eb-920b-4677-b7e0-4768a5e504c0";
const PETER: &str = "c943dc0a-98bb-47b4-9d1d-056b95d3f064";

struct Harness {
    app: Router,
    store: InMemoryCatalogStore,
    email: RecordingNotifier,
}

fn harness() -> Harness {
    let store = InMemoryCatalogStore::demo();
    let email = RecordingNotifier::new(NotificationChannel::Email);
    let notifiers = Notifiers::none().with(Arc::new(email.clone()));
    let app = api::build_router().with_state(AppState::from_store(store.clone(), notifiers));
    Harness { app, store, email }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, HOST);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let Ok(request) = builder.body(body) else {
        panic!("invalid request");
    };
    let Ok(response) = app.clone().oneshot(request).await else {
        panic!("request failed");
    };

    let status = response.status();
    let Ok(collected) = response.into_body().collect().await else {
        panic!("body read failed");
    };
    let bytes = collected.to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        let Ok(value) = serde_json::from_slice(&bytes) else {
            panic!("non-JSON body: {}", String::from_utf8_lossy(&bytes));
        };
        value
    };
    (status, value)
}

async fn create(app: &Router, name: &str, stock: u32, seller: &str) -> Value {
    let body = json!({ "name": name, "brand": "Acme", "stock": stock, "seller": seller });
    let (status, product) = send(app, Method::POST, "/api/v1/product", Some(body)).await;
    assert_eq!(status, StatusCode::OK, "create failed: {product}");
    product
}

fn uuid_of(product: &Value) -> String {
    let Some(uuid) = product.get("uuid").and_then(Value::as_str) else {
        panic!("product without uuid: {product}");
    };
    uuid.to_string()
}

#[tokio::test]
async fn health_is_served_outside_versions() {
    let h = harness();
    let (status, body) = send(&h.app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn v1_lists_seeded_sellers() {
    let h = harness();
    let (status, body) = send(&h.app, Method::GET, "/api/v1/sellers", None).await;
    assert_eq!(status, StatusCode::OK);
    let Some(sellers) = body.as_array() else {
        panic!("expected array: {body}");
    };
    assert_eq!(sellers.len(), 3);
    assert_eq!(sellers[0]["uuid"], SHAWN);
    assert!(sellers[0].get("id").is_none());
}

#[tokio::test]
async fn unknown_routes_use_error_envelope() {
    let h = harness();
    for uri in ["/api/v3/products", "/api/v2/sellers", "/api/v1/sellers/top10", "/nowhere"] {
        let (status, body) = send(&h.app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({ "error": "invalid path requested" }), "{uri}");
    }
}

#[tokio::test]
async fn create_returns_storage_assigned_uuid() {
    let h = harness();
    let product = create(&h.app, "Lamp", 10, SHAWN).await;
    let uuid = uuid_of(&product);
    assert!(uuid::Uuid::parse_str(&uuid).is_ok());
    assert_eq!(product["seller_uuid"], SHAWN);
    assert_eq!(product["stock"], 10);

    let (status, fetched) = send(&h.app, Method::GET, &format!("/api/v1/product?id={uuid}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, product);
}

#[tokio::test]
async fn create_with_unknown_seller_is_rejected() {
    let h = harness();
    let body = json!({
        "name": "Lamp",
        "brand": "Acme",
        "stock": 1,
        "seller": "00000000-0000-0000-0000-000000000001",
    });
    let (status, error) = send(&h.app, Method::POST, "/api/v1/product", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error, json!({ "error": "Seller is not found" }));
    assert_eq!(h.store.product_count().await, 0);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let h = harness();
    let body = json!({ "name": "Lamp", "brand": "Acme", "stock": "lots", "seller": SHAWN });
    let (status, error) = send(&h.app, Method::POST, "/api/v2/product", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].is_string());
}

#[tokio::test]
async fn missing_or_malformed_id_is_bad_request() {
    let h = harness();
    for uri in ["/api/v1/product", "/api/v1/product?id=", "/api/v2/product?id=nope"] {
        let (status, error) = send(&h.app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(error["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn unknown_product_is_bad_request() {
    let h = harness();
    let uri = "/api/v1/product?id=00000000-0000-0000-0000-00000000abcd";
    for method in [Method::GET, Method::DELETE] {
        let (status, error) = send(&h.app, method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error, json!({ "error": "Product is not found" }));
    }

    let update = json!({ "name": "Lamp", "brand": "Acme", "stock": 1 });
    let (status, error) = send(&h.app, Method::PUT, uri, Some(update)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error, json!({ "error": "Product is not found" }));
}

#[tokio::test]
async fn invalid_pages_are_bad_request() {
    let h = harness();
    for uri in ["/api/v1/products?page=0", "/api/v1/products?page=abc", "/api/v1/products?page=-2"] {
        let (status, error) = send(&h.app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(error["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn list_pages_by_ten_in_insertion_order() {
    let h = harness();
    for n in 0..12 {
        create(&h.app, &format!("item-{n:02}"), n, SHAWN).await;
    }

    let (status, first) = send(&h.app, Method::GET, "/api/v1/products", None).await;
    assert_eq!(status, StatusCode::OK);
    let Some(first) = first.as_array() else {
        panic!("expected array");
    };
    assert_eq!(first.len(), 10);
    assert_eq!(first[0]["name"], "item-00");

    let (_, second) = send(&h.app, Method::GET, "/api/v1/products?page=2", None).await;
    let Some(second) = second.as_array() else {
        panic!("expected array");
    };
    let names: Vec<&str> = second.iter().filter_map(|p| p["name"].as_str()).collect();
    assert_eq!(names, ["item-10", "item-11"]);

    let (status, empty) = send(&h.app, Method::GET, "/api/v1/products?page=9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty, json!([]));
}

#[tokio::test]
async fn v2_list_embeds_seller_links() {
    let h = harness();
    create(&h.app, "Lamp", 3, PETER).await;

    let (status, body) = send(&h.app, Method::GET, "/api/v2/products?page=1", None).await;
    assert_eq!(status, StatusCode::OK);
    let Some([product]) = body.as_array().map(Vec::as_slice) else {
        panic!("expected one product: {body}");
    };
    assert!(product.get("seller_uuid").is_none());
    assert_eq!(product["seller"]["uuid"], PETER);
    assert_eq!(
        product["seller"]["_links"]["self"]["href"],
        format!("{HOST}/sellers/{PETER}")
    );
}

#[tokio::test]
async fn update_with_same_stock_sends_no_alert() {
    let h = harness();
    let product = create(&h.app, "Lamp", 4, SHAWN).await;
    let uri = format!("/api/v1/product?id={}", uuid_of(&product));

    let update = json!({ "name": "Desk lamp", "brand": "Acme", "stock": 4 });
    let (status, updated) = send(&h.app, Method::PUT, &uri, Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Desk lamp");
    assert_eq!(h.email.count().await, 0);
}

#[tokio::test]
async fn delete_returns_empty_object() {
    let h = harness();
    let product = create(&h.app, "Lamp", 1, SHAWN).await;
    let uri = format!("/api/v2/product?id={}", uuid_of(&product));

    let (status, body) = send(&h.app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
    assert_eq!(h.store.product_count().await, 0);

    let (status, _) = send(&h.app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn top10_ranks_by_product_count() {
    let h = harness();
    create(&h.app, "a", 1, PETER).await;
    create(&h.app, "b", 1, PETER).await;
    create(&h.app, "c", 1, SHAWN).await;

    let (status, body) = send(&h.app, Method::GET, "/api/v2/sellers/top10", None).await;
    assert_eq!(status, StatusCode::OK);
    let Some(sellers) = body.as_array() else {
        panic!("expected array");
    };
    let ranked: Vec<&str> = sellers.iter().filter_map(|s| s["uuid"].as_str()).collect();
    // The third seeded seller owns nothing and is left out.
    assert_eq!(ranked, [PETER, SHAWN]);
}

#[tokio::test]
async fn stock_beyond_storage_range_is_bad_request() {
    let h = harness();
    let body = json!({ "name": "Lamp", "brand": "Acme", "stock": 3_000_000_000_u64, "seller": SHAWN });
    let (status, error) = send(&h.app, Method::POST, "/api/v1/product", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].as_str().is_some_and(|m| m.contains("stock")), "{error}");
    assert_eq!(h.store.product_count().await, 0);

    let product = create(&h.app, "Lamp", 5, SHAWN).await;
    let uri = format!("/api/v2/product?id={}", uuid_of(&product));
    let update = json!({ "name": "Lamp", "brand": "Acme", "stock": 3_000_000_000_u64 });
    let (status, error) = send(&h.app, Method::PUT, &uri, Some(update)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].as_str().is_some_and(|m| m.contains("stock")), "{error}");

    let (_, stored) = send(&h.app, Method::GET, &uri, None).await;
    assert_eq!(stored["stock"], 5);
    assert_eq!(h.email.count().await, 0);
}

#[tokio::test]
async fn stock_at_storage_limit_is_accepted() {
    let h = harness();
    let product = create(&h.app, "Warehouse", 2_147_483_647, PETER).await;
    assert_eq!(product["stock"], 2_147_483_647_u32);
}

#[tokio::test]
async fn unsupported_method_uses_error_envelope() {
    let h = harness();
    for uri in ["/api/v1/product", "/api/v2/products", "/health"] {
        let (status, body) = send(&h.app, Method::PATCH, uri, None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{uri}");
        assert_eq!(body, json!({ "error": "method not allowed" }), "{uri}");
    }
}
