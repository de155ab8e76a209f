#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fleetdesk_api::types::{CompleteTripData, OrderStatus, PageParams, TruckFormData};
use fleetdesk_api::{
    ApiClient, Error, LoginCredentials, MemoryTokenStore, TokenStore, TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup_with(tokens: MemoryTokenStore) -> (MockServer, ApiClient, Arc<MemoryTokenStore>) {
    let server = MockServer::start().await;
    let tokens = Arc::new(tokens);
    let client = ApiClient::with_client(
        reqwest::Client::new(),
        &format!("{}/api", server.uri()),
        tokens.clone(),
    )
    .unwrap();
    (server, client, tokens)
}

async fn setup() -> (MockServer, ApiClient) {
    let (server, client, _) = setup_with(MemoryTokenStore::with_token("tok-123")).await;
    (server, client)
}

fn truck_json(id: &str, width: serde_json::Value) -> serde_json::Value {
    json!({
        "_id": id,
        "plateNumber": "AB-123-CD",
        "vinCode": "VIN0001",
        "registrationCertificate": "RC-1",
        "driverName": "Sam Doe",
        "width": width,
        "height": "2.6",
        "length": "13.6",
        "maxWeight": "24000",
        "maxPallets": 33,
        "isActive": true
    })
}

// ── Auth header ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_token_is_sent_when_stored() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "email": "ops@example.com",
            "firstName": "Ops",
            "lastName": "Lead",
            "role": "admin"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = client.get_profile().await.unwrap();
    assert_eq!(user.full_name(), "Ops Lead");
}

#[tokio::test]
async fn test_no_auth_header_without_token() {
    let (server, client, _) = setup_with(MemoryTokenStore::new()).await;

    Mock::given(method("GET"))
        .and(path("/api/addresses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "addresses": [], "total": 0, "page": 1, "pageSize": 10
        })))
        .mount(&server)
        .await;

    client.get_all_addresses(None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_token_is_read_per_request() {
    let (server, client, tokens) = setup_with(MemoryTokenStore::new()).await;

    Mock::given(method("DELETE"))
        .and(path("/api/trips/t1"))
        .and(header("authorization", "Bearer late"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    tokens
        .save(&secrecy::SecretString::from("late".to_owned()))
        .unwrap();
    client.delete_trip("t1").await.unwrap();
}

#[tokio::test]
async fn test_login_posts_credentials() {
    let (server, client, _) = setup_with(MemoryTokenStore::new()).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "ops@example.com", "password": "s3cret" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access_token": "jwt",
            "user": { "id": "u1", "email": "ops@example.com", "firstName": "O", "lastName": "L", "role": "admin" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client
        .login(&LoginCredentials::new("ops@example.com", "s3cret"))
        .await
        .unwrap();
    assert_eq!(resp.access_token, "jwt");
    assert_eq!(resp.user.unwrap().id, "u1");
}

// ── Pagination ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_orders_page_query_and_counters() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .and(query_param("page", "2"))
        .and(query_param("pageSize", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orders": [{
                "_id": "o1",
                "cargoWeight": "1200",
                "remainingCargo": "0",
                "status": "in_progress",
                "destination": "a1",
                "pallets": [],
                "trips": ["t1"]
            }],
            "total": 17,
            "page": 2,
            "pageSize": 5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client
        .get_all_orders(Some(&PageParams::new(2, 5)))
        .await
        .unwrap();
    assert_eq!(page.total, 17);
    assert_eq!(page.page, 2);
    assert_eq!(page.page_size, 5);
    assert_eq!(page.orders[0].status, OrderStatus::InProgress);
}

#[tokio::test]
async fn test_list_without_params_has_no_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/trucks"))
        .and(query_param_is_missing("page"))
        .and(query_param_is_missing("pageSize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "trucks": [truck_json("t1", json!(2.45))],
            "total": 1,
            "page": 1,
            "pageSize": 10
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client.get_all_trucks(None).await.unwrap();
    assert_eq!(page.trucks[0].width.as_str(), "2.45");
}

// ── Payloads ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_truck_sends_dimensions_unchanged() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/trucks"))
        .and(body_json(json!({
            "plateNumber": "AB-123-CD",
            "vinCode": "VIN0001",
            "registrationCertificate": "RC-1",
            "driverName": "Sam Doe",
            "width": "12.5",
            "height": "2.6",
            "length": "13.6",
            "maxWeight": "24000"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(truck_json("t9", json!("12.5"))))
        .expect(1)
        .mount(&server)
        .await;

    let form = TruckFormData {
        plate_number: "AB-123-CD".into(),
        vin_code: "VIN0001".into(),
        registration_certificate: "RC-1".into(),
        driver_name: "Sam Doe".into(),
        width: "12.5".into(),
        height: "2.6".into(),
        length: "13.6".into(),
        max_weight: "24000".into(),
        ..TruckFormData::default()
    };
    let truck = client.create_truck(&form).await.unwrap();
    assert_eq!(truck.width.as_str(), "12.5");
}

#[tokio::test]
async fn test_complete_trip_body_is_exact() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/trips/trip-1/complete"))
        .and(body_json(json!({ "actualFuel": "40", "actualDuration": "3h" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "trip-1",
            "orderId": "o1",
            "tripNumber": "TR-0001",
            "status": "done",
            "pallets": ["p1"],
            "estimatedFuel": "38",
            "estimatedDuration": "2h",
            "actualFuel": "40",
            "actualDuration": "3h"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let trip = client
        .complete_trip(
            "trip-1",
            &CompleteTripData {
                actual_fuel: "40".into(),
                actual_duration: "3h".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(trip.actual_duration.unwrap().as_str(), "3h");
}

#[tokio::test]
async fn test_cancel_order_uses_patch() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/orders/o1/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "o1",
            "status": "cancelled"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let order = client.cancel_order("o1").await.unwrap();
    assert_eq!(order.status, OrderStatus::Cancelled);
}

#[tokio::test]
async fn test_available_trucks_for_order() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/o7/available-trucks"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([truck_json("t1", json!("2.4"))])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let trucks = client.get_available_trucks_for_order("o7").await.unwrap();
    assert_eq!(trucks.len(), 1);
    assert_eq!(trucks[0].plate_number, "AB-123-CD");
}

// ── Errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_carries_server_message() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/addresses/a1"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({ "message": "Address is used by an order" })),
        )
        .mount(&server)
        .await;

    let err = client.delete_address("a1").await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert_eq!(err.server_message(), Some("Address is used by an order"));
}

#[tokio::test]
async fn test_timeout_reports_configured_seconds() {
    let server = MockServer::start().await;
    let transport = TransportConfig {
        timeout: Duration::from_secs(1),
        ..TransportConfig::default()
    };
    let client = ApiClient::new(
        &format!("{}/api", server.uri()),
        &transport,
        Arc::new(MemoryTokenStore::new()),
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/trucks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "trucks": [], "total": 0 }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = client.get_all_trucks(None).await.unwrap_err();
    assert!(
        matches!(err, Error::Timeout { timeout_secs: 1 }),
        "expected a 1s timeout, got: {err:?}"
    );
}

#[tokio::test]
async fn test_unauthorized_is_returned_not_intercepted() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Unauthorized" })),
        )
        .mount(&server)
        .await;

    let err = client.get_profile().await.unwrap_err();
    assert!(err.is_unauthorized(), "expected 401, got: {err:?}");
}

#[tokio::test]
async fn test_malformed_body_is_a_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/addresses/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.get_address_by_id("a1").await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

// ── Base URL ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_set_base_url_redirects_later_requests() {
    let (first, client) = setup().await;
    let second = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/orders/o1/trips"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&second)
        .await;

    client
        .set_base_url(&format!("{}/v2", second.uri()))
        .unwrap();
    let trips = client.get_order_trips("o1").await.unwrap();
    assert!(trips.is_empty());
    assert!(first.received_requests().await.unwrap().is_empty());
}
