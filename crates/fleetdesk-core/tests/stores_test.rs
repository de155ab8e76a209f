#![allow(clippy::unwrap_used)]
// Store behaviour against a mocked backend.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio::sync::broadcast;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fleetdesk_api::{ApiClient, MemoryTokenStore};
use fleetdesk_core::types::{
    AddressFormData, CompleteTripData, CreateOrderTripData, OrderStatus, TruckFormData,
    UpdateOrderTripData,
};
use fleetdesk_core::validation::Validate;
use fleetdesk_core::{Confirm, ConfirmPrompt, Console, Notification, Pagination, Severity};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Console, broadcast::Receiver<Notification>) {
    let server = MockServer::start().await;
    let api = ApiClient::with_client(
        reqwest::Client::new(),
        &format!("{}/api", server.uri()),
        Arc::new(MemoryTokenStore::with_token("tok")),
    )
    .unwrap();
    let console = Console::new(api);
    let rx = console.notifications().subscribe();
    (server, console, rx)
}

fn drain(rx: &mut broadcast::Receiver<Notification>) -> Vec<(Severity, String)> {
    std::iter::from_fn(|| rx.try_recv().ok())
        .map(|n| (n.severity, n.summary))
        .collect()
}

fn address(id: &str) -> Value {
    json!({
        "_id": id,
        "addressLine1": "1 Quay St",
        "city": "Cork",
        "state": "Munster",
        "country": "IE",
        "postcode": "T12"
    })
}

fn address_page(ids: &[&str], total: u64, page: u32, page_size: u32) -> Value {
    json!({
        "addresses": ids.iter().map(|id| address(id)).collect::<Vec<_>>(),
        "total": total,
        "page": page,
        "pageSize": page_size
    })
}

fn address_form() -> AddressFormData {
    AddressFormData {
        address_line1: "1 Quay St".into(),
        city: "Cork".into(),
        state: "Munster".into(),
        country: "IE".into(),
        postcode: "T12".into(),
        ..AddressFormData::default()
    }
}

fn trip(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "orderId": "o1",
        "tripNumber": "TR-1",
        "status": status,
        "pallets": [],
        "estimatedFuel": "30",
        "estimatedDuration": "2h"
    })
}

fn trip_page(ids: &[&str], total: u64) -> Value {
    json!({
        "trips": ids.iter().map(|id| trip(id, "planned")).collect::<Vec<_>>(),
        "total": total,
        "page": 1,
        "pageSize": 10
    })
}

async fn mount_addresses(server: &MockServer, page: u32, body: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path("/api/addresses"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

// ── Pagination ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_mount_fetches_once_and_page_change_refetches_once() {
    let (server, console, _rx) = setup().await;
    let store = console.addresses();

    mount_addresses(&server, 1, address_page(&["a1"], 11, 1, 10), 1).await;
    mount_addresses(&server, 2, address_page(&["a2"], 11, 2, 10), 1).await;

    store.mount().await;
    assert_eq!(store.list().snapshot().items[0].id, "a1");

    store.set_page(2).await;
    store.set_page(2).await; // unchanged: no request
    let snap = store.list().snapshot();
    assert_eq!(snap.items[0].id, "a2");
    assert_eq!((snap.total, snap.page), (11, 2));
    assert!(!store.list().is_loading());
}

#[tokio::test]
async fn test_orders_page_two_of_five_updates_total() {
    let (server, console, _rx) = setup().await;
    let store = console.orders();

    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .and(query_param("page", "2"))
        .and(query_param("pageSize", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orders": [{ "_id": "o6", "status": "new", "cargoWeight": "100" }],
            "total": 17,
            "page": 2,
            "pageSize": 5
        })))
        .expect(1)
        .mount(&server)
        .await;

    store.set_pagination(Some(2), Some(5)).await;

    let snap = store.list().snapshot();
    assert_eq!(snap.total, 17);
    assert_eq!((snap.page, snap.page_size), (2, 5));
    assert_eq!(snap.items[0].status, OrderStatus::New);
}

#[tokio::test]
async fn test_echoed_counters_do_not_refetch() {
    let (server, console, _rx) = setup().await;
    let store = console.addresses();

    // The server clamps the requested page size to 50.
    Mock::given(method("GET"))
        .and(path("/api/addresses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(address_page(&[], 0, 1, 50)))
        .expect(1)
        .mount(&server)
        .await;

    store.set_page_size(500).await;
    assert_eq!(store.list().snapshot().page_size, 50);
}

// ── CRUD mutations ──────────────────────────────────────────────────

#[tokio::test]
async fn test_add_success_notifies_refetches_and_closes_form() {
    let (server, console, mut rx) = setup().await;
    let store = console.addresses();

    Mock::given(method("POST"))
        .and(path("/api/addresses"))
        .respond_with(ResponseTemplate::new(201).set_body_json(address("a9")))
        .expect(1)
        .mount(&server)
        .await;
    mount_addresses(&server, 1, address_page(&["a9"], 1, 1, 10), 1).await;

    store.open_modal(None);
    assert!(store.submit_form(&address_form()).await);

    assert!(!store.form().is_shown());
    assert!(store.form().edited().is_none());
    assert_eq!(store.list().snapshot().items[0].id, "a9");
    assert_eq!(
        drain(&mut rx),
        vec![(Severity::Success, "Address created successfully".to_owned())]
    );
}

#[tokio::test]
async fn test_edit_failure_keeps_form_and_shows_server_message() {
    let (server, console, mut rx) = setup().await;
    let store = console.addresses();

    Mock::given(method("PUT"))
        .and(path("/api/addresses/a1"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "postcode is invalid" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let existing = serde_json::from_value(address("a1")).unwrap();
    store.open_modal(Some(existing));
    assert!(!store.submit_form(&address_form()).await);

    assert!(store.form().is_shown());
    assert_eq!(store.form().edited().unwrap().id, "a1");
    assert!(!store.list().is_mutating());
    assert_eq!(
        drain(&mut rx),
        vec![(Severity::Error, "postcode is invalid".to_owned())]
    );
}

#[tokio::test]
async fn test_add_failure_keeps_form_and_edited_reference() {
    let (server, console, mut rx) = setup().await;
    let store = console.addresses();

    Mock::given(method("POST"))
        .and(path("/api/addresses"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_addresses(&server, 1, address_page(&[], 0, 1, 10), 0).await;

    let existing = serde_json::from_value(address("a1")).unwrap();
    store.open_modal(Some(existing));
    assert!(!store.add(&address_form()).await);

    assert!(store.form().is_shown());
    assert_eq!(store.form().edited().unwrap().id, "a1");
    assert!(!store.list().is_mutating());
    assert_eq!(
        drain(&mut rx),
        vec![(Severity::Error, "Failed to save address".to_owned())]
    );
}

#[tokio::test]
async fn test_edit_without_edited_entity_sends_nothing() {
    let (server, console, mut rx) = setup().await;

    assert!(!console.trucks().edit(&TruckFormData::default()).await);
    assert!(server.received_requests().await.unwrap().is_empty());
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_remove_failure_falls_back_to_translated_message() {
    let (server, console, mut rx) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/trucks/t1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    assert!(!console.trucks().remove("t1").await);
    assert_eq!(
        drain(&mut rx),
        vec![(Severity::Error, "Failed to delete truck".to_owned())]
    );
}

#[tokio::test]
async fn test_truck_width_is_validated_and_sent_unchanged() {
    let (server, console, _rx) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/trucks"))
        .and(body_json(json!({
            "plateNumber": "AB-1",
            "vinCode": "VIN",
            "registrationCertificate": "RC",
            "driverName": "Sam",
            "width": "12.5",
            "height": "2.6",
            "length": "13.6",
            "maxWeight": "24000"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "t1", "plateNumber": "AB-1", "width": "12.5"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/trucks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "trucks": [], "total": 0, "page": 1, "pageSize": 10
        })))
        .mount(&server)
        .await;

    let form = TruckFormData {
        plate_number: "AB-1".into(),
        vin_code: "VIN".into(),
        registration_certificate: "RC".into(),
        driver_name: "Sam".into(),
        width: "12.5".into(),
        height: "2.6".into(),
        length: "13.6".into(),
        max_weight: "24000".into(),
        ..TruckFormData::default()
    };
    assert!(form.validate().is_ok());
    assert!(console.trucks().add(&form).await);
}

// ── List failures ───────────────────────────────────────────────────

#[tokio::test]
async fn test_address_fetch_failure_keeps_last_known_list() {
    let (server, console, mut rx) = setup().await;
    let store = console.addresses();

    mount_addresses(&server, 1, address_page(&["a1", "a2"], 2, 1, 10), 1).await;
    Mock::given(method("GET"))
        .and(path("/api/addresses"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    store.mount().await;
    store.set_page(2).await;

    assert_eq!(store.list().snapshot().items.len(), 2);
    assert_eq!(
        drain(&mut rx),
        vec![(Severity::Error, "Failed to load addresses".to_owned())]
    );
}

#[tokio::test]
async fn test_trip_fetch_failure_resets_list() {
    let (server, console, _rx) = setup().await;
    let store = console.trips();

    Mock::given(method("GET"))
        .and(path("/api/trips"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(trip_page(&["t1"], 1)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/trips"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    store.mount().await;
    assert_eq!(store.list().snapshot().items.len(), 1);

    store.set_page(2).await;
    assert!(store.list().snapshot().items.is_empty());
}

// ── Orders ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_cancel_order_failure_rethrows_after_notifying() {
    let (server, console, mut rx) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/orders/o1/cancel"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "Order already done" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = console.orders().cancel("o1").await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert_eq!(
        drain(&mut rx),
        vec![(Severity::Error, "Order already done".to_owned())]
    );
}

#[tokio::test]
async fn test_cancel_order_success_refetches() {
    let (server, console, mut rx) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/orders/o1/cancel"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "_id": "o1", "status": "cancelled" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orders": [{ "_id": "o1", "status": "cancelled" }],
            "total": 1, "page": 1, "pageSize": 10
        })))
        .expect(1)
        .mount(&server)
        .await;

    console.orders().cancel("o1").await.unwrap();
    assert_eq!(
        console.orders().list().snapshot().items[0].status,
        OrderStatus::Cancelled
    );
    assert_eq!(
        drain(&mut rx),
        vec![(Severity::Success, "Order cancelled successfully".to_owned())]
    );
}

#[tokio::test]
async fn test_create_order_refetches_and_returns_new_id() {
    let (server, console, _rx) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "_id": "o42", "status": "draft" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orders": [{ "_id": "o42", "status": "draft" }],
            "total": 1, "page": 1, "pageSize": 10
        })))
        .expect(1)
        .mount(&server)
        .await;

    let form = fleetdesk_core::types::OrderFormData {
        cargo_weight: "1200".into(),
        destination: "a1".into(),
        ..Default::default()
    };
    assert_eq!(console.orders().create(&form).await.as_deref(), Some("o42"));
    assert_eq!(console.orders().list().snapshot().items[0].id, "o42");
}

// ── Trips ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_complete_trip_sends_exact_body_then_refetches() {
    let (server, console, _rx) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/trips/t1/complete"))
        .and(body_json(json!({ "actualFuel": "40", "actualDuration": "3h" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(trip("t1", "done")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/trips"))
        .respond_with(ResponseTemplate::new(200).set_body_json(trip_page(&["t1"], 1)))
        .expect(1)
        .mount(&server)
        .await;

    console
        .trips()
        .complete_trip(
            "t1",
            &CompleteTripData {
                actual_fuel: "40".into(),
                actual_duration: "3h".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(console.trips().list().snapshot().total, 1);
}

fn trip_form() -> CreateOrderTripData {
    CreateOrderTripData {
        truck_id: "k1".into(),
        start_date: "2024-06-01T08:00:00Z".parse().unwrap(),
        pallets: vec!["p1".into()],
        estimated_fuel: "30".into(),
        estimated_duration: "2h".into(),
        notes: None,
    }
}

#[tokio::test]
async fn test_create_trip_refetches_order_trips() {
    let (server, console, mut rx) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/orders/o1/trips"))
        .respond_with(ResponseTemplate::new(201).set_body_json(trip("t2", "planned")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders/o1/trips"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([trip("t1", "planned"), trip("t2", "planned")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = console.trips();
    let created = store.create_trip("o1", &trip_form()).await.unwrap();
    assert_eq!(created.id, "t2");

    let ids: Vec<_> = store.order_trips().iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids, vec!["t1", "t2"]);
    assert_eq!(
        drain(&mut rx),
        vec![(Severity::Success, "Trip created successfully".to_owned())]
    );
}

#[tokio::test]
async fn test_create_trip_failure_leaves_order_trips_alone() {
    let (server, console, mut rx) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/orders/o1/trips"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "truck is full" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders/o1/trips"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = console.trips().create_trip("o1", &trip_form()).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(
        drain(&mut rx),
        vec![(Severity::Error, "truck is full".to_owned())]
    );
}

#[tokio::test]
async fn test_update_trip_refetches_its_order_trips() {
    let (server, console, _rx) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/trips/t1"))
        .and(body_json(json!({ "truckId": "k2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(trip("t1", "planned")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders/o1/trips"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([trip("t1", "planned")])))
        .expect(1)
        .mount(&server)
        .await;

    let data = UpdateOrderTripData {
        truck_id: Some("k2".into()),
        ..UpdateOrderTripData::default()
    };
    console.trips().update_trip("t1", &data).await.unwrap();
    assert_eq!(console.trips().order_trips().len(), 1);
}

#[tokio::test]
async fn test_delete_trip_notifies_and_refetches_listing() {
    let (server, console, mut rx) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/trips/t1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/trips"))
        .respond_with(ResponseTemplate::new(200).set_body_json(trip_page(&["t2"], 1)))
        .expect(1)
        .mount(&server)
        .await;

    assert!(console.trips().delete_trip("t1").await.unwrap());
    assert_eq!(console.trips().list().snapshot().items[0].id, "t2");
    assert_eq!(
        drain(&mut rx),
        vec![(Severity::Success, "Trip deleted successfully".to_owned())]
    );
}

#[tokio::test]
async fn test_start_trip_failure_rethrows_after_notifying() {
    let (server, console, mut rx) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/trips/t1/start"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/trips"))
        .respond_with(ResponseTemplate::new(200).set_body_json(trip_page(&[], 0)))
        .expect(0)
        .mount(&server)
        .await;

    let err = console.trips().start_trip("t1").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(!console.trips().list().is_mutating());
    assert_eq!(
        drain(&mut rx),
        vec![(Severity::Error, "Failed to start trip".to_owned())]
    );
}

#[tokio::test]
async fn test_complete_trip_failure_rethrows_after_notifying() {
    let (server, console, mut rx) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/trips/t1/complete"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "Trip is not started" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let data = CompleteTripData {
        actual_fuel: "40".into(),
        actual_duration: "3h".into(),
    };
    let err = console.trips().complete_trip("t1", &data).await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert_eq!(
        drain(&mut rx),
        vec![(Severity::Error, "Trip is not started".to_owned())]
    );
}

#[tokio::test]
async fn test_available_trucks_failure_resets() {
    let (server, console, mut rx) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/o1/available-trucks"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    console.trips().fetch_available_trucks("o1").await;
    assert!(console.trips().available_trucks().is_empty());
    assert!(!console.trips().is_loading_trucks());
    assert_eq!(
        drain(&mut rx),
        vec![(Severity::Error, "Failed to load available trucks".to_owned())]
    );
}

// ── Trip workflow ───────────────────────────────────────────────────

struct Accept;

impl Confirm for Accept {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        assert_eq!(prompt.reject_label, "Cancel");
        true
    }
}

#[tokio::test]
async fn test_confirmed_start_resolves_true_on_success() {
    let (server, console, _rx) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/trips/t1/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(trip("t1", "in_progress")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/trips"))
        .respond_with(ResponseTemplate::new(200).set_body_json(trip_page(&["t1"], 1)))
        .mount(&server)
        .await;

    assert!(console.trip_workflow(Accept).confirm_start_trip("t1").await);
}

#[tokio::test]
async fn test_confirmed_delete_resolves_false_on_failure() {
    let (server, console, mut rx) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/trips/t1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    assert!(!console.trip_workflow(Accept).confirm_delete_trip("t1").await);
    assert_eq!(
        drain(&mut rx),
        vec![(Severity::Error, "Failed to delete trip".to_owned())]
    );
}

#[tokio::test]
async fn test_confirmed_start_resolves_false_on_failure() {
    let (server, console, mut rx) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/trips/t1/start"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    assert!(!console.trip_workflow(Accept).confirm_start_trip("t1").await);
    assert_eq!(
        drain(&mut rx),
        vec![(Severity::Error, "Failed to start trip".to_owned())]
    );
}
