use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

fn offline_config() -> fedpack::config::Config {
    let mut cfg = fedpack::config::Config::default();
    // Nothing listens on the discard port, so Ship24 calls fail fast.
    cfg.ship24_base_url = url::Url::parse("http://127.0.0.1:9/").expect("valid url");
    cfg.ship24_api_key = "test-key".to_string();
    cfg.translate_endpoints = Vec::new();
    cfg.refresh_on_create = false;
    cfg
}

fn app() -> Router {
    let state = fedpack::router::FedpackState::new(&offline_config()).expect("state");
    fedpack::router::fedpack_router(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app
        .clone()
        .oneshot(builder.body(body).expect("failed to build request"))
        .await
        .expect("request failed");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body was not JSON")
    };
    (status, value)
}

#[tokio::test]
async fn package_create_get_delete_round_trip() {
    let app = app();

    let (status, pkg) = send(
        &app,
        "POST",
        "/api/packages",
        Some(json!({ "trackingNumber": "1Z999AA10123456784", "title": "Shoes" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(pkg["trackingNumber"], "1Z999AA10123456784");
    assert_eq!(pkg["title"], "Shoes");
    assert_eq!(pkg["status"], "pending");
    assert_eq!(pkg["isActive"], true);
    let id = pkg["id"].as_str().expect("id").to_string();

    let (status, fetched) = send(&app, "GET", &format!("/api/packages/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id.as_str());

    let (status, body) = send(&app, "DELETE", &format!("/api/packages/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, body) = send(&app, "GET", &format!("/api/packages/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Package not found" }));

    let (status, _) = send(&app, "DELETE", &format!("/api/packages/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_or_duplicate_packages_are_rejected() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/packages", Some(json!({ "title": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        "POST",
        "/api/packages",
        Some(json!({ "trackingNumber": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid package data");

    let payload = json!({ "trackingNumber": "123456789012" });
    let (status, _) = send(&app, "POST", "/api/packages", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(&app, "POST", "/api/packages", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .expect("error string")
            .contains("123456789012")
    );
}

#[tokio::test]
async fn bulk_import_creates_one_package_per_valid_token() {
    let app = app();

    let (status, created) = send(
        &app,
        "POST",
        "/api/packages/bulk",
        Some(json!({
            "userId": "alice",
            "trackingNumbers": ["1Z999AA10123456784", "short", "EE123456789US"],
            "text": "123456789012, abc;\nZZZZ99998888 1Z999AA10123456784"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let numbers: Vec<&str> = created
        .as_array()
        .expect("array")
        .iter()
        .map(|p| p["trackingNumber"].as_str().expect("tn"))
        .collect();
    assert_eq!(
        numbers,
        ["1Z999AA10123456784", "EE123456789US", "123456789012", "ZZZZ99998888"]
    );
    assert!(created.as_array().expect("array").iter().all(|p| p["userId"] == "alice"));

    let (_, mine) = send(&app, "GET", "/api/packages?userId=alice", None).await;
    assert_eq!(mine.as_array().expect("array").len(), 4);
    let (_, theirs) = send(&app, "GET", "/api/packages?userId=bob", None).await;
    assert_eq!(theirs, json!([]));

    // Re-importing a tracked number is skipped, not duplicated.
    let (status, again) = send(
        &app,
        "POST",
        "/api/packages/bulk",
        Some(json!({ "trackingNumbers": ["EE123456789US", "AAAA11112222"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(again.as_array().expect("array").len(), 1);
    let (_, all) = send(&app, "GET", "/api/packages", None).await;
    assert_eq!(all.as_array().expect("array").len(), 5);
}

#[tokio::test]
async fn bulk_import_without_valid_tokens_is_rejected() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/packages/bulk",
        Some(json!({ "trackingNumbers": ["abc", "1234567"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn track_rejects_malformed_numbers() {
    let app = app();
    let (status, body) = send(&app, "POST", "/api/track/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .expect("error string")
            .starts_with("Invalid tracking number format")
    );

    let (status, _) = send(&app, "POST", "/api/track/ABCD-12345", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unreachable_upstream_serves_limited_record() {
    let app = app();
    let (_, pkg) = send(
        &app,
        "POST",
        "/api/packages",
        Some(json!({ "trackingNumber": "1Z999AA10123456784" })),
    )
    .await;

    let (status, data) = send(&app, "POST", "/api/track/1Z999AA10123456784", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["status"], "pending");
    assert_eq!(data["carrier"], "UPS");
    assert_eq!(data["origin"], "Processing Center");
    assert_eq!(data["limited"], true);
    assert_eq!(data["events"][0]["status"], "info_received");

    // Synthetic data is not written back to the package; only lastUpdate moves.
    let id = pkg["id"].as_str().expect("id");
    let (_, stored) = send(&app, "GET", &format!("/api/packages/{id}"), None).await;
    assert_eq!(stored["carrier"], Value::Null);
    assert_eq!(stored["origin"], Value::Null);
    assert_eq!(stored["status"], "pending");
    let last_update = |v: &Value| {
        chrono::DateTime::parse_from_rfc3339(v["lastUpdate"].as_str().expect("lastUpdate"))
            .expect("RFC 3339 timestamp")
    };
    assert!(last_update(&stored) > last_update(&pkg));
    let (_, events) = send(&app, "GET", &format!("/api/packages/{id}/events"), None).await;
    assert_eq!(events, json!([]));
}

#[tokio::test]
async fn webhook_updates_matching_package() {
    let app = app();
    let (_, pkg) = send(
        &app,
        "POST",
        "/api/packages",
        Some(json!({ "trackingNumber": "EE123456789US" })),
    )
    .await;
    let id = pkg["id"].as_str().expect("id");

    let data = json!({ "shipment": { "statusMilestone": "delivered" } });
    let (status, body) = send(
        &app,
        "POST",
        "/api/webhook/ship24",
        Some(json!({ "trackingNumber": "EE123456789US", "data": data })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, stored) = send(&app, "GET", &format!("/api/packages/{id}"), None).await;
    assert_eq!(stored["status"], "delivered");
    assert_eq!(stored["trackingData"], data);

    // Unknown numbers are acknowledged and ignored.
    let (status, _) = send(
        &app,
        "POST",
        "/api/webhook/ship24",
        Some(json!({ "trackingNumber": "NOPE12345678", "data": data })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn recent_searches_are_per_user_and_capped() {
    let app = app();
    for i in 0..12 {
        let (status, _) = send(
            &app,
            "POST",
            "/api/recent-searches",
            Some(json!({ "userId": "u1", "trackingNumber": format!("TRACK{i:04}") })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    let (_, list) = send(&app, "GET", "/api/recent-searches?userId=u1", None).await;
    let list = list.as_array().expect("array");
    assert_eq!(list.len(), 10);
    assert_eq!(list[0], "TRACK0011");

    let (_, other) = send(&app, "GET", "/api/recent-searches?userId=u2", None).await;
    assert_eq!(other, json!([]));

    let (status, _) = send(
        &app,
        "POST",
        "/api/recent-searches",
        Some(json!({ "userId": "u1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn translation_validates_language_and_fails_open() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/translate",
        Some(json!({ "text": "Delivered", "targetLang": "xx" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Unsupported language" }));

    let (status, body) = send(&app, "POST", "/api/translate", Some(json!({ "text": "hi" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing text or targetLang" }));

    // No endpoints configured: the input comes back untranslated.
    let (status, body) = send(
        &app,
        "POST",
        "/api/translate",
        Some(json!({ "text": "Delivered", "targetLanguage": "fr" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "translatedText": "Delivered" }));

    let (status, body) = send(
        &app,
        "POST",
        "/api/translate/batch",
        Some(json!({ "texts": [], "targetLang": "fr" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing texts array or targetLang" }));

    let (status, body) = send(
        &app,
        "POST",
        "/api/translate/batch",
        Some(json!({ "texts": ["a", "b", "c"], "targetLang": "de" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "translations": ["a", "b", "c"] }));
}

#[tokio::test]
async fn activity_is_empty_without_events() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/activity?userId=nobody", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn malformed_json_gets_error_body() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/packages")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body: Value = serde_json::from_slice(&bytes).expect("json");
    assert!(body["error"].is_string());
}
