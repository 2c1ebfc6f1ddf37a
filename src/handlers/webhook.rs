use axum::{
    Json,
    extract::State,
    http::HeaderMap,
};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::middleware::ApiJson;
use crate::router::FedpackState;

const SIGNATURE_HEADER: &str = "x-ship24-signature";

/// POST /api/webhook/ship24
///
/// Accepts either the flat `{ trackingNumber, data }` shape or Ship24's
/// `{ trackings: [...] }` push. Unknown tracking numbers are ignored and the
/// hook always acknowledges with `{ "success": true }`.
pub async fn ship24_webhook(
    State(state): State<FedpackState>,
    headers: HeaderMap,
    ApiJson(body): ApiJson<Value>,
) -> Json<Value> {
    debug!(
        signed = headers.contains_key(SIGNATURE_HEADER),
        "Ship24 webhook received"
    );

    for (tracking_number, data) in webhook_updates(body) {
        match state.tracker.apply_webhook(&tracking_number, data).await {
            Some(pkg) => info!(
                package_id = %pkg.id,
                %tracking_number,
                status = %pkg.status,
                "package updated from webhook"
            ),
            None => debug!(%tracking_number, "webhook for untracked number ignored"),
        }
    }
    Json(json!({ "success": true }))
}

/// Extract `(trackingNumber, data)` pairs from a webhook body.
fn webhook_updates(mut body: Value) -> Vec<(String, Value)> {
    if let Some(trackings) = body.get_mut("trackings").and_then(Value::as_array_mut) {
        return trackings
            .drain(..)
            .filter_map(|tracking| {
                let tn = tracking
                    .pointer("/tracker/trackingNumber")
                    .and_then(Value::as_str)?
                    .to_string();
                Some((tn, tracking))
            })
            .collect();
    }

    let tn = body
        .get("trackingNumber")
        .and_then(Value::as_str)
        .map(str::to_string);
    match (tn, body.get_mut("data").map(Value::take)) {
        (Some(tn), Some(data)) if !data.is_null() => vec![(tn, data)],
        _ => Vec::new(),
    }
}
