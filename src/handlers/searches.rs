use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use super::OwnerQuery;
use crate::middleware::ApiJson;
use crate::{FedpackError, router::FedpackState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSearchBody {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
}

/// GET /api/recent-searches?userId=
pub async fn list_recent_searches(
    State(state): State<FedpackState>,
    Query(query): Query<OwnerQuery>,
) -> Json<Vec<String>> {
    Json(state.recent.list(query.user_id.as_deref().unwrap_or_default()).await)
}

/// POST /api/recent-searches
pub async fn add_recent_search(
    State(state): State<FedpackState>,
    ApiJson(body): ApiJson<RecentSearchBody>,
) -> Result<Json<Value>, FedpackError> {
    let Some(tracking_number) = body
        .tracking_number
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    else {
        return Err(FedpackError::BadRequest(
            "Missing trackingNumber".to_string(),
        ));
    };
    state
        .recent
        .push(body.user_id.as_deref().unwrap_or_default(), tracking_number)
        .await;
    Ok(Json(json!({ "success": true })))
}
