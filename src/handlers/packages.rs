use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use super::OwnerQuery;
use crate::db::{NewPackage, Package, TrackingEvent};
use crate::middleware::ApiJson;
use crate::service::bulk_import::tokenize;
use crate::{FedpackError, router::FedpackState};

/// GET /api/packages?userId=
pub async fn list_packages(
    State(state): State<FedpackState>,
    Query(query): Query<OwnerQuery>,
) -> Json<Vec<Package>> {
    Json(state.storage.get_all_packages(query.user_id.as_deref()).await)
}

/// GET /api/packages/{id}
pub async fn get_package(
    State(state): State<FedpackState>,
    Path(id): Path<String>,
) -> Result<Json<Package>, FedpackError> {
    state
        .storage
        .get_package(&id)
        .await
        .map(Json)
        .ok_or(FedpackError::PackageNotFound)
}

/// POST /api/packages
pub async fn create_package(
    State(state): State<FedpackState>,
    ApiJson(mut body): ApiJson<NewPackage>,
) -> Result<(StatusCode, Json<Package>), FedpackError> {
    body.tracking_number = body.tracking_number.trim().to_string();
    if body.tracking_number.is_empty() {
        return Err(FedpackError::BadRequest("Invalid package data".to_string()));
    }
    let pkg = state.storage.create_package(body).await?;
    info!(package_id = %pkg.id, tracking_number = %pkg.tracking_number, "package created");
    state.schedule_refresh(&pkg);
    Ok((StatusCode::CREATED, Json(pkg)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkImportRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub tracking_numbers: Vec<String>,
    /// Raw pasted text, split the same way as list entries.
    #[serde(default)]
    pub text: Option<String>,
}

/// POST /api/packages/bulk
pub async fn bulk_import(
    State(state): State<FedpackState>,
    ApiJson(body): ApiJson<BulkImportRequest>,
) -> Result<(StatusCode, Json<Vec<Package>>), FedpackError> {
    let tokens = tokenize(
        body.tracking_numbers
            .iter()
            .map(String::as_str)
            .chain(body.text.as_deref()),
    );
    if tokens.is_empty() {
        return Err(FedpackError::BadRequest(
            "No valid tracking numbers provided".to_string(),
        ));
    }

    let mut created = Vec::with_capacity(tokens.len());
    for tracking_number in tokens {
        let new = NewPackage {
            tracking_number,
            title: None,
            user_id: body.user_id.clone(),
        };
        match state.storage.create_package(new).await {
            Ok(pkg) => {
                state.schedule_refresh(&pkg);
                created.push(pkg);
            }
            Err(FedpackError::DuplicateTrackingNumber(tn)) => {
                debug!(tracking_number = %tn, "bulk import skipped already tracked number");
            }
            Err(e) => return Err(e),
        }
    }
    info!(count = created.len(), "bulk import complete");
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/packages/{id}
pub async fn delete_package(
    State(state): State<FedpackState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, FedpackError> {
    if !state.storage.delete_package(&id).await {
        return Err(FedpackError::PackageNotFound);
    }
    info!(package_id = %id, "package deleted");
    Ok(Json(json!({ "success": true })))
}

/// GET /api/packages/{id}/events
pub async fn package_events(
    State(state): State<FedpackState>,
    Path(id): Path<String>,
) -> Json<Vec<TrackingEvent>> {
    Json(state.storage.get_tracking_events(&id).await)
}
