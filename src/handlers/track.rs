use axum::{
    Json,
    extract::{Path, State},
};

use crate::types::TrackingData;
use crate::{FedpackError, router::FedpackState};

/// POST /api/track/{trackingNumber}: look the number up on Ship24 and update
/// the stored package carrying it, if any.
pub async fn track_package(
    State(state): State<FedpackState>,
    Path(tracking_number): Path<String>,
) -> Result<Json<TrackingData>, FedpackError> {
    let data = state.tracker.refresh(&tracking_number).await?;
    Ok(Json(data))
}
