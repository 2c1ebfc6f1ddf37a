use axum::{
    Json,
    extract::{Query, State},
};

use super::OwnerQuery;
use crate::config::ACTIVITY_LIMIT;
use crate::db::ActivityEntry;
use crate::router::FedpackState;

/// GET /api/activity?userId=: latest events across the user's packages.
pub async fn recent_activity(
    State(state): State<FedpackState>,
    Query(query): Query<OwnerQuery>,
) -> Json<Vec<ActivityEntry>> {
    Json(
        state
            .storage
            .recent_activity(query.user_id.as_deref(), ACTIVITY_LIMIT)
            .await,
    )
}
