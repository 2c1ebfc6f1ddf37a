use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::{Ship24Api, build_client};
use crate::config::Config;
use crate::db::{MemStorage, Package};
use crate::error::FedpackError;
use crate::handlers::{activity, packages, searches, track, translate, webhook};
use crate::service::{RecentSearches, TrackingService, Translator};

/// Shared handler state. Cloning is cheap; all members share their data.
#[derive(Clone)]
pub struct FedpackState {
    pub storage: MemStorage,
    pub tracker: TrackingService,
    pub translator: Translator,
    pub recent: RecentSearches,
    refresh_on_create: bool,
}

impl FedpackState {
    pub fn new(cfg: &Config) -> Result<Self, FedpackError> {
        let client = build_client(cfg)?;
        let storage = MemStorage::new();
        let ship24 = Ship24Api::new(
            client.clone(),
            cfg.ship24_base_url.clone(),
            cfg.ship24_api_key.as_str(),
        );
        Ok(Self {
            tracker: TrackingService::new(ship24, storage.clone()),
            translator: Translator::new(
                client,
                cfg.translate_endpoints.clone(),
                cfg.translate_timeout(),
            ),
            recent: RecentSearches::new(cfg.recent_search_limit),
            storage,
            refresh_on_create: cfg.refresh_on_create,
        })
    }

    /// Kick off a background Ship24 lookup for a freshly created package.
    pub(crate) fn schedule_refresh(&self, pkg: &Package) {
        if self.refresh_on_create {
            self.tracker.spawn_refresh(pkg.tracking_number.clone());
        }
    }
}

pub fn fedpack_router(state: FedpackState) -> Router {
    Router::new()
        .route(
            "/api/packages",
            get(packages::list_packages).post(packages::create_package),
        )
        .route("/api/packages/bulk", post(packages::bulk_import))
        .route(
            "/api/packages/{id}",
            get(packages::get_package).delete(packages::delete_package),
        )
        .route("/api/packages/{id}/events", get(packages::package_events))
        .route("/api/track/{tracking_number}", post(track::track_package))
        .route("/api/translate", post(translate::translate_text))
        .route("/api/translate/batch", post(translate::translate_batch))
        .route("/api/webhook/ship24", post(webhook::ship24_webhook))
        .route(
            "/api/recent-searches",
            get(searches::list_recent_searches).post(searches::add_recent_search),
        )
        .route("/api/activity", get(activity::recent_activity))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
