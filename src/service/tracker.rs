use crate::api::Ship24Api;
use crate::db::{MemStorage, NewTrackingEvent, Package, PackageUpdate};
use crate::error::FedpackError;
use crate::service::status::normalize_milestone;
use crate::service::tracking_number::{TrackingFormat, classify, clean};
use crate::types::ship24::{Ship24Event, Tracking};
use crate::types::{Coordinates, TrackingData, TrackingEventData};
use axum::http::StatusCode;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

const AUTO_DETECTING: &str = "Auto-detecting...";
const UNKNOWN_LOCATION: &str = "Unknown location";
const DEFAULT_EVENT_DESCRIPTION: &str = "Package processed";
const DEFAULT_EVENT_STATUS: &str = "in_transit";
const FALLBACK_ORIGIN: &str = "Processing Center";
const FALLBACK_DESTINATION: &str = "Delivery Address";
const FALLBACK_DESCRIPTION: &str =
    "Package information received (Limited data due to API connectivity)";
const ESTIMATE_DAYS: i64 = 3;

/// Looks tracking numbers up on Ship24 and folds the results into storage.
#[derive(Clone)]
pub struct TrackingService {
    api: Ship24Api,
    storage: MemStorage,
}

impl TrackingService {
    pub fn new(api: Ship24Api, storage: MemStorage) -> Self {
        Self { api, storage }
    }

    /// Validate and look up a tracking number.
    ///
    /// Upstream 401/404 and unknown trackers surface as `TrackingNotFound`;
    /// every other upstream failure yields a synthetic `pending` record.
    pub async fn fetch(&self, tracking_number: &str) -> Result<TrackingData, FedpackError> {
        let format = classify(tracking_number).ok_or(FedpackError::InvalidTrackingNumber)?;

        match self.fetch_upstream(tracking_number, format).await {
            Ok(data) => Ok(data),
            Err(FedpackError::TrackingNotFound) => Err(FedpackError::TrackingNotFound),
            Err(e)
                if matches!(
                    e.upstream_status(),
                    Some(StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND)
                ) =>
            {
                warn!(tracking_number, error = %e, "Ship24 rejected tracking number");
                Err(FedpackError::TrackingNotFound)
            }
            Err(e) => {
                warn!(tracking_number, error = %e, "Ship24 lookup failed; serving limited data");
                Ok(fallback_tracking(tracking_number, format, Utc::now()))
            }
        }
    }

    async fn fetch_upstream(
        &self,
        tracking_number: &str,
        format: TrackingFormat,
    ) -> Result<TrackingData, FedpackError> {
        let cleaned = clean(tracking_number);
        let created = self
            .api
            .create_tracker(&cleaned)
            .await?
            .ok_or(FedpackError::TrackingNotFound)?;
        let tracker_id = created.tracker.tracker_id;
        debug!(tracking_number, %tracker_id, "Ship24 tracker created");

        let results = self
            .api
            .tracker_results(&tracker_id)
            .await?
            .unwrap_or_default();
        let tracking = results.trackings.into_iter().next().unwrap_or_default();
        Ok(map_tracking(tracking_number, format, tracking, Utc::now()))
    }

    /// Fetch and, when the number belongs to a stored package, apply the result.
    pub async fn refresh(&self, tracking_number: &str) -> Result<TrackingData, FedpackError> {
        let data = self.fetch(tracking_number).await?;
        self.apply(&data).await;
        Ok(data)
    }

    /// Fire-and-forget `refresh`; failures are only logged.
    pub fn spawn_refresh(&self, tracking_number: String) {
        let svc = self.clone();
        tokio::spawn(async move {
            if let Err(e) = svc.refresh(&tracking_number).await {
                warn!(%tracking_number, error = %e, "background tracking refresh failed");
            }
        });
    }

    /// Overwrite the matching package from `data` and store its events.
    /// Synthetic fallback records only bump `lastUpdate`; the last known
    /// carrier data is kept.
    pub async fn apply(&self, data: &TrackingData) -> Option<Package> {
        let pkg = self
            .storage
            .get_package_by_tracking_number(&data.tracking_number)
            .await?;
        if data.limited {
            debug!(package_id = %pkg.id, "limited tracking data; package fields kept");
            return self
                .storage
                .update_package(&pkg.id, PackageUpdate::default())
                .await;
        }

        let update = PackageUpdate {
            carrier: Some(data.carrier.clone()),
            status: Some(data.status),
            origin: Some(data.origin.clone()),
            destination: Some(data.destination.clone()),
            estimated_delivery: Some(data.estimated_delivery),
            tracking_data: Some(serde_json::to_value(&data.events).ok()),
        };
        let updated = self.storage.update_package(&pkg.id, update).await?;

        let events: Vec<NewTrackingEvent> = data
            .events
            .iter()
            .filter_map(|e| {
                Some(NewTrackingEvent {
                    package_id: pkg.id.clone(),
                    status: e.status.clone(),
                    location: Some(e.location.clone()),
                    description: Some(e.description.clone()),
                    timestamp: parse_timestamp(&e.timestamp)?,
                })
            })
            .collect();
        let added = self.storage.record_tracking_events(events).await;
        info!(
            package_id = %updated.id,
            status = %updated.status,
            events_added = added,
            "package refreshed from Ship24"
        );
        Some(updated)
    }

    /// Apply a Ship24 webhook push: store `data` verbatim and re-derive status
    /// from `data.shipment.statusMilestone`.
    pub async fn apply_webhook(&self, tracking_number: &str, data: Value) -> Option<Package> {
        let pkg = self
            .storage
            .get_package_by_tracking_number(tracking_number)
            .await?;
        let milestone = data
            .pointer("/shipment/statusMilestone")
            .and_then(Value::as_str);
        let update = PackageUpdate {
            status: Some(normalize_milestone(milestone)),
            tracking_data: Some(Some(data)),
            ..Default::default()
        };
        self.storage.update_package(&pkg.id, update).await
    }
}

/// Map one Ship24 tracking onto the public shape.
pub fn map_tracking(
    tracking_number: &str,
    format: TrackingFormat,
    tracking: Tracking,
    now: DateTime<Utc>,
) -> TrackingData {
    let shipment = tracking.shipment.unwrap_or_default();
    let latest = latest_event(&tracking.events);

    let carrier = shipment
        .courier
        .as_ref()
        .and_then(|c| c.name.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| carrier_fallback(format));

    let estimated_delivery = shipment
        .estimated_delivery()
        .and_then(parse_date)
        .or_else(|| latest.map(|(at, _)| (at + Duration::days(ESTIMATE_DAYS)).date_naive()));

    let coordinates = Coordinates {
        origin: shipment
            .origin
            .as_ref()
            .and_then(|p| p.lat_lng())
            .map(Into::into),
        destination: shipment
            .destination
            .as_ref()
            .and_then(|p| p.lat_lng())
            .map(Into::into),
        current: latest
            .and_then(|(_, e)| e.location.as_ref())
            .and_then(|l| l.lat_lng())
            .map(Into::into),
    };

    TrackingData {
        tracking_number: tracking_number.to_string(),
        carrier,
        status: normalize_milestone(shipment.status_milestone.as_deref()),
        origin: shipment.origin.as_ref().and_then(|p| p.label()),
        destination: shipment.destination.as_ref().and_then(|p| p.label()),
        estimated_delivery,
        last_update: latest.map(|(at, _)| at).unwrap_or(now),
        coordinates,
        events: tracking.events.iter().map(map_event).collect(),
        limited: false,
    }
}

/// Synthetic record served when Ship24 is unreachable.
pub fn fallback_tracking(
    tracking_number: &str,
    format: TrackingFormat,
    now: DateTime<Utc>,
) -> TrackingData {
    TrackingData {
        tracking_number: tracking_number.to_string(),
        carrier: carrier_fallback(format),
        status: crate::db::PackageStatus::Pending,
        origin: Some(FALLBACK_ORIGIN.to_string()),
        destination: Some(FALLBACK_DESTINATION.to_string()),
        estimated_delivery: Some((now + Duration::days(ESTIMATE_DAYS)).date_naive()),
        last_update: now,
        coordinates: Coordinates::default(),
        events: vec![TrackingEventData {
            timestamp: now.to_rfc3339(),
            location: FALLBACK_ORIGIN.to_string(),
            description: FALLBACK_DESCRIPTION.to_string(),
            status: "info_received".to_string(),
        }],
        limited: true,
    }
}

fn carrier_fallback(format: TrackingFormat) -> String {
    format.carrier_hint().unwrap_or(AUTO_DETECTING).to_string()
}

fn map_event(event: &Ship24Event) -> TrackingEventData {
    let non_empty = |s: &Option<String>| s.clone().filter(|v| !v.is_empty());
    TrackingEventData {
        timestamp: event.event_date_time.clone().unwrap_or_default(),
        location: event
            .location
            .as_ref()
            .and_then(|l| l.label())
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
        description: non_empty(&event.event_name)
            .or_else(|| non_empty(&event.event_description))
            .or_else(|| non_empty(&event.status))
            .unwrap_or_else(|| DEFAULT_EVENT_DESCRIPTION.to_string()),
        status: non_empty(&event.status_milestone)
            .unwrap_or_else(|| DEFAULT_EVENT_STATUS.to_string()),
    }
}

fn latest_event(events: &[Ship24Event]) -> Option<(DateTime<Utc>, &Ship24Event)> {
    events
        .iter()
        .filter_map(|e| Some((parse_timestamp(e.event_date_time.as_deref()?)?, e)))
        .max_by_key(|(at, _)| *at)
}

/// Parse the timestamp shapes Ship24 emits: RFC 3339, offset-less ISO
/// date-times (taken as UTC), and bare dates (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    parse_timestamp(raw).map(|dt| dt.date_naive())
}
