use crate::db::PackageStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Normalized tracking result returned by `POST /api/track/:trackingNumber`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackingData {
    pub tracking_number: String,
    pub carrier: String,
    pub status: PackageStatus,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub estimated_delivery: Option<NaiveDate>,
    pub last_update: DateTime<Utc>,
    pub coordinates: Coordinates,
    pub events: Vec<TrackingEventData>,
    /// Set when the upstream call failed and this record is synthetic.
    #[serde(default)]
    pub limited: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub origin: Option<LatLng>,
    pub destination: Option<LatLng>,
    pub current: Option<LatLng>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// One carrier event as exposed to clients and kept in `trackingData`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackingEventData {
    /// Upstream timestamp, passed through verbatim.
    pub timestamp: String,
    pub location: String,
    pub description: String,
    pub status: String,
}
