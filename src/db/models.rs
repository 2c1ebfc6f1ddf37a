use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Internal shipment status taxonomy.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    #[default]
    Pending,
    Processing,
    InTransit,
    OutForDelivery,
    Delivered,
    Exception,
}

impl PackageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageStatus::Pending => "pending",
            PackageStatus::Processing => "processing",
            PackageStatus::InTransit => "in_transit",
            PackageStatus::OutForDelivery => "out_for_delivery",
            PackageStatus::Delivered => "delivered",
            PackageStatus::Exception => "exception",
        }
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub tracking_number: String,
    pub title: Option<String>,
    pub carrier: Option<String>,
    pub status: PackageStatus,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub estimated_delivery: Option<NaiveDate>,
    pub last_update: DateTime<Utc>,
    pub tracking_data: Option<Value>,
    pub is_active: bool,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when registering a package.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPackage {
    pub tracking_number: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Partial update. An outer `None` leaves the stored value untouched; the
/// clearable fields take `Some(None)` to reset to null.
#[derive(Debug, Clone, Default)]
pub struct PackageUpdate {
    pub carrier: Option<String>,
    pub status: Option<PackageStatus>,
    pub origin: Option<Option<String>>,
    pub destination: Option<Option<String>>,
    pub estimated_delivery: Option<Option<NaiveDate>>,
    pub tracking_data: Option<Option<Value>>,
}

impl PackageUpdate {
    pub(crate) fn apply(self, pkg: &mut Package) {
        if let Some(carrier) = self.carrier {
            pkg.carrier = Some(carrier);
        }
        if let Some(status) = self.status {
            pkg.status = status;
        }
        if let Some(origin) = self.origin {
            pkg.origin = origin;
        }
        if let Some(destination) = self.destination {
            pkg.destination = destination;
        }
        if let Some(eta) = self.estimated_delivery {
            pkg.estimated_delivery = eta;
        }
        if let Some(data) = self.tracking_data {
            pkg.tracking_data = data;
        }
        pkg.last_update = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEvent {
    pub id: String,
    pub package_id: String,
    pub status: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTrackingEvent {
    pub package_id: String,
    pub status: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Activity feed entry: a stored event plus the tracking number it belongs to.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    #[serde(flatten)]
    pub event: TrackingEvent,
    pub tracking_number: String,
}
