use serde::{Deserialize, Serialize};

/// Generic Ship24 envelope; `data` is absent when nothing was found.
#[derive(Debug, Deserialize)]
pub struct Ship24Envelope<T> {
    pub data: Option<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrackerRequest<'a> {
    pub tracking_number: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CreateTrackerData {
    pub tracker: Tracker,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tracker {
    pub tracker_id: String,
    #[serde(default)]
    pub tracking_number: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TrackerResults {
    pub trackings: Vec<Tracking>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tracking {
    pub shipment: Option<Shipment>,
    pub events: Vec<Ship24Event>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Shipment {
    pub status_milestone: Option<String>,
    pub courier: Option<Courier>,
    pub origin: Option<Place>,
    pub destination: Option<Place>,
    pub estimated_delivery_date: Option<String>,
    pub delivery: Option<Delivery>,
}

impl Shipment {
    pub fn estimated_delivery(&self) -> Option<&str> {
        self.estimated_delivery_date.as_deref().or_else(|| {
            self.delivery
                .as_ref()
                .and_then(|d| d.estimated_delivery_date.as_deref())
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Courier {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Delivery {
    pub estimated_delivery_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Place {
    pub address: Option<Address>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Place {
    /// First address line, falling back to the country name.
    pub fn label(&self) -> Option<String> {
        let address = self.address.as_ref()?;
        address
            .address_line1
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| address.country_name.clone().filter(|s| !s.is_empty()))
    }

    /// Coordinates from the place itself or, failing that, its address.
    pub fn lat_lng(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => {
                let a = self.address.as_ref()?;
                Some((a.latitude?, a.longitude?))
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    pub address_line1: Option<String>,
    pub country_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Ship24 reports event locations either as free text or as a place object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventLocation {
    Text(String),
    Place(Place),
}

impl EventLocation {
    pub fn label(&self) -> Option<String> {
        match self {
            EventLocation::Text(s) if !s.is_empty() => Some(s.clone()),
            EventLocation::Text(_) => None,
            EventLocation::Place(p) => p.label(),
        }
    }

    pub fn lat_lng(&self) -> Option<(f64, f64)> {
        match self {
            EventLocation::Text(_) => None,
            EventLocation::Place(p) => p.lat_lng(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Ship24Event {
    pub event_date_time: Option<String>,
    pub location: Option<EventLocation>,
    pub event_name: Option<String>,
    pub event_description: Option<String>,
    /// Free-text status line reported by the courier.
    pub status: Option<String>,
    pub status_milestone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_results_with_both_location_shapes() {
        let body = r#"{
            "data": {
                "trackings": [{
                    "shipment": {
                        "statusMilestone": "in_transit",
                        "delivery": { "estimatedDeliveryDate": "2024-05-04" },
                        "origin": { "address": { "countryName": "China" } }
                    },
                    "events": [
                        { "eventDateTime": "2024-05-01T08:00:00Z", "location": "Shenzhen", "status": "Accepted" },
                        { "eventDateTime": "2024-05-02T08:00:00Z",
                          "location": { "address": { "addressLine1": "Hub 4" }, "latitude": 1.5, "longitude": 2.5 } }
                    ]
                }]
            }
        }"#;
        let env: Ship24Envelope<TrackerResults> = serde_json::from_str(body).unwrap();
        let tracking = &env.data.unwrap().trackings[0];
        let shipment = tracking.shipment.as_ref().unwrap();
        assert_eq!(shipment.estimated_delivery(), Some("2024-05-04"));
        assert_eq!(shipment.origin.as_ref().unwrap().label().as_deref(), Some("China"));

        let first = tracking.events[0].location.as_ref().unwrap();
        assert_eq!(first.label().as_deref(), Some("Shenzhen"));
        assert_eq!(first.lat_lng(), None);
        let second = tracking.events[1].location.as_ref().unwrap();
        assert_eq!(second.label().as_deref(), Some("Hub 4"));
        assert_eq!(second.lat_lng(), Some((1.5, 2.5)));
    }

    #[test]
    fn missing_data_decodes_as_none() {
        let env: Ship24Envelope<CreateTrackerData> = serde_json::from_str("{}").unwrap();
        assert!(env.data.is_none());
    }
}
