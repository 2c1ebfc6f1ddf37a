//! Wire types: upstream Ship24 / LibreTranslate payloads and public responses.

pub mod ship24;
pub mod tracking;
pub mod translate;

pub use tracking::{Coordinates, LatLng, TrackingData, TrackingEventData};
