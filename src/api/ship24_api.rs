use crate::error::FedpackError;
use crate::types::ship24::{CreateTrackerData, CreateTrackerRequest, Ship24Envelope, TrackerResults};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Thin client over the Ship24 public API. One request per call, no retries.
#[derive(Clone)]
pub struct Ship24Api {
    client: reqwest::Client,
    base_url: Url,
    api_key: Arc<str>,
}

impl Ship24Api {
    pub fn new(client: reqwest::Client, mut base_url: Url, api_key: impl Into<Arc<str>>) -> Self {
        // `Url::join` replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            client,
            base_url,
            api_key: api_key.into(),
        }
    }

    /// `POST /trackers`. `None` when Ship24 answers without a tracker.
    pub async fn create_tracker(
        &self,
        tracking_number: &str,
    ) -> Result<Option<CreateTrackerData>, FedpackError> {
        let url = self.base_url.join("trackers")?;
        let resp = self
            .client
            .post(url)
            .bearer_auth(self.api_key.as_ref())
            .json(&CreateTrackerRequest { tracking_number })
            .send()
            .await?;
        let envelope: Ship24Envelope<CreateTrackerData> = decode(resp).await?;
        Ok(envelope.data)
    }

    /// `GET /trackers/{trackerId}/results`.
    pub async fn tracker_results(
        &self,
        tracker_id: &str,
    ) -> Result<Option<TrackerResults>, FedpackError> {
        let url = self
            .base_url
            .join(&format!("trackers/{tracker_id}/results"))?;
        let resp = self
            .client
            .get(url)
            .bearer_auth(self.api_key.as_ref())
            .send()
            .await?;
        let envelope: Ship24Envelope<TrackerResults> = decode(resp).await?;
        Ok(envelope.data)
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, FedpackError> {
    let status = resp.status();
    if !status.is_success() {
        debug!(%status, url = %resp.url(), "Ship24 returned non-success status");
        return Err(FedpackError::UpstreamStatus(status));
    }
    let body = resp.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
