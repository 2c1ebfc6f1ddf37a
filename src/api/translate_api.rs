use crate::error::FedpackError;
use crate::types::translate::{LibreTranslateRequest, LibreTranslateResponse};
use std::time::Duration;
use url::Url;

/// Stateless LibreTranslate call against a single endpoint.
pub struct LibreTranslateApi;

impl LibreTranslateApi {
    /// Translate `text` into `target`. `Ok(None)` when the endpoint answered
    /// without a translation.
    pub async fn translate(
        client: &reqwest::Client,
        endpoint: &Url,
        text: &str,
        target: &str,
        timeout: Duration,
    ) -> Result<Option<String>, FedpackError> {
        let resp = client
            .post(endpoint.clone())
            .timeout(timeout)
            .json(&LibreTranslateRequest {
                q: text,
                source: "auto",
                target,
                format: "text",
            })
            .send()
            .await?
            .error_for_status()?;
        let body: LibreTranslateResponse = resp.json().await?;
        Ok(body.translated_text.filter(|t| !t.is_empty()))
    }
}
