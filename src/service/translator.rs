use crate::api::LibreTranslateApi;
use crate::config::{ALLOWED_LANGUAGES, TRANSLATE_BATCH_SIZE};
use crate::error::FedpackError;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Proxies text to a list of LibreTranslate endpoints, first success wins.
///
/// Translation fails open: when every endpoint fails the input is returned
/// unchanged.
#[derive(Clone)]
pub struct Translator {
    client: reqwest::Client,
    endpoints: Arc<[Url]>,
    timeout: Duration,
}

/// Reject languages outside [`ALLOWED_LANGUAGES`].
pub fn check_language(lang: &str) -> Result<(), FedpackError> {
    if ALLOWED_LANGUAGES.contains(&lang) {
        Ok(())
    } else {
        Err(FedpackError::UnsupportedLanguage(lang.to_string()))
    }
}

impl Translator {
    pub fn new(client: reqwest::Client, endpoints: Vec<Url>, timeout: Duration) -> Self {
        Self {
            client,
            endpoints: endpoints.into(),
            timeout,
        }
    }

    pub async fn translate(&self, text: &str, target: &str) -> String {
        for endpoint in self.endpoints.iter() {
            match LibreTranslateApi::translate(&self.client, endpoint, text, target, self.timeout)
                .await
            {
                Ok(Some(translated)) => return translated,
                Ok(None) => debug!(%endpoint, "empty translation; trying next endpoint"),
                Err(e) => debug!(%endpoint, error = %e, "translation failed; trying next endpoint"),
            }
        }
        text.to_string()
    }

    /// Translate in chunks of [`TRANSLATE_BATCH_SIZE`], concurrently within a
    /// chunk. Output order matches input order.
    pub async fn translate_batch(&self, texts: &[String], target: &str) -> Vec<String> {
        let mut results = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(TRANSLATE_BATCH_SIZE) {
            let translated = join_all(chunk.iter().map(|q| self.translate(q, target))).await;
            results.extend(translated);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_known_languages_pass() {
        for lang in ALLOWED_LANGUAGES {
            assert!(check_language(lang).is_ok());
        }
        assert!(matches!(
            check_language("xx"),
            Err(FedpackError::UnsupportedLanguage(l)) if l == "xx"
        ));
        assert!(check_language("EN").is_err());
    }

    #[tokio::test]
    async fn no_endpoints_returns_input() {
        let translator = Translator::new(reqwest::Client::new(), vec![], Duration::from_secs(1));
        assert_eq!(translator.translate("hello", "fr").await, "hello");
        let texts = vec!["a".to_string(), "b".to_string()];
        assert_eq!(translator.translate_batch(&texts, "fr").await, texts);
    }
}
