use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

/// Languages accepted by the translation endpoints.
pub const ALLOWED_LANGUAGES: [&str; 5] = ["en", "fr", "es", "de", "zh"];

/// Number of texts translated concurrently per chunk of a batch request.
pub const TRANSLATE_BATCH_SIZE: usize = 20;

/// Number of entries returned by the activity feed.
pub const ACTIVITY_LIMIT: usize = 10;

const DEFAULT_SHIP24_BASE: &str = "https://api.ship24.com/public/v1/";

const DEFAULT_TRANSLATE_ENDPOINTS: [&str; 3] = [
    "https://libretranslate.de/translate",
    "https://translate.argosopentech.com/translate",
    "https://libretranslate.com/translate",
];

/// Runtime configuration.
///
/// Every key can be overridden with a `FEDPACK_`-prefixed environment
/// variable, e.g. `FEDPACK_SHIP24_API_KEY` or `FEDPACK_LISTEN_ADDR`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub listen_addr: String,
    pub loglevel: String,
    pub ship24_api_key: String,
    pub ship24_base_url: Url,
    pub translate_endpoints: Vec<Url>,
    pub translate_timeout_secs: u64,
    pub proxy: Option<Url>,
    /// Fetch tracking data in the background right after a package is created.
    pub refresh_on_create: bool,
    pub recent_search_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5000".to_string(),
            loglevel: "info".to_string(),
            ship24_api_key: String::new(),
            ship24_base_url: parse_static_url(DEFAULT_SHIP24_BASE),
            translate_endpoints: DEFAULT_TRANSLATE_ENDPOINTS
                .iter()
                .map(|u| parse_static_url(u))
                .collect(),
            translate_timeout_secs: 15,
            proxy: None,
            refresh_on_create: true,
            recent_search_limit: 10,
        }
    }
}

impl Config {
    /// Defaults merged with `FEDPACK_*` environment variables.
    pub fn from_env() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("FEDPACK_"))
            .extract()
    }

    pub fn translate_timeout(&self) -> Duration {
        Duration::from_secs(self.translate_timeout_secs)
    }
}

fn parse_static_url(raw: &str) -> Url {
    Url::parse(raw).expect("built-in URL constant must be valid")
}

pub static CONFIG: LazyLock<Config> =
    LazyLock::new(|| Config::from_env().expect("FATAL: invalid FEDPACK_* configuration"));
