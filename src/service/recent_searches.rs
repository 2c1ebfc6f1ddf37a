use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Per-user list of recently searched tracking numbers, newest first.
///
/// Requests without a user id share one anonymous list.
#[derive(Clone)]
pub struct RecentSearches {
    inner: Arc<RwLock<HashMap<String, VecDeque<String>>>>,
    limit: usize,
}

impl RecentSearches {
    pub fn new(limit: usize) -> Self {
        Self {
            inner: Arc::default(),
            limit,
        }
    }

    pub async fn list(&self, user_id: &str) -> Vec<String> {
        self.inner
            .read()
            .await
            .get(user_id)
            .map(|q| q.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Record a search. Numbers already in the list keep their position; new
    /// ones go to the front and the oldest entry drops once over the limit.
    pub async fn push(&self, user_id: &str, tracking_number: &str) {
        let mut inner = self.inner.write().await;
        let list = inner.entry(user_id.to_string()).or_default();
        if list.iter().any(|t| t == tracking_number) {
            return;
        }
        list.push_front(tracking_number.to_string());
        list.truncate(self.limit);
    }
}
