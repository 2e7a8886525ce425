use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A fetched response body as stored by the document cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedDocument {
    pub url: String,
    pub body: String,
    pub fetched_at: DateTime<Utc>,
}

impl CachedDocument {
    pub fn new(url: &str, body: String) -> Self {
        Self {
            url: url.to_string(),
            body,
            fetched_at: Utc::now(),
        }
    }

    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.fetched_at < ttl
    }
}
