use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error reported by an upstream data source
///
/// Carried as a value next to the data it failed to fetch so that "no items"
/// and "an error happened" stay independently observable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum FeedError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl FeedError {
    /// Key used to log each distinct error only once per feed
    pub fn log_key(&self) -> String {
        self.to_string()
    }
}
