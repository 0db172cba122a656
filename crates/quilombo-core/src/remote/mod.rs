//! Remote store contract and configuration
//!
//! The relational backend is an external collaborator; the sync core only
//! depends on this trait, so tests can substitute an in-memory fake.

mod http;

#[cfg(test)]
pub(crate) mod fake;

pub use http::HttpRemoteStore;

use std::env;
use std::time::Duration;

use crate::models::Record;
use crate::util::normalize_text_option;

/// Default per-request timeout for remote calls.
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the remote store client
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Backend project URL (e.g. `https://project.supabase.co`)
    pub url: Option<String>,
    /// Public API key sent with every request
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }
}

impl RemoteConfig {
    /// Create a new remote configuration
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            api_key: Some(api_key.into()),
            timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }

    /// Override the per-request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check if the remote store is configured
    pub const fn is_configured(&self) -> bool {
        self.url.is_some() && self.api_key.is_some()
    }

    /// Read configuration from `SUPABASE_URL` / `SUPABASE_ANON_KEY`
    pub fn from_env() -> Self {
        Self {
            url: normalize_text_option(env::var("SUPABASE_URL").ok()),
            api_key: normalize_text_option(env::var("SUPABASE_ANON_KEY").ok()),
            timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }
}

/// Per-table operations the reconciliation core needs from the backend
#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    /// Cheap existence/reachability check (select one id, limit 1)
    async fn probe(&self, table: &str) -> crate::Result<()>;

    /// Look up an existing row by the contact-email natural key
    async fn find_by_email(&self, table: &str, email: &str) -> crate::Result<Option<Record>>;

    /// Insert a new row
    async fn insert(&self, table: &str, record: &Record) -> crate::Result<()>;

    /// Update an existing row by id
    async fn update(&self, table: &str, id: i64, record: &Record) -> crate::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_config_new() {
        let config = RemoteConfig::new("https://project.supabase.co", "anon-key");
        assert!(config.is_configured());
        assert_eq!(config.timeout, DEFAULT_REMOTE_TIMEOUT);
    }

    #[test]
    fn test_remote_config_default_not_configured() {
        let config = RemoteConfig::default();
        assert!(!config.is_configured());
    }

    #[test]
    fn test_with_timeout_overrides_default() {
        let config = RemoteConfig::new("https://project.supabase.co", "anon-key")
            .with_timeout(Duration::from_secs(2));
        assert_eq!(config.timeout, Duration::from_secs(2));
    }
}
