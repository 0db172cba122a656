//! HTTP remote store client
//!
//! Speaks the backend's PostgREST-style REST interface: one route per table
//! under `/rest/v1/`, `column=eq.value` filters, and an `apikey` header pair.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use super::{RemoteConfig, RemoteStore};
use crate::error::{Error, Result};
use crate::models::Record;
use crate::util::{compact_text, is_http_url, normalize_text_option};

/// reqwest-backed implementation of `RemoteStore`
#[derive(Clone)]
pub struct HttpRemoteStore {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpRemoteStore {
    /// Build a client from the given configuration.
    ///
    /// Fails when the URL/key are missing or the URL has no HTTP scheme.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let base_url = normalize_text_option(config.url.clone())
            .ok_or_else(|| Error::InvalidInput("remote URL is required".into()))?;
        if !is_http_url(&base_url) {
            return Err(Error::InvalidInput(
                "remote URL must include http:// or https://".into(),
            ));
        }
        let api_key = normalize_text_option(config.api_key.clone())
            .ok_or_else(|| Error::InvalidInput("remote API key is required".into()))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/rest/v1/{table}", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
    }

    async fn check(table: &str, response: Response) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(Error::Remote(parse_api_error(table, status, &body)))
    }
}

impl RemoteStore for HttpRemoteStore {
    async fn probe(&self, table: &str) -> Result<()> {
        let response = self
            .request(Method::GET, table)
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await?;
        Self::check(table, response).await?;
        Ok(())
    }

    async fn find_by_email(&self, table: &str, email: &str) -> Result<Option<Record>> {
        let filter = format!("eq.{email}");
        let response = self
            .request(Method::GET, table)
            .query(&[("select", "*"), ("email", filter.as_str()), ("limit", "1")])
            .send()
            .await?;
        let response = Self::check(table, response).await?;

        let mut rows: Vec<Record> = response.json().await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    async fn insert(&self, table: &str, record: &Record) -> Result<()> {
        let response = self
            .request(Method::POST, table)
            .header("Prefer", "return=minimal")
            .json(&[record])
            .send()
            .await?;
        Self::check(table, response).await?;
        Ok(())
    }

    async fn update(&self, table: &str, id: i64, record: &Record) -> Result<()> {
        let response = self
            .request(Method::PATCH, table)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;
        Self::check(table, response).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(table: &str, status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{table}: {} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("{table}: HTTP {}", status.as_u16())
    } else {
        format!("{table}: {} ({})", compact_text(trimmed), status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn new_rejects_missing_and_invalid_urls() {
        assert!(HttpRemoteStore::new(&RemoteConfig::default()).is_err());
        assert!(HttpRemoteStore::new(&RemoteConfig::new("project.supabase.co", "anon")).is_err());
        assert!(HttpRemoteStore::new(&RemoteConfig::new("https://x.supabase.co", "  ")).is_err());
    }

    #[test]
    fn new_trims_trailing_slash() {
        let store = HttpRemoteStore::new(
            &RemoteConfig::new("https://x.supabase.co/", "anon")
                .with_timeout(Duration::from_secs(1)),
        )
        .unwrap();
        assert_eq!(store.base_url, "https://x.supabase.co");
    }

    #[test]
    fn parse_api_error_prefers_message_field() {
        let message = parse_api_error(
            "tutores",
            StatusCode::NOT_FOUND,
            r#"{"message": "relation does not exist"}"#,
        );
        assert_eq!(message, "tutores: relation does not exist (404)");
    }

    #[test]
    fn parse_api_error_falls_back_to_body_text() {
        let message = parse_api_error("tutores", StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(message, "tutores: upstream down (502)");

        let empty = parse_api_error("tutores", StatusCode::BAD_GATEWAY, "  ");
        assert_eq!(empty, "tutores: HTTP 502");
    }
}
