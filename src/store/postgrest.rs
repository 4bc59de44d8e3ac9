//! PostgREST (Supabase REST) client for the registrations table.
//!
//! Reads use the row filter `status=eq.active` ordered by `created_at`;
//! writes post a one-row array with `Prefer: return=minimal`.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{RegistrationStore, StoreError};
use crate::config::StoreConfig;
use crate::registration::{NewRegistration, Registration};

#[cfg(test)]
#[path = "postgrest_test.rs"]
mod postgrest_test;

const ACTIVE_QUERY: &str = "select=*&status=eq.active&order=created_at.asc";

pub struct PostgrestStore {
    http: reqwest::Client,
    table_url: String,
}

impl PostgrestStore {
    /// Build a store client with the API key installed as default headers.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let headers = auth_headers(&config.api_key)?;
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| StoreError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, table_url: table_url(&config.base_url, &config.table) })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;
        if !status.is_success() {
            let message = error_message(&text);
            warn!(status = status.as_u16(), %message, "store request rejected");
            return Err(StoreError::Response { status: status.as_u16(), message });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl RegistrationStore for PostgrestStore {
    async fn list_active(&self) -> Result<Vec<Registration>, StoreError> {
        let url = active_rows_url(&self.table_url);
        let text = self.send(self.http.get(url)).await?;
        let rows = parse_rows(&text)?;
        debug!(rows = rows.len(), "fetched active registrations");
        Ok(rows)
    }

    async fn insert(&self, registration: &NewRegistration) -> Result<(), StoreError> {
        let request = self
            .http
            .post(&self.table_url)
            .header("Prefer", "return=minimal")
            .json(&[registration]);
        self.send(request).await?;
        debug!(team = ?registration.team, "registration inserted");
        Ok(())
    }
}

fn auth_headers(api_key: &str) -> Result<HeaderMap, StoreError> {
    let invalid = |e: reqwest::header::InvalidHeaderValue| StoreError::HttpClientBuild(e.to_string());
    let mut headers = HeaderMap::new();
    headers.insert("apikey", HeaderValue::from_str(api_key).map_err(invalid)?);
    headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(invalid)?);
    Ok(headers)
}

fn table_url(base_url: &str, table: &str) -> String {
    format!("{}/rest/v1/{table}", base_url.trim_end_matches('/'))
}

fn active_rows_url(table_url: &str) -> String {
    format!("{table_url}?{ACTIVE_QUERY}")
}

fn parse_rows(text: &str) -> Result<Vec<Registration>, StoreError> {
    serde_json::from_str(text).map_err(|e| StoreError::Parse(e.to_string()))
}

/// PostgREST error body: `{"code": "...", "message": "...", "details": ..., "hint": ...}`.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => body.trim().to_owned(),
    }
}
