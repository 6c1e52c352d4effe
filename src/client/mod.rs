//! HTTP client for the hosted table and storage APIs.
//!
//! This module provides a synchronous HTTP client that can be used from async
//! contexts via `tokio::task::spawn_blocking`. The client handles
//! authentication, error mapping, the PostgREST conventions of the `contacts`
//! table, and the object endpoints of the avatar bucket.

mod async_wrapper;
pub use async_wrapper::{AsyncSupabaseClient, AsyncSupabaseClientImpl};

use crate::config::Config;
use crate::error::{StoreApiError, StoreApiResult};
use crate::metrics::Metrics;
use crate::models::{Contact, ContactChanges, NewContactRow};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Name of the contacts table, fixed by the hosted schema.
const CONTACTS_TABLE: &str = "contacts";

/// Synchronous HTTP client for the hosted backend.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts through [`AsyncSupabaseClientImpl`].
#[derive(Clone)]
pub struct SupabaseClient {
    /// Project base URL
    base_url: String,

    /// API key, sent as both `apikey` and bearer token
    api_key: String,

    /// Bucket holding avatar images
    bucket: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl SupabaseClient {
    /// Create a new SupabaseClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.supabase_url.clone(),
            api_key: config.supabase_api_key.clone(),
            bucket: config.storage_bucket.clone(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Create a SupabaseClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String, bucket: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            api_key,
            bucket,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// REST endpoint for the contacts table, with an optional query string.
    fn table_url(&self, query: &str) -> String {
        if query.is_empty() {
            self.build_url(&format!("rest/v1/{}", CONTACTS_TABLE))
        } else {
            self.build_url(&format!("rest/v1/{}?{}", CONTACTS_TABLE, query))
        }
    }

    /// Object endpoint for a key in the avatar bucket.
    fn object_url(&self, key: &str) -> String {
        self.build_url(&format!("storage/v1/object/{}/{}", self.bucket, key))
    }

    /// Publicly resolvable URL for a stored key.
    pub fn public_object_url(&self, key: &str) -> String {
        self.build_url(&format!(
            "storage/v1/object/public/{}/{}",
            self.bucket, key
        ))
    }

    /// Attach the authentication headers every endpoint expects.
    fn authed(&self, request: ureq::Request) -> ureq::Request {
        request
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
    }

    /// Execute a request closure, recording metrics and mapping errors.
    fn run(
        &self,
        call: impl FnOnce() -> Result<ureq::Response, ureq::Error>,
    ) -> StoreApiResult<ureq::Response> {
        let start = Instant::now();
        let result = call().map_err(|e| self.map_error(e));

        let duration = start.elapsed();
        if result.is_err() {
            self.metrics.record_http_error();
        }
        self.metrics.record_http_request(duration);

        result
    }

    /// Map a ureq error to a StoreApiError.
    fn map_error(&self, error: ureq::Error) -> StoreApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 => StoreApiError::Unauthorized,
                    404 => StoreApiError::NotFound(message),
                    _ => StoreApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    StoreApiError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    StoreApiError::Timeout
                } else {
                    StoreApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Parse a PostgREST representation body into contact rows.
    fn parse_rows(body: &str) -> StoreApiResult<Vec<Contact>> {
        serde_json::from_str::<Vec<Contact>>(body).map_err(StoreApiError::JsonError)
    }

    /// Take the single row a filtered mutation is expected to return.
    fn single_row(rows: Vec<Contact>) -> StoreApiResult<Contact> {
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreApiError::NotFound("contact row not found".to_string()))
    }

    // ========================= Table Operations =========================

    /// Fetch all contacts, most recently contacted first.
    pub fn fetch_contacts(&self) -> StoreApiResult<Vec<Contact>> {
        let url = self.table_url("select=*&order=last_contact_date.desc");
        tracing::debug!("GET {}", url);

        let response = self.run(|| self.authed(self.agent.get(&url)).call())?;
        let body = response
            .into_string()
            .map_err(|e| StoreApiError::HttpError(e.to_string()))?;

        let contacts = Self::parse_rows(&body)?;
        self.metrics.record_contacts_fetched(contacts.len());
        Ok(contacts)
    }

    /// Insert a contact row and return it with the server-assigned id.
    pub fn insert_contact(&self, row: &NewContactRow) -> StoreApiResult<Contact> {
        let url = self.table_url("");
        let body = serde_json::to_value(row).map_err(StoreApiError::JsonError)?;
        tracing::debug!("POST {}", url);

        let response = self.run(|| {
            self.authed(self.agent.post(&url))
                .set("Content-Type", "application/json")
                .set("Prefer", "return=representation")
                .send_json(body)
        })?;

        let body = response
            .into_string()
            .map_err(|e| StoreApiError::HttpError(e.to_string()))?;
        Self::single_row(Self::parse_rows(&body)?)
    }

    /// Update the contact row with the given id and return the new row.
    pub fn update_contact(&self, id: &str, changes: &ContactChanges) -> StoreApiResult<Contact> {
        let url = self.table_url(&format!("id=eq.{}", urlencoding::encode(id)));
        let body = serde_json::to_value(changes).map_err(StoreApiError::JsonError)?;
        tracing::debug!("PATCH {}", url);

        let response = self.run(|| {
            self.authed(self.agent.request("PATCH", &url))
                .set("Content-Type", "application/json")
                .set("Prefer", "return=representation")
                .send_json(body)
        })?;

        let body = response
            .into_string()
            .map_err(|e| StoreApiError::HttpError(e.to_string()))?;
        Self::single_row(Self::parse_rows(&body)?)
    }

    /// Delete the contact row with the given id and return the deleted row.
    pub fn delete_contact(&self, id: &str) -> StoreApiResult<Contact> {
        let url = self.table_url(&format!("id=eq.{}", urlencoding::encode(id)));
        tracing::debug!("DELETE {}", url);

        let response = self.run(|| {
            self.authed(self.agent.delete(&url))
                .set("Prefer", "return=representation")
                .call()
        })?;

        let body = response
            .into_string()
            .map_err(|e| StoreApiError::HttpError(e.to_string()))?;
        Self::single_row(Self::parse_rows(&body)?)
    }

    // ========================= Storage Operations =========================

    /// Upload bytes under a key in the avatar bucket.
    pub fn upload_object(
        &self,
        key: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> StoreApiResult<()> {
        let url = self.object_url(key);
        tracing::debug!("POST {} ({} bytes)", url, bytes.len());

        self.run(|| {
            self.authed(self.agent.post(&url))
                .set("Content-Type", content_type)
                .send_bytes(bytes)
        })?;

        self.metrics.record_image_uploaded();
        Ok(())
    }

    /// Remove the object stored under a key in the avatar bucket.
    ///
    /// Removal only ever happens as stale-blob cleanup, so failures also
    /// feed the cleanup-failure counter.
    pub fn remove_object(&self, key: &str) -> StoreApiResult<()> {
        let url = self.object_url(key);
        tracing::debug!("DELETE {}", url);

        let result = self.run(|| self.authed(self.agent.delete(&url)).call());
        if result.is_err() {
            self.metrics.record_cleanup_failure();
        }
        result.map(|_| ())
    }
}
