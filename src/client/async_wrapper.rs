//! Async wrapper around the synchronous SupabaseClient.
//!
//! This module provides an async interface to the synchronous client by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread
//! pool, preventing blocking of the async runtime.

use crate::client::SupabaseClient;
use crate::error::{StoreApiError, StoreApiResult};
use crate::models::{Contact, ContactChanges, NewContactRow};
use async_trait::async_trait;
use std::sync::Arc;

/// Async interface over the hosted table and storage endpoints.
///
/// Implemented by [`AsyncSupabaseClientImpl`] for production and by in-memory
/// fakes in tests; repositories and the image store only see this trait.
#[async_trait]
pub trait AsyncSupabaseClient: Send + Sync {
    async fn fetch_contacts(&self) -> StoreApiResult<Vec<Contact>>;
    async fn insert_contact(&self, row: &NewContactRow) -> StoreApiResult<Contact>;
    async fn update_contact(&self, id: &str, changes: &ContactChanges) -> StoreApiResult<Contact>;
    async fn delete_contact(&self, id: &str) -> StoreApiResult<Contact>;

    async fn upload_object(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> StoreApiResult<()>;
    async fn remove_object(&self, key: &str) -> StoreApiResult<()>;

    /// Publicly resolvable URL for a stored key. Pure URL construction.
    fn public_object_url(&self, key: &str) -> String;
}

/// Async wrapper around the synchronous SupabaseClient.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP operations on a
/// dedicated thread pool, preventing blocking of the async runtime.
#[derive(Clone)]
pub struct AsyncSupabaseClientImpl {
    client: Arc<SupabaseClient>,
}

impl AsyncSupabaseClientImpl {
    pub fn new(client: SupabaseClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl AsyncSupabaseClient for AsyncSupabaseClientImpl {
    async fn fetch_contacts(&self) -> StoreApiResult<Vec<Contact>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.fetch_contacts())
            .await
            .map_err(|e| StoreApiError::HttpError(format!("Task join error: {}", e)))?
    }

    async fn insert_contact(&self, row: &NewContactRow) -> StoreApiResult<Contact> {
        let client = self.client.clone();
        let row = row.clone();

        tokio::task::spawn_blocking(move || client.insert_contact(&row))
            .await
            .map_err(|e| StoreApiError::HttpError(format!("Task join error: {}", e)))?
    }

    async fn update_contact(&self, id: &str, changes: &ContactChanges) -> StoreApiResult<Contact> {
        let client = self.client.clone();
        let id = id.to_string();
        let changes = changes.clone();

        tokio::task::spawn_blocking(move || client.update_contact(&id, &changes))
            .await
            .map_err(|e| StoreApiError::HttpError(format!("Task join error: {}", e)))?
    }

    async fn delete_contact(&self, id: &str) -> StoreApiResult<Contact> {
        let client = self.client.clone();
        let id = id.to_string();

        tokio::task::spawn_blocking(move || client.delete_contact(&id))
            .await
            .map_err(|e| StoreApiError::HttpError(format!("Task join error: {}", e)))?
    }

    async fn upload_object(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> StoreApiResult<()> {
        let client = self.client.clone();
        let key = key.to_string();
        let content_type = content_type.to_string();

        tokio::task::spawn_blocking(move || client.upload_object(&key, &content_type, &bytes))
            .await
            .map_err(|e| StoreApiError::HttpError(format!("Task join error: {}", e)))?
    }

    async fn remove_object(&self, key: &str) -> StoreApiResult<()> {
        let client = self.client.clone();
        let key = key.to_string();

        tokio::task::spawn_blocking(move || client.remove_object(&key))
            .await
            .map_err(|e| StoreApiError::HttpError(format!("Task join error: {}", e)))?
    }

    fn public_object_url(&self, key: &str) -> String {
        self.client.public_object_url(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    #[tokio::test]
    async fn test_async_client_creation() {
        let config = Config {
            supabase_url: "https://example.supabase.co".to_string(),
            supabase_api_key: "test-key".to_string(),
            storage_bucket: "contact-images".to_string(),
            list_cache_ttl_secs: 60,
            request_timeout: 10,
            log_level: "info".to_string(),
        };
        let client = SupabaseClient::new(&config);
        let async_client = AsyncSupabaseClientImpl::new(client);

        // Should be able to clone
        let cloned = async_client.clone();
        assert!(cloned
            .public_object_url("abc.png")
            .ends_with("/storage/v1/object/public/contact-images/abc.png"));
    }
}
