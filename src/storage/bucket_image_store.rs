use crate::client::AsyncSupabaseClient;
use crate::error::{CleanupError, StoreApiResult};
use crate::models::{ImageFile, StoredImage};
use crate::storage::ImageStore;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Image store implementation backed by the hosted storage bucket.
///
/// This store delegates all transfer to the async client, providing a clean
/// abstraction layer between the repository and the underlying HTTP client.
pub struct BucketImageStore {
    client: Arc<dyn AsyncSupabaseClient>,
}

impl BucketImageStore {
    /// Create a new BucketImageStore with the given client.
    pub fn new(client: Arc<dyn AsyncSupabaseClient>) -> Self {
        Self { client }
    }

    /// Generate a globally unique storage key for an image.
    ///
    /// The key combines a fresh v4 uuid with the original file's extension;
    /// a name without an extension yields a bare uuid key.
    fn generate_key(image: &ImageFile) -> String {
        let id = Uuid::new_v4();
        match image.extension() {
            Some(ext) => format!("{}.{}", id, ext),
            None => id.to_string(),
        }
    }
}

#[async_trait]
impl ImageStore for BucketImageStore {
    async fn upload(&self, image: &ImageFile) -> StoreApiResult<StoredImage> {
        let key = Self::generate_key(image);

        self.client
            .upload_object(&key, &image.content_type, image.bytes.clone())
            .await?;

        let public_url = self.client.public_object_url(&key);
        tracing::debug!("uploaded image {} -> {}", image.file_name, key);

        Ok(StoredImage {
            storage_key: key,
            public_url,
        })
    }

    async fn remove(&self, storage_key: &str) -> Result<(), CleanupError> {
        self.client
            .remove_object(storage_key)
            .await
            .map_err(|source| CleanupError {
                key: storage_key.to_string(),
                source,
            })
    }
}
