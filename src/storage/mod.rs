//! Image store adapter for the avatar bucket.
//!
//! Uploads go in under a freshly generated unique key so concurrent uploads
//! of same-named files never collide; removal is best-effort and reports a
//! [`CleanupError`] the caller logs and moves past.

mod bucket_image_store;

pub use bucket_image_store::BucketImageStore;

use crate::error::{CleanupError, StoreApiResult};
use crate::models::{ImageFile, StoredImage};
use async_trait::async_trait;

/// Blob storage seam for avatar images.
///
/// Provides abstraction over the avatar bucket, enabling different
/// implementations (hosted bucket, mock).
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Upload an image under a fresh unique key and return its locator.
    ///
    /// Failures propagate to the caller; an upload error is never swallowed.
    async fn upload(&self, image: &ImageFile) -> StoreApiResult<StoredImage>;

    /// Remove the blob stored under a bucket-relative key.
    ///
    /// Best-effort: the caller logs the returned [`CleanupError`] and
    /// continues, an orphaned blob is an acceptable, recoverable leak.
    async fn remove(&self, storage_key: &str) -> Result<(), CleanupError>;
}
