use crate::client::AsyncSupabaseClient;
use crate::domain::extract_storage_path;
use crate::error::{RepoResult, RepositoryError};
use crate::models::{Contact, ContactChanges, ContactDraft, ImageFile, NewContactRow};
use crate::repositories::traits::ContactRepository;
use crate::storage::ImageStore;
use async_trait::async_trait;
use std::sync::Arc;

/// Contact repository backed by the hosted table and the avatar bucket.
///
/// Mutations follow a strict order: an image upload always precedes the row
/// mutation that references it, so a row never points at a blob that does not
/// exist yet; row deletion always precedes blob deletion, so a row never
/// outlives its blob.
pub struct SupabaseContactRepository {
    client: Arc<dyn AsyncSupabaseClient>,
    images: Arc<dyn ImageStore>,
}

impl SupabaseContactRepository {
    /// Create a new SupabaseContactRepository with the given collaborators.
    pub fn new(client: Arc<dyn AsyncSupabaseClient>, images: Arc<dyn ImageStore>) -> Self {
        Self { client, images }
    }

    /// Best-effort removal of the blob behind a stored locator.
    ///
    /// Failure is logged and swallowed; it never fails the enclosing
    /// operation.
    async fn remove_stale_blob(&self, locator: &str) {
        let key = extract_storage_path(locator);
        if let Err(e) = self.images.remove(&key).await {
            tracing::warn!("leaving orphaned blob behind: {}", e);
        }
    }
}

#[async_trait]
impl ContactRepository for SupabaseContactRepository {
    async fn list(&self) -> RepoResult<Vec<Contact>> {
        self.client
            .fetch_contacts()
            .await
            .map_err(RepositoryError::Fetch)
    }

    async fn create(&self, draft: &ContactDraft, image: Option<ImageFile>) -> RepoResult<Contact> {
        // Upload first so the row never references a missing blob. If the
        // insert below fails the blob is orphaned, which is acceptable.
        let avatar_url = match image {
            Some(ref image) => {
                let stored = self
                    .images
                    .upload(image)
                    .await
                    .map_err(RepositoryError::Upload)?;
                Some(stored.public_url)
            }
            None => None,
        };

        let row = NewContactRow::from_draft(draft, avatar_url);
        let contact = self
            .client
            .insert_contact(&row)
            .await
            .map_err(RepositoryError::Persist)?;

        tracing::info!("created contact {}", contact.id);
        Ok(contact)
    }

    async fn update(&self, contact: &Contact, new_image: Option<ImageFile>) -> RepoResult<Contact> {
        let avatar_url = match new_image {
            // No new image: the existing locator rides along unchanged.
            None => contact.avatar_url.clone(),
            Some(ref image) => {
                let stored = self
                    .images
                    .upload(image)
                    .await
                    .map_err(RepositoryError::Upload)?;

                // The replacement is uploaded; the old blob is now stale.
                if contact.has_avatar() {
                    self.remove_stale_blob(contact.avatar_url.as_deref().unwrap_or_default())
                        .await;
                }

                Some(stored.public_url)
            }
        };

        let changes = ContactChanges {
            name: contact.name.clone(),
            last_contact_date: contact.last_contact_date,
            avatar_url,
        };

        let updated = self
            .client
            .update_contact(&contact.id, &changes)
            .await
            .map_err(RepositoryError::Persist)?;

        tracing::info!("updated contact {}", updated.id);
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> RepoResult<Contact> {
        // Row first: only a confirmed-deleted row leaves its blob orphaned.
        let deleted = self
            .client
            .delete_contact(id)
            .await
            .map_err(RepositoryError::Persist)?;

        if deleted.has_avatar() {
            self.remove_stale_blob(deleted.avatar_url.as_deref().unwrap_or_default())
                .await;
        }

        tracing::info!("deleted contact {}", deleted.id);
        Ok(deleted)
    }
}
