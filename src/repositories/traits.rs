use crate::error::RepoResult;
use crate::models::{Contact, ContactDraft, ImageFile};
use async_trait::async_trait;

/// Repository for managing contacts.
///
/// Provides abstraction over contact storage and retrieval,
/// enabling different implementations (hosted backend, mock).
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Retrieve all contacts, ordered by last contact date descending.
    ///
    /// Ties keep the underlying store's insertion order. Transport or query
    /// failure surfaces as an error, never as an empty list.
    async fn list(&self) -> RepoResult<Vec<Contact>>;

    /// Create a new contact, uploading its avatar first when one is given.
    async fn create(&self, draft: &ContactDraft, image: Option<ImageFile>) -> RepoResult<Contact>;

    /// Update an existing contact, replacing its avatar when a new image is
    /// given and keeping the current one otherwise.
    async fn update(&self, contact: &Contact, new_image: Option<ImageFile>) -> RepoResult<Contact>;

    /// Delete a contact and return the deleted record.
    async fn delete(&self, id: &str) -> RepoResult<Contact>;
}
