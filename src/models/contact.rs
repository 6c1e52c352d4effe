//! Contact model and persistence payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer for the server-assigned id.
///
/// PostgREST returns identity columns as JSON numbers and uuid columns as
/// strings; the id is opaque to this crate, so both collapse to `String`.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Num(i64),
        Str(String),
    }

    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Num(n) => n.to_string(),
        IdRepr::Str(s) => s,
    })
}

/// A contact row from the `contacts` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    /// Server-assigned unique identifier; immutable after creation
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Calendar date of the most recent contact (no time-of-day)
    pub last_contact_date: NaiveDate,

    /// Public locator of the avatar blob, if one is attached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Contact {
    /// Whether this contact references a stored avatar blob.
    ///
    /// An empty string counts as no avatar; legacy rows carry `""` instead
    /// of null.
    pub fn has_avatar(&self) -> bool {
        self.avatar_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Fields of a contact before the server has assigned an id.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactDraft {
    pub name: String,
    pub last_contact_date: NaiveDate,
}

/// Insert payload for the `contacts` table.
#[derive(Debug, Clone, Serialize)]
pub struct NewContactRow {
    pub name: String,
    pub last_contact_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl NewContactRow {
    /// Build an insert payload from a draft and an optional avatar locator.
    pub fn from_draft(draft: &ContactDraft, avatar_url: Option<String>) -> Self {
        Self {
            name: draft.name.clone(),
            last_contact_date: draft.last_contact_date,
            avatar_url,
        }
    }
}

/// Patch payload for updating an existing contact row.
///
/// The id never appears here; it selects the row via the request path.
/// `avatar_url` is always sent so a cleared avatar persists as null.
#[derive(Debug, Clone, Serialize)]
pub struct ContactChanges {
    pub name: String,
    pub last_contact_date: NaiveDate,
    pub avatar_url: Option<String>,
}

impl From<&Contact> for ContactChanges {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            last_contact_date: contact.last_contact_date,
            avatar_url: contact.avatar_url.clone(),
        }
    }
}

/// An image picked by the caller, held in memory until upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Original file name, used only to carry the extension
    pub file_name: String,

    /// MIME type sent as the object's Content-Type
    pub content_type: String,

    /// Raw image bytes
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Extension of the original file name, without the dot.
    ///
    /// Returns `None` when the name has no extension at all.
    pub fn extension(&self) -> Option<&str> {
        self.file_name.rsplit_once('.').map(|(_, ext)| ext)
    }
}

/// Result of a successful blob upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Bucket-relative key the blob was stored under
    pub storage_key: String,

    /// Publicly resolvable URL for the stored key
    pub public_url: String,
}
