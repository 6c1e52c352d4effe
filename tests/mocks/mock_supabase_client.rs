use async_trait::async_trait;
use contact_desk::client::AsyncSupabaseClient;
use contact_desk::error::{StoreApiError, StoreApiResult};
use contact_desk::models::{Contact, ContactChanges, NewContactRow};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory backend fake for testing.
///
/// Implements the full async client surface over a Vec of rows and a list of
/// stored object keys, records every call in order for sequencing assertions,
/// and lets individual operations be switched to fail.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockSupabaseClient {
    contacts: Arc<Mutex<Vec<Contact>>>,
    objects: Arc<Mutex<Vec<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
    next_id: Arc<AtomicU64>,
    fail_fetch: Arc<AtomicBool>,
    fail_insert: Arc<AtomicBool>,
    fail_update: Arc<AtomicBool>,
    fail_delete: Arc<AtomicBool>,
    fail_upload: Arc<AtomicBool>,
    fail_remove: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl MockSupabaseClient {
    pub fn new() -> Self {
        Self {
            next_id: Arc::new(AtomicU64::new(1)),
            ..Self::default()
        }
    }

    /// Seed a row as if it already existed in the table.
    pub fn seed_contact(&self, contact: Contact) {
        self.contacts.lock().unwrap().push(contact);
    }

    /// Seed a stored object key as if it had been uploaded earlier.
    pub fn seed_object(&self, key: &str) {
        self.objects.lock().unwrap().push(key.to_string());
    }

    /// Every call made so far, in order, as `name` or `name:detail` entries.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls whose entry starts with the given name.
    pub fn call_count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.split(':').next() == Some(name))
            .count()
    }

    /// Position of the first call with the given name, if any.
    pub fn call_index(&self, name: &str) -> Option<usize> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .position(|c| c.split(':').next() == Some(name))
    }

    /// Keys currently held in the fake bucket.
    pub fn stored_objects(&self) -> Vec<String> {
        self.objects.lock().unwrap().clone()
    }

    /// Rows currently held in the fake table, in insertion order.
    pub fn rows(&self) -> Vec<Contact> {
        self.contacts.lock().unwrap().clone()
    }

    pub fn fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn fail_insert(&self, fail: bool) {
        self.fail_insert.store(fail, Ordering::SeqCst);
    }

    pub fn fail_update(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn fail_upload(&self, fail: bool) {
        self.fail_upload.store(fail, Ordering::SeqCst);
    }

    pub fn fail_remove(&self, fail: bool) {
        self.fail_remove.store(fail, Ordering::SeqCst);
    }

    fn track_call(&self, entry: impl Into<String>) {
        self.calls.lock().unwrap().push(entry.into());
    }

    fn injected_failure() -> StoreApiError {
        StoreApiError::ApiError {
            status: 500,
            message: "injected failure".to_string(),
        }
    }
}

#[async_trait]
impl AsyncSupabaseClient for MockSupabaseClient {
    async fn fetch_contacts(&self) -> StoreApiResult<Vec<Contact>> {
        self.track_call("fetch_contacts");

        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(Self::injected_failure());
        }

        // Date descending with ties in insertion order, like the ordered
        // select the real table serves.
        let mut rows = self.contacts.lock().unwrap().clone();
        rows.sort_by(|a, b| b.last_contact_date.cmp(&a.last_contact_date));
        Ok(rows)
    }

    async fn insert_contact(&self, row: &NewContactRow) -> StoreApiResult<Contact> {
        self.track_call("insert_contact");

        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(Self::injected_failure());
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let contact_json = serde_json::json!({
            "id": id,
            "name": row.name,
            "last_contact_date": row.last_contact_date,
            "avatar_url": row.avatar_url,
        });
        let contact: Contact = serde_json::from_value(contact_json)?;

        self.contacts.lock().unwrap().push(contact.clone());
        Ok(contact)
    }

    async fn update_contact(&self, id: &str, changes: &ContactChanges) -> StoreApiResult<Contact> {
        self.track_call(format!("update_contact:{}", id));

        if self.fail_update.load(Ordering::SeqCst) {
            return Err(Self::injected_failure());
        }

        let mut contacts = self.contacts.lock().unwrap();
        let row = contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreApiError::NotFound(format!("contact {} not found", id)))?;

        row.name = changes.name.clone();
        row.last_contact_date = changes.last_contact_date;
        row.avatar_url = changes.avatar_url.clone();
        Ok(row.clone())
    }

    async fn delete_contact(&self, id: &str) -> StoreApiResult<Contact> {
        self.track_call(format!("delete_contact:{}", id));

        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::injected_failure());
        }

        let mut contacts = self.contacts.lock().unwrap();
        let position = contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StoreApiError::NotFound(format!("contact {} not found", id)))?;

        Ok(contacts.remove(position))
    }

    async fn upload_object(
        &self,
        key: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> StoreApiResult<()> {
        self.track_call(format!("upload_object:{}", key));

        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(Self::injected_failure());
        }

        self.objects.lock().unwrap().push(key.to_string());
        Ok(())
    }

    async fn remove_object(&self, key: &str) -> StoreApiResult<()> {
        self.track_call(format!("remove_object:{}", key));

        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(Self::injected_failure());
        }

        self.objects.lock().unwrap().retain(|k| k != key);
        Ok(())
    }

    fn public_object_url(&self, key: &str) -> String {
        format!(
            "https://unit.supabase.co/storage/v1/object/public/contact-images/{}",
            key
        )
    }
}
