//! Contact workflow layer.
//!
//! The view-model driving a contact editing session: validation, repository
//! orchestration, outcome notification, and the contact-list cache. One
//! workflow instance backs one UI surface; a boolean in-flight flag guards
//! against duplicate submission while a save or delete is running.

use crate::cache::TimedCache;
use crate::error::{FieldError, ValidationError, WorkflowError, WorkflowResult};
use crate::models::{Contact, ContactDraft, ImageFile};
use crate::repositories::ContactRepository;
use chrono::{Local, NaiveDate};
use std::sync::Arc;

/// Form input for a create or edit session.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    /// Name as typed; trimmed before validation and persistence
    pub name: String,

    /// Last contact date, if one was picked
    pub last_contact_date: Option<NaiveDate>,

    /// Newly chosen image, if any
    pub image: Option<ImageFile>,
}

/// State of the editing session.
///
/// `Saving` is reachable only through a passing `Validating`; a repository
/// failure drops the session back to `Editing` so the caller can retry
/// without re-entering data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session open
    Idle,

    /// Form open and editable
    Editing,

    /// Form rules being evaluated
    Validating,

    /// Repository operation in flight; input disabled
    Saving,
}

/// A one-line human-readable outcome notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    /// The notice text, whichever the outcome.
    pub fn message(&self) -> &str {
        match self {
            Self::Success(msg) | Self::Failure(msg) => msg,
        }
    }
}

/// Sink for terminal operation outcomes.
///
/// The UI layer implements this to surface toasts; tests record the notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Default notifier that writes outcomes to the log.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Success(msg) => tracing::info!("{}", msg),
            Notice::Failure(msg) => tracing::error!("{}", msg),
        }
    }
}

/// View-model for the contact list and its editing sessions.
pub struct ContactWorkflow {
    repository: Arc<dyn ContactRepository>,
    notifier: Arc<dyn Notifier>,
    list_cache: TimedCache<Vec<Contact>>,
    state: SessionState,
    editing: Option<Contact>,
    field_errors: Vec<FieldError>,
    in_flight: bool,
}

impl ContactWorkflow {
    /// Create a new workflow over a repository and a notifier.
    pub fn new(
        repository: Arc<dyn ContactRepository>,
        notifier: Arc<dyn Notifier>,
        list_cache_ttl_secs: u64,
    ) -> Self {
        Self {
            repository,
            notifier,
            list_cache: TimedCache::new(list_cache_ttl_secs),
            state: SessionState::Idle,
            editing: None,
            field_errors: Vec::new(),
            in_flight: false,
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The contact being edited, when the open session is an edit.
    pub fn editing(&self) -> Option<&Contact> {
        self.editing.as_ref()
    }

    /// Field errors from the most recent validation pass.
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// The contact list, served from cache until invalidated or expired.
    pub async fn contacts(&self) -> WorkflowResult<Vec<Contact>> {
        if let Some(contacts) = self.list_cache.get() {
            return Ok(contacts);
        }

        let contacts = self.repository.list().await?;
        self.list_cache.insert(contacts.clone());
        Ok(contacts)
    }

    /// Open a session for creating a new contact.
    pub fn open_create(&mut self) {
        if self.in_flight {
            return;
        }
        self.state = SessionState::Editing;
        self.editing = None;
        self.field_errors.clear();
    }

    /// Open a session for editing an existing contact.
    pub fn open_edit(&mut self, contact: Contact) {
        if self.in_flight {
            return;
        }
        self.state = SessionState::Editing;
        self.editing = Some(contact);
        self.field_errors.clear();
    }

    /// Close the session without saving.
    pub fn close(&mut self) {
        if self.in_flight {
            return;
        }
        self.state = SessionState::Idle;
        self.editing = None;
        self.field_errors.clear();
    }

    /// Evaluate every form rule in one pass, accumulating all violations.
    fn validate(
        form: &ContactForm,
        today: NaiveDate,
    ) -> Result<(String, NaiveDate), ValidationError> {
        let mut fields = Vec::new();

        let name = form.name.trim().to_string();
        if name.is_empty() {
            fields.push(FieldError::EmptyName);
        }

        match form.last_contact_date {
            None => fields.push(FieldError::MissingDate),
            Some(date) if date > today => fields.push(FieldError::FutureDate),
            Some(_) => {}
        }

        match (fields.is_empty(), form.last_contact_date) {
            (true, Some(date)) => Ok((name, date)),
            _ => Err(ValidationError { fields }),
        }
    }

    /// Save the open session's form.
    ///
    /// Validation failures set the per-field flags and make no repository
    /// call. A repository failure keeps the session open for a retry; success
    /// invalidates the list cache and closes the session.
    pub async fn save(&mut self, form: ContactForm) -> WorkflowResult<Contact> {
        if self.in_flight {
            return Err(WorkflowError::Busy);
        }
        if self.state != SessionState::Editing {
            return Err(WorkflowError::ClosedSession);
        }

        self.state = SessionState::Validating;
        let today = Local::now().date_naive();
        let (name, last_contact_date) = match Self::validate(&form, today) {
            Ok(validated) => validated,
            Err(invalid) => {
                self.field_errors = invalid.fields.clone();
                self.state = SessionState::Editing;
                return Err(WorkflowError::Validation(invalid));
            }
        };

        self.field_errors.clear();
        self.state = SessionState::Saving;
        self.in_flight = true;

        let result = match self.editing.as_ref() {
            Some(original) => {
                let updated = Contact {
                    id: original.id.clone(),
                    name,
                    last_contact_date,
                    avatar_url: original.avatar_url.clone(),
                };
                self.repository.update(&updated, form.image).await
            }
            None => {
                let draft = ContactDraft {
                    name,
                    last_contact_date,
                };
                self.repository.create(&draft, form.image).await
            }
        };
        self.in_flight = false;

        match result {
            Ok(contact) => {
                self.list_cache.invalidate();
                self.notifier
                    .notify(Notice::Success(format!("Contact {} saved", contact.name)));
                self.state = SessionState::Idle;
                self.editing = None;
                Ok(contact)
            }
            Err(e) => {
                self.notifier
                    .notify(Notice::Failure(format!("Failed to save contact: {}", e)));
                self.state = SessionState::Editing;
                Err(e.into())
            }
        }
    }

    /// Delete a contact by id.
    ///
    /// Session-less: triggered by the list's delete gesture, guarded by the
    /// same in-flight flag as saves.
    pub async fn delete(&mut self, id: &str) -> WorkflowResult<Contact> {
        if self.in_flight {
            return Err(WorkflowError::Busy);
        }

        self.in_flight = true;
        let result = self.repository.delete(id).await;
        self.in_flight = false;

        match result {
            Ok(contact) => {
                self.list_cache.invalidate();
                self.notifier
                    .notify(Notice::Success(format!("Contact {} deleted", contact.name)));
                Ok(contact)
            }
            Err(e) => {
                self.notifier
                    .notify(Notice::Failure(format!("Failed to delete contact: {}", e)));
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_validate_passes_and_trims() {
        let form = ContactForm {
            name: "  Ada  ".to_string(),
            last_contact_date: Some(date("2024-01-15")),
            image: None,
        };

        let (name, when) = ContactWorkflow::validate(&form, date("2024-06-01")).unwrap();
        assert_eq!(name, "Ada");
        assert_eq!(when, date("2024-01-15"));
    }

    #[test]
    fn test_validate_accumulates_all_violations() {
        let form = ContactForm {
            name: "   ".to_string(),
            last_contact_date: None,
            image: None,
        };

        let err = ContactWorkflow::validate(&form, date("2024-06-01")).unwrap_err();
        assert_eq!(
            err.fields,
            vec![FieldError::EmptyName, FieldError::MissingDate]
        );
    }

    #[test]
    fn test_validate_rejects_future_date() {
        let form = ContactForm {
            name: "Ada".to_string(),
            last_contact_date: Some(date("2024-06-02")),
            image: None,
        };

        let err = ContactWorkflow::validate(&form, date("2024-06-01")).unwrap_err();
        assert_eq!(err.fields, vec![FieldError::FutureDate]);

        // Today itself is allowed
        let form = ContactForm {
            name: "Ada".to_string(),
            last_contact_date: Some(date("2024-06-01")),
            image: None,
        };
        assert!(ContactWorkflow::validate(&form, date("2024-06-01")).is_ok());
    }

    #[test]
    fn test_notice_message() {
        assert_eq!(Notice::Success("saved".to_string()).message(), "saved");
        assert_eq!(Notice::Failure("broken".to_string()).message(), "broken");
    }
}
