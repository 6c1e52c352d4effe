//! contact-desk - backend core of a small contact manager with avatar images.
//!
//! The crate couples a hosted `contacts` table with an object-storage bucket:
//! every contact row may reference one uploaded avatar blob, and the
//! create/update/delete workflow keeps that reference consistent, cleaning up
//! stale blobs best-effort.
//!
//! # Architecture
//!
//! - **models**: Contact rows, drafts and image payloads
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **client**: HTTP client for the hosted table and storage APIs
//! - **domain**: Pure helpers (date formatting, locator parsing)
//! - **storage**: Image store adapter over the avatar bucket
//! - **repositories**: Contact persistence composed with the image store
//! - **services**: The editing-session workflow the UI drives
//! - **cache**: TTL cache behind the contact list
//! - **metrics**: Counters for backend traffic

pub mod cache;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod services;
pub mod storage;

pub use cache::TimedCache;
pub use client::{AsyncSupabaseClient, AsyncSupabaseClientImpl, SupabaseClient};
pub use config::Config;
pub use domain::{extract_storage_path, format_date, format_date_for_input};
pub use error::{
    CleanupError, ConfigError, FieldError, RepositoryError, StoreApiError, ValidationError,
    WorkflowError,
};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{Contact, ContactDraft, ImageFile, StoredImage};
pub use repositories::{ContactRepository, SupabaseContactRepository};
pub use services::{ContactForm, ContactWorkflow, Notice, Notifier, SessionState, TracingNotifier};
pub use storage::{BucketImageStore, ImageStore};
