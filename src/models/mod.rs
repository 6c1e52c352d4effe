//! Data models for the contact manager.
//!
//! This module contains the data structures representing contact rows and
//! the image payloads that travel with them.

pub mod contact;

pub use contact::{Contact, ContactChanges, ContactDraft, ImageFile, NewContactRow, StoredImage};
