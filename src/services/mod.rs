//! Application service layer.
//!
//! The workflow contains the business logic driving an editing session and
//! orchestrates the repository; it is the boundary the UI talks to.

mod contact_workflow;

pub use contact_workflow::{
    ContactForm, ContactWorkflow, Notice, Notifier, SessionState, TracingNotifier,
};
