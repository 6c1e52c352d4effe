//! contact-desk - Main entry point
//!
//! Wires the full stack (client, image store, repository, workflow) and
//! prints the contact list. The interactive UI lives elsewhere; this binary
//! is the smoke surface for a configured deployment.

use anyhow::Result;
use contact_desk::client::{AsyncSupabaseClient, AsyncSupabaseClientImpl};
use contact_desk::domain::format_date;
use contact_desk::repositories::{ContactRepository, SupabaseContactRepository};
use contact_desk::services::TracingNotifier;
use contact_desk::storage::{BucketImageStore, ImageStore};
use contact_desk::{Config, ContactWorkflow, SupabaseClient};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging (stderr only, the contact list goes to stdout)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!("Connecting to {}", config.supabase_url);

    // Initialize the client stack
    let sync_client = SupabaseClient::new(&config);
    let client = Arc::new(AsyncSupabaseClientImpl::new(sync_client)) as Arc<dyn AsyncSupabaseClient>;

    let images = Arc::new(BucketImageStore::new(client.clone())) as Arc<dyn ImageStore>;
    let repository =
        Arc::new(SupabaseContactRepository::new(client, images)) as Arc<dyn ContactRepository>;

    let workflow = ContactWorkflow::new(
        repository,
        Arc::new(TracingNotifier),
        config.list_cache_ttl_secs,
    );

    let contacts = workflow.contacts().await?;
    info!("Fetched {} contacts", contacts.len());

    for contact in &contacts {
        let last_seen = format_date(&contact.last_contact_date.to_string());
        let avatar = if contact.has_avatar() { "*" } else { " " };
        println!("{} {:<30} last contact {}", avatar, contact.name, last_seen);
    }

    Ok(())
}
