mod mock_supabase_client;
mod recording_notifier;

pub use mock_supabase_client::MockSupabaseClient;
pub use recording_notifier::RecordingNotifier;
