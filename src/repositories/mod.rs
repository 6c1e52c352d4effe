mod supabase_contact_repository;
mod traits;

pub use supabase_contact_repository::SupabaseContactRepository;
pub use traits::ContactRepository;
