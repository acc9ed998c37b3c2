pub mod auth;
pub mod supabase;
