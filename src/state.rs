/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - auth: the token verifier (secret loaded once, read-only afterwards)
 *   - supabase: client for the hosted auth/data APIs
 * - Cloned per request, so everything inside is Arc/Clone cheap
 */
use std::sync::Arc;

use crate::services::{auth::TokenVerifier, supabase::SupabaseClient};

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<TokenVerifier>,
    pub supabase: SupabaseClient,
}

impl AppState {
    pub fn new(auth: Arc<TokenVerifier>, supabase: SupabaseClient) -> Self {
        Self { auth, supabase }
    }
}
