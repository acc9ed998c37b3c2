/*
 * Responsibility
 * - HTTP client for the hosted platform (auth API + data API)
 * - No business rules here: callers decide what the responses mean
 */
mod client;
mod error;

pub use client::{SignUpOutcome, SupabaseClient};
pub use error::SupabaseError;
