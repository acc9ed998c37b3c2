/// Factory: build the shared `TokenVerifier` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::TokenVerifier;

pub fn build_token_verifier(config: &Config) -> Arc<TokenVerifier> {
    Arc::new(TokenVerifier::new(
        &config.jwt_secret,
        config.jwt_audience.as_deref(),
        config.access_token_leeway_seconds,
    ))
}
