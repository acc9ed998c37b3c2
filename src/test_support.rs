//! Token minting and state helpers shared by unit tests.

use std::time::Duration;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};

use crate::services::auth::TokenVerifier;
use crate::services::supabase::SupabaseClient;
use crate::state::AppState;

pub const SECRET: &str = "test-jwt-secret-with-enough-entropy";

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Claims shaped like the hosted platform's access tokens, valid for 10 min.
pub fn claims(sub: &str, email: &str, role: &str) -> Value {
    json!({
        "sub": sub,
        "email": email,
        "role": "authenticated",
        "user_metadata": { "role": role },
        "exp": now() + 600,
        "iat": now(),
    })
}

pub fn mint(claims: Value) -> String {
    mint_with(Algorithm::HS256, SECRET, claims)
}

pub fn mint_with(alg: Algorithm, secret: &str, claims: Value) -> String {
    jsonwebtoken::encode(
        &Header::new(alg),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// `alg: none` token with an empty signature.
pub fn unsigned(claims: Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(json!({ "alg": "none", "typ": "JWT" }).to_string());
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.")
}

/// Serve `platform` on an ephemeral local port and return state whose
/// platform client talks to it.
pub async fn state_with_platform(platform: axum::Router) -> AppState {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, platform).await.unwrap();
    });

    let supabase = SupabaseClient::new(
        format!("http://{addr}").parse().unwrap(),
        "test-anon-key",
        Duration::from_secs(5),
    )
    .unwrap();

    AppState::new(
        std::sync::Arc::new(TokenVerifier::new(SECRET, None, 0)),
        supabase,
    )
}

/// State whose platform client points at a closed port; only usable for
/// paths that never reach the platform.
pub fn state() -> AppState {
    let supabase = SupabaseClient::new(
        "http://127.0.0.1:9".parse().unwrap(),
        "test-anon-key",
        Duration::from_millis(200),
    )
    .unwrap();

    AppState::new(
        std::sync::Arc::new(TokenVerifier::new(SECRET, None, 0)),
        supabase,
    )
}
