//! CORS policy for the browser front-end.
//!
//! The front-end sends the bearer token from script, and cookies may be
//! involved, so credentials are allowed. That rules out wildcards: origins
//! come from an explicit allowlist, and allowed methods/headers mirror what
//! the preflight asks for.

use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::Config;

pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(&config.cors_allowed_origins))
}

fn layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|s| match HeaderValue::from_str(s) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %s, "ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .max_age(std::time::Duration::from_secs(60 * 10))
}
