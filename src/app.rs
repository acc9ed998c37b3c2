/*
 * Responsibility
 * - Tracing + panic hook
 * - Config → dependencies → Router
 * - Middleware (CORS, request id, tracing, limits)
 * - axum::serve()
 */
use std::{panic, process};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    middleware,
    services::{auth::build_token_verifier, supabase::SupabaseClient},
    state::AppState,
};

fn init_tracing() {
    // RUST_LOG=info,egresados_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(?config, "starting API");

    let state = build_state(&config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &Config) -> Result<AppState> {
    let auth = build_token_verifier(config);
    let supabase = SupabaseClient::new(
        config.supabase_url.clone(),
        &config.supabase_key,
        config.upstream_timeout,
    )
    .context("failed to build hosted platform client")?;

    Ok(AppState::new(auth, supabase))
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::v1::routes().with_state(state);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router)
}
