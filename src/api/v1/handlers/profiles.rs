/*
 * Responsibility
 * - GET /me, PUT /me for any authenticated caller
 * - The profile id is the token subject; the caller's token is forwarded so
 *   the platform only exposes the caller's own row
 */
use axum::{Json, extract::State};

use crate::{
    api::v1::{
        dto::profiles::{ProfileResponse, UpdateProfileRequest},
        extractors::AuthCtx,
    },
    error::AppError,
    repos::profile_repo,
    state::AppState,
};

pub async fn get_me(
    State(state): State<AppState>,
    ctx: AuthCtx,
) -> Result<Json<ProfileResponse>, AppError> {
    let row = profile_repo::get(&state.supabase, &ctx.access_token, ctx.principal.subject_id())
        .await?
        .ok_or(AppError::not_found("profile"))?;

    let mut res = ProfileResponse::from(row);
    // Profile rows need not mirror the auth email.
    if res.email.is_none() {
        res.email = Some(ctx.principal.email().to_string());
    }
    Ok(Json(res))
}

pub async fn update_me(
    State(state): State<AppState>,
    ctx: AuthCtx,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("VALIDATION_ERROR", msg))?;

    let row = profile_repo::update(
        &state.supabase,
        &ctx.access_token,
        ctx.principal.subject_id(),
        &req.into_changes(),
    )
    .await?
    .ok_or(AppError::not_found("profile"))?;

    Ok(Json(row.into()))
}
