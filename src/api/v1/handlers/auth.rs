/*
 * Responsibility
 * - POST /auth/signup, POST /auth/login
 * - Pass-through to the auth platform; a DB trigger creates the profile row
 */
use axum::{Json, extract::State};

use crate::{
    api::v1::dto::auth::{AuthResponse, LoginRequest, SignUpRequest},
    error::AppError,
    services::supabase::{SignUpOutcome, SupabaseError},
    state::AppState,
};

pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("VALIDATION_ERROR", msg))?;

    let outcome = state
        .supabase
        .sign_up(req.email.trim(), &req.password, &req.role)
        .await
        .map_err(|err| match err {
            e if e.is_user_already_registered() => {
                AppError::conflict("EMAIL_IN_USE", "Email already in use.")
            }
            SupabaseError::Auth { message, .. } => AppError::bad_request("SIGNUP_FAILED", message),
            e => AppError::from(e),
        })?;

    let res = match outcome {
        SignUpOutcome::Session { access_token } => AuthResponse::token(access_token),
        SignUpOutcome::ConfirmationRequired => {
            AuthResponse::message("User created. Please check your email for confirmation.")
        }
    };
    tracing::info!(role = %req.role, "user signed up");

    Ok(Json(res))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("VALIDATION_ERROR", msg))?;

    let access_token = state
        .supabase
        .sign_in(req.email.trim(), &req.password)
        .await
        .map_err(|err| match err {
            SupabaseError::Auth { status, .. } if status < 500 => AppError::InvalidCredentials,
            e => AppError::from(e),
        })?;

    Ok(Json(AuthResponse::token(access_token)))
}
