/*
 * Responsibility
 * - URL layout of the API
 * - Served at the root (the front-end calls /vacantes, /me, ...)
 * - Which endpoints need a caller / a role is decided by each handler's
 *   extractor (AuthCtx, EmpresaCtx, EgresadoCtx), so one path can mix a
 *   public GET with a gated POST/PUT
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    auth::{login, sign_up},
    health::health,
    profiles::{get_me, update_me},
    vacancies::{
        apply_to_vacancy, create_vacancy, get_vacancy, list_applications, list_vacancies,
        update_vacancy,
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/signup", post(sign_up))
        .route("/auth/login", post(login))
        .route("/me", get(get_me).put(update_me))
        .route("/vacantes", get(list_vacancies).post(create_vacancy))
        .route(
            "/vacantes/{vacancy_id}",
            get(get_vacancy).put(update_vacancy),
        )
        .route("/vacantes/{vacancy_id}/aplicar", post(apply_to_vacancy))
        .route("/vacantes/{vacancy_id}/aplicaciones", get(list_applications))
}
