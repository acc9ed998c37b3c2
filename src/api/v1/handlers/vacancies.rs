/*
 * Responsibility
 * - /vacantes: public listing/search and detail
 * - create/update/list-applications for companies (empresa)
 * - apply for graduates (egresado)
 * - Ownership of a vacancy is the platform's row-level policy, not checked here
 */
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::{
            applications::{ApplicationResponse, ApplyResponse},
            vacancies::{
                CreateVacancyRequest, ListVacanciesQuery, UpdateVacancyRequest, VacancyResponse,
            },
        },
        extractors::{EgresadoCtx, EmpresaCtx, RequireRole},
    },
    error::AppError,
    repos::{application_repo, error::RepoError, vacancy_repo},
    state::AppState,
};

pub async fn list_vacancies(
    State(state): State<AppState>,
    Query(q): Query<ListVacanciesQuery>,
) -> Result<Json<Vec<VacancyResponse>>, AppError> {
    let rows = vacancy_repo::list_active(&state.supabase, q.query.as_deref()).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn get_vacancy(
    State(state): State<AppState>,
    Path(vacancy_id): Path<Uuid>,
) -> Result<Json<VacancyResponse>, AppError> {
    let row = vacancy_repo::get(&state.supabase, vacancy_id)
        .await?
        .ok_or(AppError::not_found("vacancy"))?;

    Ok(Json(row.into()))
}

pub async fn create_vacancy(
    State(state): State<AppState>,
    RequireRole(ctx, _): EmpresaCtx,
    Json(req): Json<CreateVacancyRequest>,
) -> Result<(StatusCode, Json<VacancyResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("VALIDATION_ERROR", msg))?;

    let row = vacancy_repo::create(
        &state.supabase,
        &ctx.access_token,
        ctx.principal.subject_id(),
        &req.into_new(),
    )
    .await?;

    tracing::info!(vacancy_id = %row.id, company_id = %row.company_id, "vacancy created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn update_vacancy(
    State(state): State<AppState>,
    RequireRole(ctx, _): EmpresaCtx,
    Path(vacancy_id): Path<Uuid>,
    Json(req): Json<UpdateVacancyRequest>,
) -> Result<Json<VacancyResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("VALIDATION_ERROR", msg))?;

    // Zero rows back means absent or owned by another company; the two are
    // deliberately indistinguishable.
    let row = vacancy_repo::update(
        &state.supabase,
        &ctx.access_token,
        vacancy_id,
        &req.into_changes(),
    )
    .await?
    .ok_or(AppError::not_found("vacancy"))?;

    Ok(Json(row.into()))
}

pub async fn apply_to_vacancy(
    State(state): State<AppState>,
    RequireRole(ctx, _): EgresadoCtx,
    Path(vacancy_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ApplyResponse>), AppError> {
    application_repo::create(
        &state.supabase,
        &ctx.access_token,
        ctx.principal.subject_id(),
        vacancy_id,
    )
    .await
    .map_err(|err| match err {
        RepoError::Conflict => {
            AppError::conflict("ALREADY_APPLIED", "already applied to this vacancy")
        }
        RepoError::MissingReference => AppError::not_found("vacancy"),
        e => e.into(),
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ApplyResponse {
            mensaje: "Aplicación exitosa",
        }),
    ))
}

pub async fn list_applications(
    State(state): State<AppState>,
    RequireRole(ctx, _): EmpresaCtx,
    Path(vacancy_id): Path<Uuid>,
) -> Result<Json<Vec<ApplicationResponse>>, AppError> {
    let rows =
        application_repo::list_by_vacancy(&state.supabase, &ctx.access_token, vacancy_id).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
