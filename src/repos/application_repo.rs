/*
 * Responsibility
 * - applications table (graduate → vacancy)
 * - One application per (applicant, vacancy) is a database UNIQUE constraint
 */
use reqwest::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::{RETURN_REPRESENTATION, eq, error::RepoError, fetch_rows};
use crate::services::supabase::SupabaseClient;

const TABLE: &str = "applications";

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub vacancy_id: Uuid,
    pub status: String,
}

pub async fn create(
    db: &SupabaseClient,
    bearer: &str,
    applicant_id: &str,
    vacancy_id: Uuid,
) -> Result<ApplicationRow, RepoError> {
    #[derive(Serialize)]
    struct InsertRow<'a> {
        applicant_id: &'a str,
        vacancy_id: Uuid,
    }

    let req = db
        .rest(Method::POST, TABLE, Some(bearer))
        .header(RETURN_REPRESENTATION.0, RETURN_REPRESENTATION.1)
        .json(&InsertRow {
            applicant_id,
            vacancy_id,
        });

    fetch_rows::<ApplicationRow>(req)
        .await?
        .into_iter()
        .next()
        .ok_or(RepoError::NoRows)
}

/// Only the owning company sees rows here; for anyone else the policy
/// filters the result down to an empty list.
pub async fn list_by_vacancy(
    db: &SupabaseClient,
    bearer: &str,
    vacancy_id: Uuid,
) -> Result<Vec<ApplicationRow>, RepoError> {
    let req = db
        .rest(Method::GET, TABLE, Some(bearer))
        .query(&[("select", "*".to_string()), ("vacancy_id", eq(vacancy_id))]);

    fetch_rows(req).await
}
