/*
 * Responsibility
 * - vacancies table: public listing/search, owner-only writes
 * - Ownership (company_id = caller) is checked by the platform's policies
 */
use reqwest::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::{RETURN_REPRESENTATION, eq, error::RepoError, fetch_rows};
use crate::services::supabase::SupabaseClient;

const TABLE: &str = "vacancies";

#[derive(Debug, Clone, Deserialize)]
pub struct VacancyRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub salario: Option<f64>,
    pub location: Option<String>,
    pub modality: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct NewVacancy {
    pub title: String,
    pub description: String,
    pub salario: Option<f64>,
    pub location: Option<String>,
    pub modality: Option<String>,
}

/// `None` leaves a column as is; `Some(None)` writes NULL.
#[derive(Debug, Default, Serialize)]
pub struct VacancyChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salario: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modality: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Full-text filter over `title` (English configuration). The term is
/// quoted so it is matched as one phrase; `\` and `'` are the tsquery
/// escape characters inside quotes.
fn title_search_filter(term: &str) -> String {
    let escaped = term.replace('\\', "\\\\").replace('\'', "''");
    format!("fts(english).'{escaped}'")
}

/// Active vacancies, newest first, optionally narrowed by a title search.
pub async fn list_active(
    db: &SupabaseClient,
    search: Option<&str>,
) -> Result<Vec<VacancyRow>, RepoError> {
    let mut req = db.rest(Method::GET, TABLE, None).query(&[
        ("select", "*".to_string()),
        ("is_active", eq(true)),
        ("order", "created_at.desc".to_string()),
    ]);

    if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
        req = req.query(&[("title", title_search_filter(term))]);
    }

    fetch_rows(req).await
}

pub async fn get(db: &SupabaseClient, vacancy_id: Uuid) -> Result<Option<VacancyRow>, RepoError> {
    let req = db.rest(Method::GET, TABLE, None).query(&[
        ("select", "*".to_string()),
        ("id", eq(vacancy_id)),
        ("limit", "1".to_string()),
    ]);

    let rows = fetch_rows::<VacancyRow>(req).await?;
    Ok(rows.into_iter().next())
}

pub async fn create(
    db: &SupabaseClient,
    bearer: &str,
    company_id: &str,
    vacancy: &NewVacancy,
) -> Result<VacancyRow, RepoError> {
    #[derive(Serialize)]
    struct InsertRow<'a> {
        company_id: &'a str,
        #[serde(flatten)]
        vacancy: &'a NewVacancy,
    }

    let req = db
        .rest(Method::POST, TABLE, Some(bearer))
        .header(RETURN_REPRESENTATION.0, RETURN_REPRESENTATION.1)
        .json(&InsertRow { company_id, vacancy });

    fetch_rows::<VacancyRow>(req)
        .await?
        .into_iter()
        .next()
        .ok_or(RepoError::NoRows)
}

/// Returns `None` when no row matched (absent, or not owned by the caller).
pub async fn update(
    db: &SupabaseClient,
    bearer: &str,
    vacancy_id: Uuid,
    changes: &VacancyChanges,
) -> Result<Option<VacancyRow>, RepoError> {
    let req = db
        .rest(Method::PATCH, TABLE, Some(bearer))
        .query(&[("id", eq(vacancy_id))])
        .header(RETURN_REPRESENTATION.0, RETURN_REPRESENTATION.1)
        .json(changes);

    let rows = fetch_rows::<VacancyRow>(req).await?;
    Ok(rows.into_iter().next())
}
