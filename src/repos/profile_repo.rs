/*
 * Responsibility
 * - profiles table (one row per user, created by a trigger at sign-up)
 * - Row visibility and ownership are enforced by the platform's policies
 */
use reqwest::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::{RETURN_REPRESENTATION, eq, error::RepoError, fetch_rows};
use crate::services::auth::Role;
use crate::services::supabase::SupabaseClient;

const TABLE: &str = "profiles";

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRow {
    pub id: Uuid,
    pub role: Role,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub graduation_year: Option<i32>,
    pub carrera: Option<String>,
    pub company_name: Option<String>,
    pub website: Option<String>,
}

/// Columns to overwrite; `None` leaves the column as is, `Some(None)`
/// writes NULL.
#[derive(Debug, Default, Serialize)]
pub struct ProfileChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<Option<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrera: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<Option<String>>,
}

pub async fn get(
    db: &SupabaseClient,
    bearer: &str,
    user_id: &str,
) -> Result<Option<ProfileRow>, RepoError> {
    let req = db
        .rest(Method::GET, TABLE, Some(bearer))
        .query(&[("select", "*".to_string()), ("id", eq(user_id)), ("limit", "1".to_string())]);

    let rows = fetch_rows::<ProfileRow>(req).await?;
    Ok(rows.into_iter().next())
}

pub async fn update(
    db: &SupabaseClient,
    bearer: &str,
    user_id: &str,
    changes: &ProfileChanges,
) -> Result<Option<ProfileRow>, RepoError> {
    let req = db
        .rest(Method::PATCH, TABLE, Some(bearer))
        .query(&[("id", eq(user_id))])
        .header(RETURN_REPRESENTATION.0, RETURN_REPRESENTATION.1)
        .json(changes);

    let rows = fetch_rows::<ProfileRow>(req).await?;
    Ok(rows.into_iter().next())
}
