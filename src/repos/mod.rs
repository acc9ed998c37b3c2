pub mod application_repo;
pub mod error;
pub mod profile_repo;
pub mod vacancy_repo;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::repos::error::RepoError;

/// Ask the data API to echo written rows back.
pub(crate) const RETURN_REPRESENTATION: (&str, &str) = ("Prefer", "return=representation");

pub(crate) fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

/// Send a data-API request and decode a JSON array of rows.
pub(crate) async fn fetch_rows<T: DeserializeOwned>(req: RequestBuilder) -> Result<Vec<T>, RepoError> {
    let resp = req.send().await?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(RepoError::from_status_and_body(status.as_u16(), &body));
    }
    Ok(resp.json::<Vec<T>>().await?)
}
