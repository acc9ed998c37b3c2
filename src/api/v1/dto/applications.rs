use serde::Serialize;
use uuid::Uuid;

use crate::repos::application_repo::ApplicationRow;

#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub vacancy_id: Uuid,
    pub status: String,
}

impl From<ApplicationRow> for ApplicationResponse {
    fn from(row: ApplicationRow) -> Self {
        Self {
            id: row.id,
            applicant_id: row.applicant_id,
            vacancy_id: row.vacancy_id,
            status: row.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub mensaje: &'static str,
}
