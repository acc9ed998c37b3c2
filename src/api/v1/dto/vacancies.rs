use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::nullable;
use crate::repos::vacancy_repo::{NewVacancy, VacancyChanges, VacancyRow};

#[derive(Debug, Serialize)]
pub struct VacancyResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub salario: Option<f64>,
    pub location: Option<String>,
    pub modality: Option<String>,
    pub is_active: bool,
}

impl From<VacancyRow> for VacancyResponse {
    fn from(row: VacancyRow) -> Self {
        Self {
            id: row.id,
            company_id: row.company_id,
            title: row.title,
            description: row.description,
            salario: row.salario,
            location: row.location,
            modality: row.modality,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListVacanciesQuery {
    pub query: Option<String>,
}

fn validate_salary(salario: Option<f64>) -> Result<(), &'static str> {
    match salario {
        Some(s) if !s.is_finite() || s < 0.0 => Err("salario must be a non-negative number"),
        _ => Ok(()),
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateVacancyRequest {
    pub title: String,
    pub description: String,
    pub salario: Option<f64>,
    pub location: Option<String>,
    pub modality: Option<String>,
}

impl CreateVacancyRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.description.trim().is_empty() {
            return Err("description is required");
        }
        validate_salary(self.salario)
    }

    pub fn into_new(self) -> NewVacancy {
        NewVacancy {
            title: self.title,
            description: self.description,
            salario: self.salario,
            location: self.location,
            modality: self.modality,
        }
    }
}

/// `title`, `description` and `is_active` are NOT NULL columns, so `null`
/// there means "not provided". The other fields accept `null` to clear.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateVacancyRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub salario: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub modality: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl UpdateVacancyRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.is_none()
            && self.description.is_none()
            && self.salario.is_none()
            && self.location.is_none()
            && self.modality.is_none()
            && self.is_active.is_none()
        {
            return Err("no fields to update");
        }
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }
        if let Some(description) = &self.description
            && description.trim().is_empty()
        {
            return Err("description cannot be empty");
        }
        validate_salary(self.salario.flatten())
    }

    pub fn into_changes(self) -> VacancyChanges {
        VacancyChanges {
            title: self.title,
            description: self.description,
            salario: self.salario,
            location: self.location,
            modality: self.modality,
            is_active: self.is_active,
        }
    }
}
