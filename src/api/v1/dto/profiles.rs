use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::nullable;
use crate::repos::profile_repo::{ProfileChanges, ProfileRow};
use crate::services::auth::Role;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub role: Role,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub graduation_year: Option<i32>,
    pub carrera: Option<String>,
    pub company_name: Option<String>,
    pub website: Option<String>,
}

impl From<ProfileRow> for ProfileResponse {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            role: row.role,
            email: row.email,
            full_name: row.full_name,
            graduation_year: row.graduation_year,
            carrera: row.carrera,
            company_name: row.company_name,
            website: row.website,
        }
    }
}

/// Partial update of the caller's own profile. Absent fields are left
/// untouched, `null` clears the column; role and email cannot be changed here.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub full_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub graduation_year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub carrera: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub company_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub website: Option<Option<String>>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.full_name.is_none()
            && self.graduation_year.is_none()
            && self.carrera.is_none()
            && self.company_name.is_none()
            && self.website.is_none()
        {
            return Err("no fields to update");
        }
        if let Some(Some(year)) = self.graduation_year
            && !(1900..=2200).contains(&year)
        {
            return Err("graduation_year is out of range");
        }
        Ok(())
    }

    pub fn into_changes(self) -> ProfileChanges {
        ProfileChanges {
            full_name: self.full_name,
            graduation_year: self.graduation_year,
            carrera: self.carrera,
            company_name: self.company_name,
            website: self.website,
        }
    }
}
