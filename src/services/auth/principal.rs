//! Identity extraction and the role gate.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{AccessTokenClaims, AuthError};

/// Application role carried under `user_metadata.role`.
///
/// Matching is exact and case-sensitive. Unknown values are kept as
/// `Other` so an identity with an unrecognized role still authenticates but
/// never passes a role gate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Empresa,
    Egresado,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Empresa => "empresa",
            Role::Egresado => "egresado",
            Role::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Other(_))
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "empresa" => Role::Empresa,
            "egresado" => Role::Egresado,
            other => Role::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Role::from(raw.as_str()))
    }
}

/// The authenticated identity of the current request.
///
/// Only constructible from complete claims; fields are read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    subject_id: String,
    email: String,
    role: Role,
}

impl Principal {
    /// Requires non-empty `sub`, `email` and `user_metadata.role`.
    /// An incomplete payload is indistinguishable from a bad token.
    pub fn from_claims(claims: &AccessTokenClaims) -> Result<Self, AuthError> {
        let subject_id = non_empty(claims.sub.as_deref(), "sub")?;
        let email = non_empty(claims.email.as_deref(), "email")?;
        let role = non_empty(claims.metadata_str("role"), "user_metadata.role")?;

        Ok(Self {
            subject_id: subject_id.to_string(),
            email: email.to_string(),
            role: Role::from(role),
        })
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Pass the principal through unchanged if it holds `expected`.
    pub fn require_role(self, expected: &Role) -> Result<Self, AuthError> {
        if !expected.is_known() || &self.role != expected {
            tracing::debug!(
                subject_id = %self.subject_id,
                role = %self.role,
                expected = %expected,
                "role check failed"
            );
            return Err(AuthError::Forbidden);
        }
        Ok(self)
    }
}

fn non_empty<'a>(value: Option<&'a str>, claim: &'static str) -> Result<&'a str, AuthError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => {
            tracing::warn!(claim, "access token is missing a required claim");
            Err(AuthError::Unauthenticated)
        }
    }
}
