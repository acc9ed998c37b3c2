/*
 * Responsibility
 * - Sign-up / login request and response DTOs
 * - validate(): shape checks only; the auth platform owns password rules
 */
use serde::{Deserialize, Serialize};

use crate::services::auth::Role;

fn validate_email(email: &str) -> Result<(), &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("email is required");
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err("email is invalid"),
    }
}

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl SignUpRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err("password is required");
        }
        if !self.role.is_known() {
            return Err("role must be 'empresa' or 'egresado'");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err("password is required");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: Option<String>,
    pub token_type: &'static str,
    pub message: Option<String>,
}

impl AuthResponse {
    pub fn token(access_token: String) -> Self {
        Self {
            access_token: Some(access_token),
            token_type: "bearer",
            message: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            access_token: None,
            token_type: "bearer",
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sign_up(value: serde_json::Value) -> SignUpRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn sign_up_accepts_known_roles() {
        for role in ["empresa", "egresado"] {
            let req = sign_up(json!({ "email": "a@b.com", "password": "pw", "role": role }));
            assert_eq!(req.validate(), Ok(()));
        }
    }

    #[test]
    fn sign_up_rejects_unknown_or_miscased_roles() {
        for role in ["admin", "Empresa", ""] {
            let req = sign_up(json!({ "email": "a@b.com", "password": "pw", "role": role }));
            assert!(req.validate().is_err(), "{role:?}");
        }
    }

    #[test]
    fn sign_up_requires_email_and_password() {
        let req = sign_up(json!({ "email": "", "password": "pw", "role": "empresa" }));
        assert_eq!(req.validate(), Err("email is required"));

        let req = sign_up(json!({ "email": "nobody", "password": "pw", "role": "empresa" }));
        assert_eq!(req.validate(), Err("email is invalid"));

        let req = sign_up(json!({ "email": "a@b.com", "password": "", "role": "empresa" }));
        assert_eq!(req.validate(), Err("password is required"));
    }

    #[test]
    fn auth_response_shapes() {
        assert_eq!(
            serde_json::to_value(AuthResponse::token("t".into())).unwrap(),
            json!({ "access_token": "t", "token_type": "bearer", "message": null })
        );
        assert_eq!(
            serde_json::to_value(AuthResponse::message("check your email")).unwrap(),
            json!({ "access_token": null, "token_type": "bearer", "message": "check your email" })
        );
    }
}
