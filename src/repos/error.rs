/*
 * Responsibility
 * - What the repos tell the layers above (conflict, policy denial, ...)
 * - Translate data-API error bodies into those meanings
 */
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("data api request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("conflict")]
    Conflict,
    /// A referenced row does not exist.
    #[error("referenced row does not exist")]
    MissingReference,
    #[error("denied by row-level policy")]
    Forbidden,
    #[error("write returned no rows")]
    NoRows,
    #[error("data api error ({status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },
}

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const INSUFFICIENT_PRIVILEGE: &str = "42501";

impl RepoError {
    pub fn from_status_and_body(status: u16, body: &str) -> Self {
        #[derive(Deserialize, Default)]
        struct ApiErrorBody {
            code: Option<String>,
            message: Option<String>,
        }

        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
        match parsed.code.as_deref() {
            Some(UNIQUE_VIOLATION) => RepoError::Conflict,
            Some(FOREIGN_KEY_VIOLATION) => RepoError::MissingReference,
            Some(INSUFFICIENT_PRIVILEGE) => RepoError::Forbidden,
            _ => RepoError::Api {
                status,
                code: parsed.code,
                message: parsed
                    .message
                    .unwrap_or_else(|| format!("request failed with status {status}")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_is_conflict() {
        let err = RepoError::from_status_and_body(
            409,
            r#"{"code":"23505","details":"Key (applicant_id, vacancy_id) already exists.","hint":null,"message":"duplicate key value violates unique constraint"}"#,
        );
        assert!(matches!(err, RepoError::Conflict));
    }

    #[test]
    fn foreign_key_violation_is_missing_reference() {
        let err = RepoError::from_status_and_body(
            409,
            r#"{"code":"23503","details":"Key (vacancy_id)=(6f1c2b8e-8a4e-4f55-9a43-1f0f3c9d2e10) is not present in table \"vacancies\".","hint":null,"message":"insert or update on table \"applications\" violates foreign key constraint"}"#,
        );
        assert!(matches!(err, RepoError::MissingReference));
    }

    #[test]
    fn policy_violation_is_forbidden() {
        let err = RepoError::from_status_and_body(
            403,
            r#"{"code":"42501","message":"new row violates row-level security policy for table \"vacancies\""}"#,
        );
        assert!(matches!(err, RepoError::Forbidden));
    }

    #[test]
    fn other_errors_keep_status_and_message() {
        let err = RepoError::from_status_and_body(400, r#"{"code":"22P02","message":"invalid input syntax"}"#);
        match err {
            RepoError::Api { status, code, message } => {
                assert_eq!(status, 400);
                assert_eq!(code.as_deref(), Some("22P02"));
                assert_eq!(message, "invalid input syntax");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
