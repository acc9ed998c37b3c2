use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("auth api error ({status}): {message}")]
    Auth {
        status: u16,
        code: Option<String>,
        message: String,
    },
}

impl SupabaseError {
    pub fn is_user_already_registered(&self) -> bool {
        match self {
            Self::Auth { code, message, .. } => {
                code.as_deref() == Some("user_already_exists")
                    || message.contains("already registered")
            }
            Self::Http(_) => false,
        }
    }

    /// Parse an auth API error body. Older and newer releases of the auth
    /// server use different field names for the same information.
    pub(crate) fn from_auth_body(status: u16, body: &str) -> Self {
        #[derive(Deserialize, Default)]
        struct AuthErrorBody {
            error_code: Option<String>,
            error: Option<String>,
            error_description: Option<String>,
            msg: Option<String>,
            message: Option<String>,
        }

        let parsed: AuthErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed
            .error_description
            .or(parsed.msg)
            .or(parsed.message)
            .or_else(|| parsed.error.clone())
            .unwrap_or_else(|| format!("auth request failed with status {status}"));

        Self::Auth {
            status,
            code: parsed.error_code.or(parsed.error),
            message,
        }
    }
}
