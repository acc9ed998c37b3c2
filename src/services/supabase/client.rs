use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::SupabaseError;
use crate::services::auth::Role;

/// Thin client over the hosted platform's auth (`/auth/v1`) and data
/// (`/rest/v1`) APIs. Cheap to clone.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Result of a sign-up. Projects that require email confirmation do not
/// hand out a session until the address is confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    Session { access_token: String },
    ConfirmationRequired,
}

#[derive(Deserialize)]
struct SessionBody {
    #[serde(default)]
    access_token: Option<String>,
}

impl SupabaseClient {
    pub fn new(base_url: Url, api_key: &str, timeout: Duration) -> Result<Self, SupabaseError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        // `Url::join` drops the last path segment unless the base ends in '/'.
        let mut base_url = base_url;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> Url {
        // `path` is always a crate-internal relative literal.
        self.base_url
            .join(path)
            .unwrap_or_else(|_| self.base_url.clone())
    }

    /// Request against a data-API table.
    ///
    /// With `bearer = Some(token)` the caller's own token is forwarded so
    /// the platform's row-level policies evaluate as that user; `None`
    /// falls back to the project key (anonymous access).
    pub fn rest(&self, method: Method, table: &str, bearer: Option<&str>) -> RequestBuilder {
        let url = self.endpoint(&format!("rest/v1/{table}"));
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(bearer.unwrap_or(self.api_key.as_str()))
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        role: &Role,
    ) -> Result<SignUpOutcome, SupabaseError> {
        let resp = self
            .http
            .post(self.endpoint("auth/v1/signup"))
            .header("apikey", &self.api_key)
            .json(&json!({
                "email": email,
                "password": password,
                "data": { "role": role.as_str() },
            }))
            .send()
            .await?;

        let body: SessionBody = Self::auth_json(resp).await?;
        Ok(match body.access_token {
            Some(access_token) => SignUpOutcome::Session { access_token },
            None => SignUpOutcome::ConfirmationRequired,
        })
    }

    /// Password grant. Returns the session's access token.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<String, SupabaseError> {
        let resp = self
            .http
            .post(self.endpoint("auth/v1/token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let body: SessionBody = Self::auth_json(resp).await?;
        body.access_token.ok_or_else(|| SupabaseError::Auth {
            status: 200,
            code: None,
            message: "sign-in response did not include a session".to_string(),
        })
    }

    async fn auth_json<T: for<'de> Deserialize<'de>>(
        resp: reqwest::Response,
    ) -> Result<T, SupabaseError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SupabaseError::from_auth_body(status.as_u16(), &body));
        }
        Ok(resp.json::<T>().await?)
    }
}
