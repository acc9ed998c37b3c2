/*
 * Responsibility
 * - Load settings from the environment (.env is read first when present)
 * - Validate them once at startup: a missing required value aborts boot
 * - Keep secrets (API key, JWT secret) out of Debug output
 */
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<&str>) -> Self {
        match raw
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub supabase_url: Url,
    pub supabase_key: String,
    pub upstream_timeout: Duration,

    pub jwt_secret: String,
    /// `None` disables the `aud` check.
    pub jwt_audience: Option<String>,
    pub access_token_leeway_seconds: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("supabase_url", &self.supabase_url.as_str())
            .field("upstream_timeout", &self.upstream_timeout)
            .field("jwt_audience", &self.jwt_audience)
            .field("access_token_leeway_seconds", &self.access_token_leeway_seconds)
            .finish_non_exhaustive()
    }
}

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_JWT_AUDIENCE: &str = "authenticated";

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid("PORT"))?,
            None => DEFAULT_PORT,
        };
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let supabase_url = Url::parse(&required("SUPABASE_URL")?)
            .map_err(|_| ConfigError::Invalid("SUPABASE_URL"))?;
        let supabase_key = required("SUPABASE_KEY")?;

        let upstream_timeout = Duration::from_secs(parse_or(
            lookup("UPSTREAM_TIMEOUT_SECONDS"),
            "UPSTREAM_TIMEOUT_SECONDS",
            10,
        )?);

        let jwt_secret = required("SUPABASE_JWT_SECRET")?;

        // Present but empty means "do not check aud".
        let jwt_audience = match lookup("SUPABASE_JWT_AUDIENCE") {
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(raw.trim().to_string()),
            None => Some(DEFAULT_JWT_AUDIENCE.to_string()),
        };

        let access_token_leeway_seconds = parse_or(
            lookup("ACCESS_TOKEN_LEEWAY_SECONDS"),
            "ACCESS_TOKEN_LEEWAY_SECONDS",
            0,
        )?;

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            supabase_url,
            supabase_key,
            upstream_timeout,
            jwt_secret,
            jwt_audience,
            access_token_leeway_seconds,
        })
    }
}

fn parse_or(raw: Option<String>, key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match raw {
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}
