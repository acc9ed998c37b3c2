use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};

use crate::error::AppError;
use crate::services::auth::{AuthError, Principal, Role};
use crate::state::AppState;

use super::AuthCtx;

/// Raw token from `Authorization: Bearer <token>` (scheme is case-insensitive).
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// header → verify → extract. A request without a bearer token is rejected
/// before any decoding happens.
impl FromRequestParts<AppState> for AuthCtx {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AuthError::Unauthenticated)?;
        let claims = state.auth.verify(token)?;
        let principal = Principal::from_claims(&claims)?;
        tracing::debug!(
            subject_id = %principal.subject_id(),
            role = %principal.role(),
            "request authenticated"
        );

        Ok(AuthCtx {
            principal,
            access_token: token.to_string(),
        })
    }
}

/// A fixed role an endpoint requires.
pub trait RequiredRole {
    const ROLE: Role;
}

pub struct Empresa;
pub struct Egresado;

impl RequiredRole for Empresa {
    const ROLE: Role = Role::Empresa;
}

impl RequiredRole for Egresado {
    const ROLE: Role = Role::Egresado;
}

/// `AuthCtx` whose principal is known to hold `R::ROLE`.
///
/// Runs the same extraction as `AuthCtx`, then the role check; 403 when the
/// caller is authenticated but holds another role.
pub struct RequireRole<R>(pub AuthCtx, pub PhantomData<fn() -> R>);

pub type EmpresaCtx = RequireRole<Empresa>;
pub type EgresadoCtx = RequireRole<Egresado>;

impl<R: RequiredRole> FromRequestParts<AppState> for RequireRole<R> {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthCtx {
            principal,
            access_token,
        } = AuthCtx::from_request_parts(parts, state).await?;
        let principal = principal.require_role(&R::ROLE)?;

        Ok(RequireRole(
            AuthCtx {
                principal,
                access_token,
            },
            PhantomData,
        ))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Json, Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
        response::Response,
        routing::get,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::test_support;

    async fn whoami(ctx: AuthCtx) -> Json<Value> {
        Json(json!({
            "subject_id": ctx.principal.subject_id(),
            "email": ctx.principal.email(),
            "role": ctx.principal.role(),
        }))
    }

    async fn empresa_only(RequireRole(ctx, _): EmpresaCtx) -> String {
        ctx.principal.subject_id().to_string()
    }

    async fn egresado_only(RequireRole(ctx, _): EgresadoCtx) -> String {
        ctx.principal.subject_id().to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/me", get(whoami))
            .route("/empresa", get(empresa_only))
            .route("/egresado", get(egresado_only))
            .with_state(test_support::state())
    }

    async fn call(path: &str, authorization: Option<&str>) -> Response {
        let mut req = Request::builder().uri(path);
        if let Some(value) = authorization {
            req = req.header(header::AUTHORIZATION, value);
        }
        app().oneshot(req.body(Body::empty()).unwrap()).await.unwrap()
    }

    async fn body_json(res: Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }

    #[test]
    fn bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        for (raw, expected) in [
            ("Bearer abc", Some("abc")),
            ("bearer abc", Some("abc")),
            ("Bearer   abc  ", Some("abc")),
            ("Bearer ", None),
            ("Bearer", None),
            ("Basic dXNlcjpwYXNz", None),
            ("abc", None),
        ] {
            headers.insert(header::AUTHORIZATION, raw.parse().unwrap());
            assert_eq!(bearer_token(&headers), expected, "{raw:?}");
        }
    }

    #[tokio::test]
    async fn missing_header_is_401_with_challenge() {
        let res = call("/me", None).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(res.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_401() {
        let res = call("/me", Some("Basic dXNlcjpwYXNz")).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_token_yields_principal() {
        let token = test_support::mint(test_support::claims("u1", "a@b.com", "empresa"));
        let res = call("/me", Some(&bearer(&token))).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            body_json(res).await,
            json!({ "subject_id": "u1", "email": "a@b.com", "role": "empresa" })
        );
    }

    #[tokio::test]
    async fn empresa_token_passes_empresa_gate_only() {
        let token = test_support::mint(test_support::claims("u1", "a@b.com", "empresa"));

        let res = call("/empresa", Some(&bearer(&token))).await;
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"u1");

        let res = call("/egresado", Some(&bearer(&token))).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert!(res.headers().get(header::WWW_AUTHENTICATE).is_none());
    }

    #[tokio::test]
    async fn egresado_token_passes_egresado_gate_only() {
        let token = test_support::mint(test_support::claims("u2", "g@b.com", "egresado"));

        assert_eq!(call("/egresado", Some(&bearer(&token))).await.status(), StatusCode::OK);
        assert_eq!(call("/empresa", Some(&bearer(&token))).await.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn gates_reject_bad_tokens_as_unauthenticated_not_forbidden() {
        let mut expired = test_support::claims("u1", "a@b.com", "empresa");
        expired["exp"] = json!(test_support::now() - 60);

        let tokens = [
            test_support::mint(expired),
            test_support::mint_with(
                jsonwebtoken::Algorithm::HS256,
                "wrong-secret",
                test_support::claims("u1", "a@b.com", "empresa"),
            ),
            test_support::mint(json!({
                "sub": "u1",
                "email": "a@b.com",
                "exp": test_support::now() + 600
            })),
        ];

        for token in tokens {
            let res = call("/empresa", Some(&bearer(&token))).await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(res.headers()[header::WWW_AUTHENTICATE], "Bearer");
        }
    }

    #[tokio::test]
    async fn failure_bodies_do_not_reveal_the_cause() {
        let mut expired = test_support::claims("u1", "a@b.com", "empresa");
        expired["exp"] = json!(test_support::now() - 60);

        let expired_body = body_json(
            call("/me", Some(&bearer(&test_support::mint(expired)))).await,
        )
        .await;
        let missing_body = body_json(call("/me", None).await).await;
        let garbage_body = body_json(call("/me", Some("Bearer not-a-jwt")).await).await;

        assert_eq!(expired_body, missing_body);
        assert_eq!(garbage_body, missing_body);
    }

    #[tokio::test]
    async fn same_token_yields_identical_principal_every_time() {
        let token = test_support::mint(test_support::claims("u1", "a@b.com", "empresa"));

        let first = body_json(call("/me", Some(&bearer(&token))).await).await;
        let second = body_json(call("/me", Some(&bearer(&token))).await).await;
        assert_eq!(first, second);
    }
}
