//! Access-token verification for tokens issued by the hosted auth platform.
//!
//! Tokens are HS256 JWTs signed with the project's shared secret. Only that
//! algorithm is accepted: a token whose header names anything else (HS384,
//! RS256, `none`, ...) is rejected before its claims are looked at.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::AuthError;

/// Decoded claims of a verified access token.
///
/// Identity claims are optional here; `Principal::from_claims` decides
/// whether they are complete.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Free-form metadata set at sign-up; the application role lives here.
    #[serde(default)]
    pub user_metadata: Option<Map<String, Value>>,
    pub exp: u64,
}

impl AccessTokenClaims {
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.user_metadata.as_ref()?.get(key)?.as_str()
    }
}

/// HS256 access-token verifier.
///
/// Holds no mutable state; one instance is shared by every request.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    pub fn new(secret: &str, audience: Option<&str>, leeway_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;
        validation.validate_nbf = true;
        match audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key,
            validation,
        }
    }

    /// Verify signature, algorithm and time claims, then decode the payload.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, AuthError> {
        match jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
        {
            Ok(data) => {
                tracing::debug!(exp = data.claims.exp, "access token verified");
                Ok(data.claims)
            }
            Err(err) => {
                tracing::warn!(error = %err, "access token verification failed");
                Err(AuthError::Unauthenticated)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::Algorithm;
    use serde_json::json;

    use super::*;
    use crate::test_support::{self, SECRET};

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(SECRET, None, 0)
    }

    #[test]
    fn accepts_token_signed_with_configured_secret() {
        let token = test_support::mint(test_support::claims("u1", "a@b.com", "empresa"));

        let claims = verifier().verify(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("u1"));
        assert_eq!(claims.email.as_deref(), Some("a@b.com"));
        assert_eq!(claims.metadata_str("role"), Some("empresa"));
    }

    #[test]
    fn rejects_token_signed_with_another_key() {
        let token = test_support::mint_with(
            Algorithm::HS256,
            "some-other-secret",
            test_support::claims("u1", "a@b.com", "empresa"),
        );

        assert_eq!(verifier().verify(&token).unwrap_err(), AuthError::Unauthenticated);
    }

    #[test]
    fn rejects_other_hmac_algorithms_even_with_the_right_secret() {
        for alg in [Algorithm::HS384, Algorithm::HS512] {
            let token =
                test_support::mint_with(alg, SECRET, test_support::claims("u1", "a@b.com", "empresa"));

            assert_eq!(
                verifier().verify(&token).unwrap_err(),
                AuthError::Unauthenticated,
                "{alg:?} must not be accepted"
            );
        }
    }

    #[test]
    fn rejects_unsigned_token() {
        let token = test_support::unsigned(test_support::claims("u1", "a@b.com", "empresa"));

        assert_eq!(verifier().verify(&token).unwrap_err(), AuthError::Unauthenticated);
    }

    #[test]
    fn rejects_expired_token() {
        let mut claims = test_support::claims("u1", "a@b.com", "empresa");
        claims["exp"] = json!(test_support::now() - 3600);
        let token = test_support::mint(claims);

        assert_eq!(verifier().verify(&token).unwrap_err(), AuthError::Unauthenticated);
    }

    #[test]
    fn rejects_token_without_exp() {
        let token = test_support::mint(json!({
            "sub": "u1",
            "email": "a@b.com",
            "user_metadata": { "role": "empresa" }
        }));

        assert_eq!(verifier().verify(&token).unwrap_err(), AuthError::Unauthenticated);
    }

    #[test]
    fn rejects_garbage() {
        for token in ["", "not-a-jwt", "a.b.c", "Bearer x"] {
            assert_eq!(verifier().verify(token).unwrap_err(), AuthError::Unauthenticated);
        }
    }

    #[test]
    fn checks_audience_when_configured() {
        let verifier = TokenVerifier::new(SECRET, Some("authenticated"), 0);

        let mut claims = test_support::claims("u1", "a@b.com", "empresa");
        claims["aud"] = json!("authenticated");
        assert!(verifier.verify(&test_support::mint(claims.clone())).is_ok());

        claims["aud"] = json!("anon");
        assert_eq!(
            verifier.verify(&test_support::mint(claims)).unwrap_err(),
            AuthError::Unauthenticated
        );
    }

    #[test]
    fn debug_output_hides_key() {
        let printed = format!("{:?}", verifier());
        assert!(!printed.contains(SECRET));
    }
}
