pub mod access_jwt;
pub mod error;
pub mod factory;
pub mod principal;

pub use access_jwt::{AccessTokenClaims, TokenVerifier};
pub use error::AuthError;
pub use factory::build_token_verifier;
pub use principal::{Principal, Role};
