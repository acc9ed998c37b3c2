use thiserror::Error;

/// Outcome of a failed authentication/authorization step.
///
/// The cause of an `Unauthenticated` (bad signature, expiry, missing claim,
/// ...) is deliberately collapsed: it is logged, never returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("forbidden")]
    Forbidden,
}
