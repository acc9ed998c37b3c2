/*
 * Responsibility
 * - The "authenticated caller" type handlers receive
 * - Built fresh for every request; never cached or stored
 */
use crate::services::auth::Principal;

/// Context of an authenticated request.
///
/// - `principal`: identity taken from the verified token
/// - `access_token`: the caller's raw bearer token, forwarded to the data API
///   so row-level policies run as this user
#[derive(Clone)]
pub struct AuthCtx {
    pub principal: Principal,
    pub access_token: String,
}

impl std::fmt::Debug for AuthCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthCtx")
            .field("principal", &self.principal)
            .finish_non_exhaustive()
    }
}
