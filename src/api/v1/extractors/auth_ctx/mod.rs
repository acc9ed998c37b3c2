/*!
 * Authentication context extractors
 *
 * Responsibility:
 * - Give handlers an authenticated (AuthCtx) or role-authorized
 *   (RequireRole<R>) caller, or reject the request with 401 / 403
 * - HTTP / axum specifics live in core; the types live in types
 *
 * Public API:
 * - AuthCtx
 * - RequireRole, EmpresaCtx, EgresadoCtx
 */

mod core;
mod types;

pub use core::{EgresadoCtx, EmpresaCtx, RequireRole};
pub use types::AuthCtx;
