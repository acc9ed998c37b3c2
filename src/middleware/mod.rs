/*
 * Responsibility
 * - Router-level middleware (cors, http)
 * - Authentication is not a layer here: it runs per handler through the
 *   AuthCtx / RequireRole extractors, so public and protected methods can
 *   share a path
 */
pub mod cors;
pub mod http;
