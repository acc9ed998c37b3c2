/*
 * Responsibility
 * - Entry point of the v1 API (re-exports routes())
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
