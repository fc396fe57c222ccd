use sqlx::PgPool;

use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// The pool is the only shared mutable resource; it is created once in `main`
/// and cloned (cheaply) into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}
