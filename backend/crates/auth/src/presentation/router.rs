//! Auth and User Routers

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgUserRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/signin", post(handlers::sign_in::<R>))
        .with_state(state)
}

/// Create the User router with PostgreSQL repository
pub fn user_router(repo: PgUserRepository, config: AuthConfig) -> Router {
    user_router_generic(repo, config)
}

/// Create a generic User router for any repository implementation
pub fn user_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/", get(handlers::list_users::<R>))
        .route("/{id}", get(handlers::get_user::<R>))
        .with_state(state)
}
