//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::id::UserId;
use kernel::query::{Pagination, QueryFilter};
use kernel::response::Success;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{SignInInput, SignInUseCase, SignUpUseCase, validate};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AuthUserResponse, ListUsersParams, PublicUserResponse, SignInRequest, SignUpRequest,
};

/// Filterable logical fields for the user listing
const USER_FILTER_FIELDS: &[&str] = &["firstName", "lastName", "email"];

/// Logical primary-key field for `?key=id` translation
const USER_ID_FIELD: &str = "userId";

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/v1/auth/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let input = validate::sign_up(&req.first_name, &req.last_name, &req.email, req.password)
        .map_err(AuthError::Validation)?;

    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(Success::new(AuthUserResponse::new(&output.user, output.token))),
    ))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/v1/auth/signin
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    // Missing credentials are indistinguishable from wrong ones
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AuthError::InvalidCredentials);
    }

    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::OK,
        Json(Success::new(AuthUserResponse::new(&output.user, output.token))),
    ))
}

// ============================================================================
// User listing/detail
// ============================================================================

/// GET /api/v1/user
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
    Query(params): Query<ListUsersParams>,
) -> AuthResult<Json<Success<Vec<PublicUserResponse>>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let page = Pagination::from_params(params.page.as_deref(), params.limit.as_deref());

    let mut filter = QueryFilter::new();
    if let Some(name) = params.name.as_deref() {
        filter = filter.person_name(name, "firstName", "lastName");
    }
    if let (Some(key), Some(value)) = (params.key.as_deref(), params.value.as_deref()) {
        filter = filter.key_value(key, value, USER_FILTER_FIELDS, USER_ID_FIELD);
    }

    let users = state.repo.search(&filter, &page).await?;
    let users = users.iter().map(PublicUserResponse::from).collect();

    Ok(Json(Success::new(users)))
}

/// GET /api/v1/user/{id}
pub async fn get_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<String>,
) -> AuthResult<Json<Success<PublicUserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user_id = UserId::parse_str(&id).map_err(|_| AuthError::InvalidUserId)?;

    let user = state
        .repo
        .find_by_id(&user_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(Success::new(PublicUserResponse::from(&user))))
}
