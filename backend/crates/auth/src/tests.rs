//! Route-level tests for the auth crate
//!
//! Drives the generic routers against an in-memory repository, the same
//! way the api binary drives them against PostgreSQL.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use kernel::id::UserId;
use kernel::query::{Pagination, Predicate, QueryFilter};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;
use crate::presentation::router::{auth_router_generic, user_router_generic};

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Clone, Default)]
struct MemUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

fn field_value(user: &User, field: &str) -> Option<String> {
    match field {
        "firstName" => Some(user.first_name.as_str().to_string()),
        "lastName" => Some(user.last_name.as_str().to_string()),
        "email" => Some(user.email.as_str().to_string()),
        "userId" => Some(user.user_id.to_string()),
        _ => None,
    }
}

fn matches(user: &User, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::Equals { field, value } => {
            field_value(user, field).is_some_and(|v| v == *value)
        }
        Predicate::Contains { field, value } => field_value(user, field)
            .is_some_and(|v| v.to_lowercase().contains(&value.to_lowercase())),
    }
}

impl UserRepository for MemUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user_id == *user_id)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.email == *email))
    }

    async fn search(&self, filter: &QueryFilter, page: &Pagination) -> AuthResult<Vec<User>> {
        let users = self.users.lock().unwrap();
        let mut found: Vec<User> = users
            .iter()
            .filter(|u| filter.predicates().iter().all(|p| matches(u, p)))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn test_router() -> Router {
    let repo = MemUserRepository::default();
    let config = AuthConfig::development();

    Router::new()
        .nest("/api/v1/auth", auth_router_generic(repo.clone(), config.clone()))
        .nest("/api/v1/user", user_router_generic(repo, config))
}

async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn new_user() -> Value {
    json!({
        "firstName": "Ayo",
        "lastName": "Akin",
        "email": "daylay10@yahoo.com",
        "password": "daylayayo1"
    })
}

// ============================================================================
// Signup
// ============================================================================

mod signup_tests {
    use super::*;

    #[tokio::test]
    async fn test_signup_success() {
        let router = test_router();
        let (status, body) = post_json(&router, "/api/v1/auth/signup", new_user()).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["firstName"], "Ayo");
        assert_eq!(body["data"]["lastName"], "Akin");
        assert_eq!(body["data"]["email"], "daylay10@yahoo.com");
        assert!(body["data"]["token"].is_string());
        assert!(body["data"].get("password").is_none());
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_conflicts() {
        let router = test_router();
        post_json(&router, "/api/v1/auth/signup", new_user()).await;
        let (status, body) = post_json(&router, "/api/v1/auth/signup", new_user()).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["status"], "fail");
        assert_eq!(
            body["error"]["message"],
            "A user with your email already exists"
        );
    }

    #[tokio::test]
    async fn test_signup_invalid_email_label() {
        let router = test_router();
        let mut user = new_user();
        user["email"] = json!("daylay10yahoo.com");

        let (status, body) = post_json(&router, "/api/v1/auth/signup", user).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");
        assert_eq!(body["error"]["message"], "A valid email address is required");
    }

    #[tokio::test]
    async fn test_signup_short_name_label() {
        let router = test_router();
        let mut user = new_user();
        user["firstName"] = json!("A");

        let (status, body) = post_json(&router, "/api/v1/auth/signup", user).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "A valid firstName is required");
    }

    #[tokio::test]
    async fn test_rejected_signup_persists_nothing() {
        let router = test_router();
        let mut user = new_user();
        user["email"] = json!("nope");
        post_json(&router, "/api/v1/auth/signup", user).await;

        let (_, body) = get(&router, "/api/v1/user").await;
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
    }
}

// ============================================================================
// Signin
// ============================================================================

mod signin_tests {
    use super::*;

    #[tokio::test]
    async fn test_signin_success() {
        let router = test_router();
        post_json(&router, "/api/v1/auth/signup", new_user()).await;

        let (status, body) = post_json(
            &router,
            "/api/v1/auth/signin",
            json!({ "email": "daylay10@yahoo.com", "password": "daylayayo1" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["email"], "daylay10@yahoo.com");
        assert!(body["data"]["token"].is_string());
    }

    #[tokio::test]
    async fn test_signin_missing_fields() {
        let router = test_router();
        let (status, body) = post_json(
            &router,
            "/api/v1/auth/signin",
            json!({ "email": "daylay10@yahoo.com" }),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Invalid email/password");
    }

    #[tokio::test]
    async fn test_signin_wrong_password() {
        let router = test_router();
        post_json(&router, "/api/v1/auth/signup", new_user()).await;

        let (status, body) = post_json(
            &router,
            "/api/v1/auth/signin",
            json!({ "email": "daylay10@yahoo.com", "password": "iriroko2" }),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Invalid email/password");
    }

    #[tokio::test]
    async fn test_signin_unknown_email() {
        let router = test_router();
        let (status, body) = post_json(
            &router,
            "/api/v1/auth/signin",
            json!({ "email": "signs@yahoo.com", "password": "daylayayo1" }),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Invalid email/password");
    }
}

// ============================================================================
// User listing/detail
// ============================================================================

mod user_route_tests {
    use super::*;

    async fn seeded_router() -> Router {
        let router = test_router();
        post_json(&router, "/api/v1/auth/signup", new_user()).await;
        post_json(
            &router,
            "/api/v1/auth/signup",
            json!({
                "firstName": "Ayodele",
                "lastName": "Akinwumi",
                "email": "dele@hotmail.com",
                "password": "werirui18"
            }),
        )
        .await;
        router
    }

    #[tokio::test]
    async fn test_list_users_excludes_password() {
        let router = seeded_router().await;
        let (status, body) = get(&router, "/api/v1/user").await;

        assert_eq!(status, StatusCode::OK);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        for user in data {
            assert!(user.get("password").is_none());
            assert!(user.get("passwordHash").is_none());
        }
    }

    #[tokio::test]
    async fn test_search_by_first_name_token() {
        let router = seeded_router().await;
        let (_, body) = get(&router, "/api/v1/user?name=ayo").await;

        // Case-insensitive partial match hits both "Ayo" and "Ayodele"
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_search_by_full_name() {
        let router = seeded_router().await;
        let (_, body) = get(&router, "/api/v1/user?name=ayodele%20Aki").await;

        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["firstName"], "Ayodele");
    }

    #[tokio::test]
    async fn test_search_by_key_value() {
        let router = seeded_router().await;
        let (_, body) = get(&router, "/api/v1/user?key=email&value=daylay10@yahoo.com").await;

        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["email"], "daylay10@yahoo.com");
    }

    #[tokio::test]
    async fn test_password_filter_is_suppressed() {
        let router = seeded_router().await;
        let (status, body) = get(&router, "/api/v1/user?key=password&value=ayodele").await;

        // The filter is dropped entirely, not applied and not an error
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_pagination_limit() {
        let router = seeded_router().await;

        let (_, body) = get(&router, "/api/v1/user?limit=1").await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        // Non-numeric limit falls back to the default page size
        let (_, body) = get(&router, "/api/v1/user?limit=abc").await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let (_, body) = get(&router, "/api/v1/user?page=2&limit=1").await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (_, body) = get(&router, "/api/v1/user?page=3&limit=1").await;
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_get_user_invalid_id() {
        let router = seeded_router().await;
        let (status, body) = get(&router, "/api/v1/user/5").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Invalid user Id");
    }

    #[tokio::test]
    async fn test_get_user_unknown_id() {
        let router = seeded_router().await;
        let (status, body) = get(
            &router,
            "/api/v1/user/5f2f9cb4-0a5e-4b6e-9a3e-9be2d0018c01",
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["error"]["message"],
            "A user with the id provided was not found"
        );
    }

    #[tokio::test]
    async fn test_get_user_by_id() {
        let router = seeded_router().await;
        let (_, list) = get(&router, "/api/v1/user?key=email&value=dele@hotmail.com").await;
        let id = list["data"][0]["id"].as_str().unwrap().to_string();

        let (status, body) = get(&router, &format!("/api/v1/user/{id}")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["email"], "dele@hotmail.com");
        assert!(body["data"].get("password").is_none());
    }
}
