//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;
use kernel::query::{Pagination, QueryFilter};

use crate::domain::entity::user::User;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if email is already registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// List users matching a filter, newest first
    async fn search(&self, filter: &QueryFilter, page: &Pagination) -> AuthResult<Vec<User>>;
}
