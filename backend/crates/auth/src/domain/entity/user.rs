//! User Entity
//!
//! Identity record created at signup and read-only through this API
//! afterwards. No exposed operation deletes a user.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, person_name::PersonName};

/// User entity
///
/// The password is held only as a one-way hash and is stripped from
/// every response and filter at the boundary.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    /// Lowercased email; uniqueness enforced by the signup flow,
    /// not by a store constraint
    pub email: Email,
    /// Argon2id PHC string
    pub password_hash: HashedPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        first_name: PersonName,
        last_name: PersonName,
        email: Email,
        password_hash: HashedPassword,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            first_name,
            last_name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}
