//! Sign Up Use Case
//!
//! Creates a new user account and issues its first access token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, person_name::PersonName};
use crate::error::{AuthError, AuthResult};

/// Sign up input (already shape-validated by the request pipeline)
pub struct SignUpInput {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Email,
    pub password: ClearTextPassword,
}

impl std::fmt::Debug for SignUpInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpInput")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Sign up output
pub struct SignUpOutput {
    pub user: User,
    pub token: String,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignUpUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        // The store carries no unique constraint on email; this check is
        // the only duplicate guard.
        if self.repo.exists_by_email(&input.email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = input
            .password
            .hash()
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = User::new(input.first_name, input.last_name, input.email, password_hash);

        self.repo.create(&user).await?;

        let token = self.config.issue_token(&user);

        tracing::info!(
            user_id = %user.user_id,
            email = %user.email,
            "User signed up"
        );

        Ok(SignUpOutput { user, token })
    }
}
