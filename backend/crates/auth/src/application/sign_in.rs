//! Sign In Use Case
//!
//! Authenticates a user and issues a fresh access token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub user: User,
    pub token: String,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignInUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Every failure collapses to `InvalidCredentials` so the response
    /// never reveals whether the email is registered.
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&password) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.config.issue_token(&user);

        tracing::info!(
            user_id = %user.user_id,
            "User signed in"
        );

        Ok(SignInOutput { user, token })
    }
}
