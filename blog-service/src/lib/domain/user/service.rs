use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationResult;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::IdentityContext;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for authentication operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
/// Holds no per-request state: every call is a fresh lookup or token check.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token handling, with signing settings
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        let new_user = NewUser {
            email: command.email,
            username: command.username,
            name: command.name,
            surname: command.surname,
            role: command.role,
            password_hash,
            is_active: true,
            created_at: Utc::now(),
        };

        let user = self.repository.create(new_user).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    async fn authenticate(&self, username: &Username, password: &str) -> Result<User, UserError> {
        let user = match self.repository.find_by_username(username).await? {
            Some(user) => user,
            None => {
                tracing::warn!(username = %username, "Login attempt for unknown user");
                return Err(UserError::InvalidCredentials);
            }
        };

        if !self
            .authenticator
            .verify_password(password, &user.password_hash)
        {
            tracing::warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn login(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<AuthenticationResult, UserError> {
        let user = self.authenticate(username, password).await?;

        let result = self
            .authenticator
            .issue_token(user.username.as_str(), user.id.0, &user.role)
            .map_err(|e| UserError::Unknown(format!("Token generation failed: {}", e)))?;

        tracing::info!(
            user_id = %user.id,
            expires_at = %result.expires_at,
            "Access token issued"
        );

        Ok(result)
    }

    fn resolve(&self, token: &str) -> Result<IdentityContext, UserError> {
        let claims = self
            .authenticator
            .validate_token(token)
            .map_err(|e| UserError::Unauthorized(e.to_string()))?;

        match (claims.sub, claims.id) {
            (Some(username), Some(id)) => Ok(IdentityContext {
                user_id: UserId(id),
                username,
                role: claims.role,
            }),
            _ => Err(UserError::Unauthorized(
                "token is missing subject or user id".to_string(),
            )),
        }
    }
}
