use async_trait::async_trait;
use auth::AuthenticationResult;

use crate::domain::user::models::IdentityContext;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for registration, login and token resolution.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user with a hashed password.
    ///
    /// # Arguments
    /// * `command` - Validated command with identity, profile, role and plaintext password
    ///
    /// # Returns
    /// Created user entity, active by default
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Check a username/password pair.
    ///
    /// # Returns
    /// The matching user
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password, indistinguishably
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, username: &Username, password: &str) -> Result<User, UserError>;

    /// Authenticate and issue an access token.
    ///
    /// # Returns
    /// Signed token embedding username, user id, role and expiry
    ///
    /// # Errors
    /// * `InvalidCredentials` - Authentication failed
    /// * `Unknown` - Token generation failed
    async fn login(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<AuthenticationResult, UserError>;

    /// Resolve an access token into the caller's identity.
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid, expired, or missing `sub`/`id`
    fn resolve(&self, token: &str) -> Result<IdentityContext, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - User record without identifier
    ///
    /// # Returns
    /// Created user entity with its assigned id
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
}
