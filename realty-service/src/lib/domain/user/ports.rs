use async_trait::async_trait;

use crate::domain::user::models::AuthToken;
use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::ProductKeyCommand;
use crate::domain::user::models::SigninCommand;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserRole;
use crate::user::errors::UserError;

/// Port for authentication and authorization operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first token.
    ///
    /// # Arguments
    /// * `command` - Role, profile fields, password and optional product key
    ///
    /// # Returns
    /// Bearer token for the created user
    ///
    /// # Errors
    /// * `MissingProductKey` - Privileged role requested without a product key
    /// * `InvalidProductKey` - Product key does not match email and role
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn signup(&self, command: SignupCommand) -> Result<AuthToken, UserError>;

    /// Exchange email and password for a token.
    ///
    /// # Errors
    /// * `NotFoundByEmail` - No user with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `DatabaseError` - Database operation failed
    async fn signin(&self, command: SigninCommand) -> Result<AuthToken, UserError>;

    /// Mint a product key for a prospective privileged registrant.
    ///
    /// # Returns
    /// Digest to be handed to the registrant out of band
    ///
    /// # Errors
    /// * `Password` - Hashing failed
    async fn generate_product_key(&self, command: ProductKeyCommand) -> Result<String, UserError>;

    /// Resolve the identity behind a bearer token and check its role.
    ///
    /// The token proves identity only. The role is read from the store on
    /// every call, so role changes apply before the token expires.
    ///
    /// # Arguments
    /// * `token` - Raw bearer token
    /// * `required_roles` - Acceptable roles; empty means any authenticated user
    ///
    /// # Errors
    /// * `InvalidToken` - Token expired, forged, malformed, or its subject is gone
    /// * `Forbidden` - Subject's current role is not in `required_roles`
    /// * `DatabaseError` - Database operation failed
    async fn authorize(
        &self,
        token: &str,
        required_roles: &[UserRole],
    ) -> Result<AuthenticatedUser, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// The store's own uniqueness rule on email is authoritative; it must
    /// hold even when two creates for one email race.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
}
