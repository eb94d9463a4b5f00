use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::AuthToken;
use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::ProductKeyCommand;
use crate::domain::user::models::SigninCommand;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserRole;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for authentication operations.
///
/// Concrete implementation of AuthServicePort with dependency injection.
/// Each call is independent; the only shared state is the repository and
/// the immutable authenticator.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Hasher, token issuer and product-key scheme built from config
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Run argon2 work on the blocking pool.
    async fn blocking<T, F>(&self, work: F) -> Result<T, UserError>
    where
        F: FnOnce(&Authenticator) -> T + Send + 'static,
        T: Send + 'static,
    {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || work(&authenticator))
            .await
            .map_err(|e| UserError::Unknown(format!("Hashing task failed: {}", e)))
    }

    async fn check_product_key(
        &self,
        command: &SignupCommand,
    ) -> Result<(), UserError> {
        let role = command.role;
        let Some(product_key) = command.product_key.clone() else {
            tracing::warn!(
                email = %command.email,
                role = %role,
                "Privileged signup attempted without product key"
            );
            return Err(UserError::MissingProductKey(role));
        };

        let email = command.email.as_str().to_string();
        let valid = self
            .blocking(move |a| a.verify_product_key(&email, role.as_str(), &product_key))
            .await?;

        if !valid {
            tracing::warn!(
                email = %command.email,
                role = %role,
                "Privileged signup attempted with invalid product key"
            );
            return Err(UserError::InvalidProductKey(role));
        }

        Ok(())
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn signup(&self, command: SignupCommand) -> Result<AuthToken, UserError> {
        if command.role.is_privileged() {
            self.check_product_key(&command).await?;
        }

        // Fast path only; the repository's create is the authoritative check
        if self.repository.find_by_email(&command.email).await?.is_some() {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let SignupCommand {
            role,
            name,
            email,
            phone,
            password,
            ..
        } = command;

        let password_hash = self.blocking(move |a| a.hash_password(&password)).await??;

        let user = User {
            id: UserId::new(),
            name,
            email,
            phone,
            password_hash,
            role,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;

        let token = self
            .authenticator
            .generate_token(created_user.id, &created_user.name)
            .map_err(|e| UserError::Token(e.to_string()))?;

        tracing::info!(
            user_id = %created_user.id,
            role = %created_user.role,
            "User signed up"
        );

        Ok(AuthToken { token })
    }

    async fn signin(&self, command: SigninCommand) -> Result<AuthToken, UserError> {
        let user = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| UserError::NotFoundByEmail(command.email.to_string()))?;

        let password = command.password;
        let stored_hash = user.password_hash;
        let user_id = user.id;
        let name = user.name;

        let result = self
            .blocking(move |a| a.authenticate(&password, &stored_hash, user_id, &name))
            .await?
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(user_id = %user_id, "Signin rejected: invalid credentials");
                    UserError::InvalidCredentials
                }
                AuthenticationError::JwtError(err) => UserError::Token(err.to_string()),
            })?;

        tracing::debug!(user_id = %user_id, "User signed in");

        Ok(AuthToken {
            token: result.access_token,
        })
    }

    async fn generate_product_key(&self, command: ProductKeyCommand) -> Result<String, UserError> {
        let ProductKeyCommand { email, role } = command;
        tracing::info!(email = %email, role = %role, "Generating product key");

        let key = self
            .blocking(move |a| a.generate_product_key(email.as_str(), role.as_str()))
            .await??;

        Ok(key)
    }

    async fn authorize(
        &self,
        token: &str,
        required_roles: &[UserRole],
    ) -> Result<AuthenticatedUser, UserError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Token rejected");
            UserError::InvalidToken(e.to_string())
        })?;

        let user_id = UserId::from_string(&claims.sub).map_err(|e| {
            tracing::warn!(error = %e, "Token subject is not a user id");
            UserError::InvalidToken(e.to_string())
        })?;

        let user = self.repository.find_by_id(&user_id).await?.ok_or_else(|| {
            tracing::warn!(user_id = %user_id, "Token subject no longer exists");
            UserError::InvalidToken("subject no longer exists".to_string())
        })?;

        if !required_roles.is_empty() && !required_roles.contains(&user.role) {
            tracing::warn!(
                user_id = %user.id,
                role = %user.role,
                required_roles = ?required_roles,
                "Permission denied"
            );
            return Err(UserError::Forbidden { role: user.role });
        }

        Ok(AuthenticatedUser {
            user_id: user.id,
            name: user.name,
            role: user.role,
        })
    }
}
