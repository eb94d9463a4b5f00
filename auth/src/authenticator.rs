use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::password::HashingCost;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::product_key::ProductKeyScheme;

/// Secrets and tunables, loaded once at startup.
#[derive(Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub product_key_secret: String,
    pub token_lifetime: Duration,
    pub hashing: HashingCost,
}

/// Authentication coordinator combining password verification, JWT
/// generation and product keys.
#[derive(Debug)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    product_keys: ProductKeyScheme,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Errors
    /// * `InvalidCost` - `settings.hashing` is not a valid argon2 configuration
    pub fn new(settings: AuthSettings) -> Result<Self, PasswordError> {
        let password_hasher = PasswordHasher::with_cost(settings.hashing)?;

        Ok(Self {
            token_issuer: TokenIssuer::new(
                settings.jwt_secret.as_bytes(),
                settings.token_lifetime,
            ),
            product_keys: ProductKeyScheme::new(
                password_hasher.clone(),
                settings.product_key_secret,
            ),
            password_hasher,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and generate JWT token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or stored hash is unusable)
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject_id: impl ToString,
        subject_name: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_issuer.issue(subject_id, subject_name)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Generate JWT token without password verification.
    ///
    /// Used right after signup, where the caller just chose the password.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token(
        &self,
        subject_id: impl ToString,
        subject_name: &str,
    ) -> Result<String, JwtError> {
        self.token_issuer.issue(subject_id, subject_name)
    }

    /// Validate and decode JWT token.
    ///
    /// # Errors
    /// * `InvalidToken` - Token validation failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.token_issuer.verify(token)
    }

    pub fn generate_product_key(&self, email: &str, role: &str) -> Result<String, PasswordError> {
        self.product_keys.generate(email, role)
    }

    pub fn verify_product_key(&self, email: &str, role: &str, supplied: &str) -> bool {
        self.product_keys.verify(email, role, supplied)
    }
}
