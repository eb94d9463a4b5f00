//! Authentication utilities library
//!
//! Provides the credential primitives the realty service is built on:
//! - Password hashing (Argon2id)
//! - JWT token issuance and validation
//! - Product keys gating privileged signup
//! - Authentication coordination
//!
//! Nothing here knows about users, roles or storage. The service adapts these
//! primitives behind its own ports.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("my_password", "not a digest"));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::TokenIssuer;
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1));
//! let token = issuer.issue("user123", "alice").unwrap();
//! let claims = issuer.verify(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{AuthSettings, Authenticator, HashingCost};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(AuthSettings {
//!     jwt_secret: "secret_key_at_least_32_bytes_long!".to_string(),
//!     product_key_secret: "product-key-secret".to_string(),
//!     token_lifetime: Duration::hours(24),
//!     hashing: HashingCost::default(),
//! })
//! .unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, "user123", "alice").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.name, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod product_key;

// Re-export commonly used items
pub use authenticator::AuthSettings;
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenIssuer;
pub use jwt::TokenRejection;
pub use password::HashingCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use product_key::ProductKeyScheme;
