use thiserror::Error;

use crate::user::models::UserRole;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for UserRole parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserRoleError {
    #[error("Unknown role: {0} (expected BUYER, REALTOR or ADMIN)")]
    Unknown(String),
}

/// Failure classes surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid product key, bad signin credentials
    Unauthorized,
    /// Duplicate email
    Conflict,
    /// Unknown email on signin
    NotFound,
    /// Missing, invalid or expired token
    Unauthenticated,
    /// Authenticated but role not permitted
    Forbidden,
    /// Malformed input value
    Invalid,
    Internal,
}

/// Top-level error for all user and authentication operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] UserRoleError),

    // Domain-level errors
    #[error("Product key required to sign up as {0}")]
    MissingProductKey(UserRole),

    #[error("Invalid product key for {0}")]
    InvalidProductKey(UserRole),

    #[error("User with this email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("User not found with email: {0}")]
    NotFoundByEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token: {0}")]
    InvalidToken(String),

    #[error("Role {role} is not permitted for this operation")]
    Forbidden { role: UserRole },

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::MissingProductKey(_)
            | UserError::InvalidProductKey(_)
            | UserError::InvalidCredentials => ErrorKind::Unauthorized,
            UserError::EmailAlreadyExists(_) => ErrorKind::Conflict,
            UserError::NotFoundByEmail(_) => ErrorKind::NotFound,
            UserError::InvalidToken(_) => ErrorKind::Unauthenticated,
            UserError::Forbidden { .. } => ErrorKind::Forbidden,
            UserError::InvalidUserId(_) | UserError::InvalidEmail(_) | UserError::InvalidRole(_) => {
                ErrorKind::Invalid
            }
            UserError::Password(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ErrorKind::Internal,
        }
    }
}
