use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::UserIdError;
use crate::user::errors::UserRoleError;

/// User aggregate entity.
///
/// Represents a registered buyer, realtor or administrator.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub phone: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Comparison is
/// case-sensitive, exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Closed set of account roles.
///
/// `Buyer` is the base role anyone may register as. Every other role is
/// privileged and requires a product key at signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum UserRole {
    Buyer,
    Realtor,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Buyer, UserRole::Realtor, UserRole::Admin];

    /// Wire name, also the role segment of product-key material.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Buyer => "BUYER",
            UserRole::Realtor => "REALTOR",
            UserRole::Admin => "ADMIN",
        }
    }

    pub fn is_privileged(&self) -> bool {
        match self {
            UserRole::Buyer => false,
            UserRole::Realtor | UserRole::Admin => true,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UserRoleError;

    /// Accepts the wire name in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UserRoleError::Unknown(s.to_string()))
    }
}

impl TryFrom<String> for UserRole {
    type Error = UserRoleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Command to register a new account.
#[derive(Debug)]
pub struct SignupCommand {
    pub role: UserRole,
    pub name: String,
    pub email: EmailAddress,
    pub phone: String,
    /// Plain text password (hashed by the service)
    pub password: String,
    /// Required when `role` is privileged
    pub product_key: Option<String>,
}

/// Command to exchange credentials for a token.
#[derive(Debug)]
pub struct SigninCommand {
    pub email: EmailAddress,
    pub password: String,
}

/// Command to mint a product key for a prospective privileged account.
#[derive(Debug)]
pub struct ProductKeyCommand {
    pub email: EmailAddress,
    pub role: UserRole,
}

/// Bearer token returned by signup and signin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub token: String,
}

/// Identity resolved by the authorization guard.
///
/// `role` comes from the user store at request time, not from the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub name: String,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_str() {
        assert_eq!("BUYER".parse::<UserRole>().unwrap(), UserRole::Buyer);
        assert_eq!("realtor".parse::<UserRole>().unwrap(), UserRole::Realtor);
        assert_eq!("Admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!(
            "OWNER".parse::<UserRole>().unwrap_err(),
            UserRoleError::Unknown("OWNER".to_string())
        );
    }

    #[test]
    fn test_role_privilege() {
        assert!(!UserRole::Buyer.is_privileged());
        assert!(UserRole::Realtor.is_privileged());
        assert!(UserRole::Admin.is_privileged());
    }

    #[test]
    fn test_role_serde_uses_wire_name() {
        assert_eq!(
            serde_json::to_string(&UserRole::Realtor).unwrap(),
            "\"REALTOR\""
        );
        let role: UserRole = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, UserRole::Admin);
    }

    #[test]
    fn test_role_deserialize_ignores_case() {
        let role: UserRole = serde_json::from_str("\"realtor\"").unwrap();
        assert_eq!(role, UserRole::Realtor);
        assert!(serde_json::from_str::<UserRole>("\"owner\"").is_err());
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("jane@example.com".to_string()).is_ok());
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_email_is_case_sensitive() {
        let lower = EmailAddress::new("jane@example.com".to_string()).unwrap();
        let upper = EmailAddress::new("Jane@example.com".to_string()).unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_user_id_round_trip() {
        let id = UserId::new();
        assert_eq!(UserId::from_string(&id.to_string()).unwrap(), id);
        assert!(UserId::from_string("42").is_err());
    }
}
