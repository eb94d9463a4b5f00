use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Bearer token payload.
///
/// Identity only. The subject's role is deliberately absent: authorization
/// decisions read the role from the user store at request time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Subject display name
    pub name: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, expiring `lifetime` after `issued_at`.
    ///
    /// # Errors
    /// * `EncodingFailed` - `issued_at + lifetime` is not a representable time
    pub fn for_user(
        user_id: impl ToString,
        name: impl Into<String>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = issued_at.checked_add_signed(lifetime).ok_or_else(|| {
            JwtError::EncodingFailed("token lifetime overflows the expiry time".to_string())
        })?;

        Ok(Self {
            sub: user_id.to_string(),
            name: name.into(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_user() {
        let now = Utc::now();
        let claims = Claims::for_user("user123", "alice", now, Duration::hours(24)).unwrap();

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.name, "alice");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_lifetime_overflow_is_an_error() {
        let now = Utc::now();
        let result = Claims::for_user("u", "n", now, Duration::hours(10_000_000_000));

        assert!(matches!(result, Err(JwtError::EncodingFailed(_))));
    }

    #[test]
    fn test_serialized_shape() {
        let issued = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = Claims::for_user(42, "Bob", issued, Duration::seconds(60)).unwrap();

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "sub": "42",
                "name": "Bob",
                "iat": 1_700_000_000i64,
                "exp": 1_700_000_060i64,
            })
        );
    }
}
