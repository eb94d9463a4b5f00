use std::fmt;

use chrono::Duration;
use chrono::Utc;

use super::claims::Claims;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Issues and verifies identity tokens with a fixed lifetime.
pub struct TokenIssuer {
    handler: JwtHandler,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], lifetime: Duration) -> Self {
        Self {
            handler: JwtHandler::new(secret),
            lifetime,
        }
    }

    /// Sign a token for the subject, valid from now until now + lifetime.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed or the expiry is out of range
    pub fn issue(&self, subject_id: impl ToString, subject_name: &str) -> Result<String, JwtError> {
        let claims = Claims::for_user(subject_id, subject_name, Utc::now(), self.lifetime)?;
        self.handler.encode(&claims)
    }

    /// Check signature and expiry and return the embedded claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Expired, bad signature, or malformed
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.handler.decode(token)
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("secret", &"<redacted>")
            .field("lifetime", &self.lifetime)
            .finish()
    }
}
