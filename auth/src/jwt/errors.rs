use thiserror::Error;

/// Why a token was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    Expired,
    BadSignature,
    Malformed,
}

impl std::fmt::Display for TokenRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            TokenRejection::Expired => "token is expired",
            TokenRejection::BadSignature => "signature does not match",
            TokenRejection::Malformed => "token is malformed",
        };
        f.write_str(reason)
    }
}

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Invalid token: {0}")]
    InvalidToken(TokenRejection),
}
