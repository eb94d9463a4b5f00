use std::str::FromStr;

use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::AuthToken;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::UserRole;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::UserRoleError;

pub async fn signup(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Json(body): Json<SignupRequest>,
) -> Result<ApiSuccess<AuthTokenResponseData>, ApiError> {
    state
        .auth_service
        .signup(body.try_into_command(&role)?)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::CREATED, token.into()))
}

/// HTTP request body for signing up (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    name: String,
    email: String,
    phone: String,
    password: String,
    #[serde(default, alias = "productKey")]
    product_key: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseSignupRequestError {
    #[error("Invalid role: {0}")]
    Role(#[from] UserRoleError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl SignupRequest {
    fn try_into_command(self, role: &str) -> Result<SignupCommand, ParseSignupRequestError> {
        let role = UserRole::from_str(role)?;
        let email = EmailAddress::new(self.email)?;
        Ok(SignupCommand {
            role,
            name: self.name,
            email,
            phone: self.phone,
            password: self.password,
            product_key: self.product_key,
        })
    }
}

impl From<ParseSignupRequestError> for ApiError {
    fn from(err: ParseSignupRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

/// `{ status: true, token }`, shared by signup and signin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthTokenResponseData {
    pub status: bool,
    pub token: String,
}

impl From<AuthToken> for AuthTokenResponseData {
    fn from(token: AuthToken) -> Self {
        Self {
            status: true,
            token: token.token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(product_key: Option<&str>) -> SignupRequest {
        SignupRequest {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-0100".to_string(),
            password: "pw".to_string(),
            product_key: product_key.map(str::to_string),
        }
    }

    #[test]
    fn test_accepts_camel_case_product_key() {
        let body: SignupRequest = serde_json::from_value(serde_json::json!({
            "name": "Jane",
            "email": "jane@example.com",
            "phone": "555-0100",
            "password": "pw",
            "productKey": "$argon2id$key"
        }))
        .unwrap();

        assert_eq!(body.product_key.as_deref(), Some("$argon2id$key"));
    }

    #[test]
    fn test_product_key_optional() {
        let body: SignupRequest = serde_json::from_value(serde_json::json!({
            "name": "Jane",
            "email": "jane@example.com",
            "phone": "555-0100",
            "password": "pw"
        }))
        .unwrap();

        assert_eq!(body, request(None));
    }

    #[test]
    fn test_try_into_command() {
        let command = request(Some("k")).try_into_command("realtor").unwrap();

        assert_eq!(command.role, UserRole::Realtor);
        assert_eq!(command.email.as_str(), "jane@example.com");
        assert_eq!(command.product_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(matches!(
            request(None).try_into_command("landlord"),
            Err(ParseSignupRequestError::Role(_))
        ));
    }
}
