use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::signup::AuthTokenResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::SigninCommand;
use crate::inbound::http::router::AppState;

pub async fn signin(
    State(state): State<AppState>,
    Json(body): Json<SigninRequestBody>,
) -> Result<ApiSuccess<AuthTokenResponseData>, ApiError> {
    let email = EmailAddress::new(body.email)
        .map_err(|e| ApiError::UnprocessableEntity(format!("Invalid email: {}", e)))?;

    state
        .auth_service
        .signin(SigninCommand {
            email,
            password: body.password,
        })
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, token.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SigninRequestBody {
    email: String,
    password: String,
}
