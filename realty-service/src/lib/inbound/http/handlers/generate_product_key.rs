use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::ProductKeyCommand;
use crate::domain::user::models::UserRole;
use crate::inbound::http::router::AppState;

pub async fn generate_product_key(
    State(state): State<AppState>,
    Json(body): Json<ProductKeyRequestBody>,
) -> Result<ApiSuccess<ProductKeyResponseData>, ApiError> {
    let email = EmailAddress::new(body.email)
        .map_err(|e| ApiError::UnprocessableEntity(format!("Invalid email: {}", e)))?;

    state
        .auth_service
        .generate_product_key(ProductKeyCommand {
            email,
            role: body.role,
        })
        .await
        .map_err(ApiError::from)
        .map(|product_key| ApiSuccess::new(StatusCode::OK, ProductKeyResponseData { product_key }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductKeyRequestBody {
    email: String,
    #[serde(alias = "userType")]
    role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductKeyResponseData {
    pub product_key: String,
}
