use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::AuthenticatedUser;
use crate::domain::user::models::UserRole;

/// Echo the identity the guard attached to the request.
pub async fn me(
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<MeResponseData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&user).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub id: String,
    pub name: String,
    pub role: UserRole,
}

impl From<&AuthenticatedUser> for MeResponseData {
    fn from(user: &AuthenticatedUser) -> Self {
        Self {
            id: user.user_id.to_string(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}
