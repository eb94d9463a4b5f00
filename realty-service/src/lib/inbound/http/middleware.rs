use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::UserRole;
use crate::domain::user::ports::AuthServicePort;

/// Roles a route group accepts. Empty means any authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRequirement(Arc<[UserRole]>);

impl RoleRequirement {
    pub fn authenticated() -> Self {
        Self(Arc::from(Vec::new()))
    }

    pub fn any_of(roles: &[UserRole]) -> Self {
        Self(Arc::from(roles))
    }

    pub fn roles(&self) -> &[UserRole] {
        &self.0
    }
}

/// State for one guarded route group
#[derive(Clone)]
pub struct GuardState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub required: RoleRequirement,
}

/// Rejects the request unless it carries a valid bearer token whose
/// holder currently has one of the required roles. The resolved
/// [`crate::domain::user::models::AuthenticatedUser`] is attached to the
/// request extensions.
pub async fn authorize(
    State(guard): State<GuardState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;

    let user = guard
        .auth_service
        .authorize(token, guard.required.roles())
        .await
        .map_err(ApiError::from)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthenticated("Missing Authorization header".to_string()))?;

    let value = header
        .to_str()
        .map_err(|_| ApiError::Unauthenticated("Invalid Authorization header".to_string()))?;

    // Auth-scheme names are case-insensitive
    match value.split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() =>
        {
            Ok(token.trim())
        }
        _ => Err(ApiError::Unauthenticated(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )),
    }
}
