//! Login and unauthorized pages.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use vantage_shared::{ApiResponse, ErrorResponse, dto::IdentityResponse};

use crate::middleware::error::AppResult;
use crate::middleware::identity::CurrentIdentity;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub return_to: Option<String>,
}

/// GET /auth/login
///
/// Sign-in itself belongs to the identity platform; this page just echoes
/// where the caller will be sent back to afterwards.
pub async fn login(query: web::Query<LoginQuery>) -> AppResult<HttpResponse> {
    let return_to = query.into_inner().return_to.unwrap_or_else(|| "/".to_string());
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        return_to,
        "Sign in to continue",
    )))
}

/// GET /api/session
///
/// Unrestricted, but the gateway still resolves identity best-effort, so
/// the response can be personalized for signed-in callers.
pub async fn session_info(identity: CurrentIdentity) -> HttpResponse {
    let identity = identity.0;
    HttpResponse::Ok().json(ApiResponse::ok(IdentityResponse {
        authenticated: !identity.is_anonymous(),
        email: identity.email.clone(),
        role: identity.role.as_str().to_string(),
    }))
}

/// GET /unauthorized
pub async fn unauthorized() -> HttpResponse {
    HttpResponse::Forbidden().json(
        ErrorResponse::forbidden().with_detail("Your account does not have access to that page."),
    )
}
