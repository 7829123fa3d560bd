//! Requester identity supplied by the authentication gateway.
//!
//! The gateway authenticates the caller and forwards who they are in
//! `x-user-*` headers. They are trusted as-is.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use formflow_api::{ApiError, Requester, Role};
use uuid::Uuid;

use crate::error::HttpError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// Extractor for the authenticated requester.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Requester);

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok()).map(str::trim)
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = header(parts, USER_ID_HEADER)
            .ok_or_else(|| ApiError::Unauthenticated(format!("missing {USER_ID_HEADER} header")))?
            .parse::<Uuid>()
            .map_err(|_| ApiError::Unauthenticated(format!("{USER_ID_HEADER} is not a valid id")))?;
        let role = header(parts, USER_ROLE_HEADER)
            .ok_or_else(|| ApiError::Unauthenticated(format!("missing {USER_ROLE_HEADER} header")))?
            .parse::<Role>()
            .map_err(|_| ApiError::Unauthenticated(format!("{USER_ROLE_HEADER} is not a known role")))?;
        let name = header(parts, USER_NAME_HEADER).unwrap_or_default();
        let email = header(parts, USER_EMAIL_HEADER).unwrap_or_default();

        Ok(CurrentUser(Requester::new(id, name, email, role)))
    }
}
