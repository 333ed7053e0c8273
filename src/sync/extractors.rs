use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::drive::AccessToken;
use crate::error::ApiError;

const GOOGLE_TOKEN_HEADER: &str = "x-google-token";

/// Google access token of the caller, from `Authorization: Bearer <token>`
/// or `X-Google-Token: <token>`. A Bearer header wins when both are present.
pub struct DriveToken(pub AccessToken);

#[async_trait]
impl<S> FromRequestParts<S> for DriveToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| parts.headers.get(name).and_then(|v| v.to_str().ok());

        // Other Authorization schemes are not ours; fall back to the Google header.
        let bearer = header(AUTHORIZATION.as_str())
            .and_then(|auth| auth.strip_prefix("Bearer ").or_else(|| auth.strip_prefix("bearer ")));
        let token = bearer
            .or_else(|| header(GOOGLE_TOKEN_HEADER))
            .ok_or_else(|| ApiError::Unauthorized("Missing Google Token".into()))?;

        let token = token.trim();
        if token.is_empty() {
            return Err(ApiError::Unauthorized("Missing Google Token".into()));
        }
        Ok(DriveToken(AccessToken::new(token)))
    }
}
