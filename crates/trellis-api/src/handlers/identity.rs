//! Caller identity from the fronting proxy

use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use trellis_constants::REMOTE_USER_HEADER;
use trellis_types::User;

/// User named by the `x-remote-user` header; anonymous when the header is
/// missing, blank or not valid UTF-8
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .headers
            .get(REMOTE_USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(User::named)
            .unwrap_or_else(User::anonymous);

        Ok(CurrentUser(user))
    }
}
