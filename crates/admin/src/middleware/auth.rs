//! Authentication extractor for the admin API.
//!
//! Identity is established by the upstream authentication provider; the
//! fronting proxy verifies the caller and installs the resulting user ID as
//! the `x-user-id` request header. This service never sees credentials, it
//! only consumes the verified identity and runs per-store authorization.

use axum::{extract::FromRequestParts, http::request::Parts};

use shopkeeper_core::UserId;

use crate::error::ApiError;

/// Name of the header carrying the upstream-verified caller identity.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor that requires a verified caller identity.
///
/// Rejects with 401 `Unauthenticated` when the header is absent or empty.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireUser(user): RequireUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {user}!")
/// }
/// ```
#[derive(Debug)]
pub struct RequireUser(pub UserId);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ApiError::Unauthenticated)?;

        Ok(Self(UserId::new(user_id)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<RequireUser, ApiError> {
        let (mut parts, ()) = request.into_parts();
        RequireUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_user_id() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "user_1")
            .body(())
            .unwrap();

        let RequireUser(user) = extract(request).await.unwrap();
        assert_eq!(user.as_str(), "user_1");
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthenticated() {
        let request = Request::builder().body(()).unwrap();
        let err = extract(request).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_blank_header_is_unauthenticated() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "   ")
            .body(())
            .unwrap();
        let err = extract(request).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }
}
