//! Request identity.
//!
//! The caller identifies itself with an `X-User-Id` header carrying a UUID.
//! Handlers that act on behalf of a user take [`CurrentUser`]; requests
//! without a valid header are rejected with 401 before the handler runs.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};

use arena_domain::UserId;

pub const USER_ID_HEADER: &str = "X-User-Id";

/// The user a request is made on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let user_id = raw.trim().parse::<UserId>().map_err(|e| {
            tracing::debug!(error = %e, "Rejecting malformed user id");
            StatusCode::UNAUTHORIZED
        })?;

        Ok(CurrentUser(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;

    async fn whoami(CurrentUser(user): CurrentUser) -> String {
        format!("user:{user}")
    }

    fn app() -> Router {
        Router::new().route("/", get(whoami))
    }

    #[tokio::test]
    async fn extracts_user_from_header() {
        let user = UserId::new();
        let request = Request::builder()
            .uri("/")
            .header(USER_ID_HEADER, user.to_string())
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, format!("user:{user}").as_bytes());
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_uuid_header_is_unauthorized() {
        let request = Request::builder()
            .uri("/")
            .header(USER_ID_HEADER, "test-user-123")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
