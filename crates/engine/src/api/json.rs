//! JSON body extractor that reports rejections in the response envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;

use super::response::ServiceResponse;

/// Like [`Json`], but a malformed or mistyped body comes back as
/// `{ data: null, success: false, message }` with axum's status code.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ServiceResponse<()>>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(reject(rejection)),
        }
    }
}

fn reject(rejection: JsonRejection) -> (StatusCode, Json<ServiceResponse<()>>) {
    tracing::debug!(error = %rejection, "Request body rejected");
    (
        rejection.status(),
        Json(ServiceResponse::failure(rejection.body_text())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn valid_body_is_extracted() {
        let body = request(Some("application/json"), r#"{"name":"Sam"}"#);
        let ApiJson(named) = ApiJson::<Named>::from_request(body, &()).await.unwrap();
        assert_eq!(named.name, "Sam");
    }

    #[tokio::test]
    async fn syntax_error_is_bad_request_envelope() {
        let body = request(Some("application/json"), "{not json");
        let Err((status, Json(body))) = ApiJson::<Named>::from_request(body, &()).await else {
            panic!("expected rejection");
        };
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert!(body.data.is_none());
        assert!(!body.message.is_empty());
    }

    #[tokio::test]
    async fn missing_content_type_is_rejected_in_envelope() {
        let body = request(None, r#"{"name":"Sam"}"#);
        let Err((status, Json(body))) = ApiJson::<Named>::from_request(body, &()).await else {
            panic!("expected rejection");
        };
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(!body.success);
    }
}
