//! The response envelope every endpoint returns.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::RepoError;
use crate::use_cases::character::CharacterError;
use crate::use_cases::fight::FightError;

/// `{ data, success, message }`.
///
/// A response without data is sent as 404, with `success: false` and the
/// reason in `message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    pub data: Option<T>,
    pub success: bool,
    pub message: String,
}

impl<T> ServiceResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            success: true,
            message: String::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            success: false,
            message: message.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        let status = if self.data.is_some() {
            StatusCode::OK
        } else {
            StatusCode::NOT_FOUND
        };
        (status, Json(self)).into_response()
    }
}

impl<T> From<FightError> for ServiceResponse<T> {
    fn from(e: FightError) -> Self {
        match &e {
            FightError::Persistence(_) => tracing::error!(error = %e, "Fight failed"),
            _ => tracing::debug!(error = %e, "Fight rejected"),
        }
        Self::failure(e.to_string())
    }
}

impl<T> From<CharacterError> for ServiceResponse<T> {
    fn from(e: CharacterError) -> Self {
        match &e {
            CharacterError::Repo(_) => tracing::error!(error = %e, "Character operation failed"),
            _ => tracing::debug!(error = %e, "Character operation rejected"),
        }
        Self::failure(e.to_string())
    }
}

impl<T> From<RepoError> for ServiceResponse<T> {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = %e, "Repository failure");
        Self::failure(e.to_string())
    }
}

impl<T, E> From<Result<T, E>> for ServiceResponse<T>
where
    ServiceResponse<T>: From<E>,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_envelope() {
        let json = serde_json::to_value(ServiceResponse::ok(5)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "data": 5, "success": true, "message": "" })
        );
    }

    #[test]
    fn missing_data_is_not_found() {
        let response = ServiceResponse::<u32>::failure("Character not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(ServiceResponse::ok(1).into_response().status(), StatusCode::OK);
    }
}
