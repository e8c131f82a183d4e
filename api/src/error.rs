use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use shared::{DefinitionErrors, FilterError};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    InvalidDefinition(#[from] DefinitionErrors),

    #[error("Strategy not found: {0}")]
    UnknownPlayer(String),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Not found.")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Filter(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Filter(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidDefinition(_) | ApiError::UnknownPlayer(_) | ApiError::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Filter(e) if e.is_client_error() => {
                json!({ "detail": e.to_string(), "criterion": e.criterion() })
            }
            ApiError::InvalidDefinition(errors) => json!(errors),
            ApiError::UnknownPlayer(_) => json!({ "player_list": [self.to_string()] }),
            ApiError::MalformedBody(_) | ApiError::NotFound => json!({ "detail": self.to_string() }),
            ApiError::Filter(_) | ApiError::Internal(_) => {
                error!("Request failed: {:#}", self);
                json!({ "detail": "Internal server error" })
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ClassifierKey;

    #[test]
    fn test_filter_errors_map_to_status() {
        let unknown = ApiError::from(FilterError::UnknownCriterion("colour".into()));
        assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);

        let missing = ApiError::from(FilterError::MissingClassifierKey {
            name: "stochastic".into(),
            key: ClassifierKey::Stochastic,
        });
        assert_eq!(missing.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_unknown_player_message() {
        let err = ApiError::UnknownPlayer("nobody".into());
        assert_eq!(err.to_string(), "Strategy not found: nobody");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
    }
}
