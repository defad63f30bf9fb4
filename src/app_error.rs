use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// One field-level validation failure, surfaced to the submitter as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("cart has no items")]
    EmptyCart,
    #[error("waiter is missing or inactive")]
    InvalidWaiter,
    /// Catalog data violated the positive-price invariant. Should never
    /// happen for validated records; treated as fatal and logged.
    #[error("price invariant violated: {0}")]
    PriceInvariant(String),
    #[error("resource not found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldError>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    error: "validation failed".into(),
                    fields: Some(fields),
                },
            ),
            AppError::EmptyCart => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "cart has no items".into(),
                    fields: None,
                },
            ),
            AppError::InvalidWaiter => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "waiter is missing or inactive".into(),
                    fields: None,
                },
            ),
            AppError::PriceInvariant(detail) => {
                tracing::error!("price invariant violated: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "internal error".into(),
                        fields: None,
                    },
                )
            }
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: "resource not found".into(),
                    fields: None,
                },
            ),
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: message,
                    fields: None,
                },
            ),
            AppError::Other(err) => {
                tracing::error!("internal error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "something went wrong, please try again".into(),
                        fields: None,
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Standard response envelope used by every handler.
#[derive(Serialize, ToSchema)]
pub struct StdResponse<T, M> {
    pub data: Option<T>,
    pub message: Option<M>,
}

impl<T: Serialize, M: Serialize> IntoResponse for StdResponse<T, M> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
