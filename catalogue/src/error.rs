use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use scm_common::product::ProductId;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("Product {0} not found")]
    NotFound(ProductId),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed metadata: {0}")]
    Json(#[from] serde_json::Error),

    #[error("QR encoding failed: {0}")]
    Qr(#[from] qrcode::types::QrError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl CatalogueError {
    pub fn status(&self) -> StatusCode {
        match self {
            CatalogueError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogueError::InvalidQuery(_) | CatalogueError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            CatalogueError::Io(_)
            | CatalogueError::Json(_)
            | CatalogueError::Qr(_)
            | CatalogueError::Image(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryRejection> for CatalogueError {
    fn from(rejection: QueryRejection) -> Self {
        CatalogueError::InvalidQuery(rejection.body_text())
    }
}

impl From<JsonRejection> for CatalogueError {
    fn from(rejection: JsonRejection) -> Self {
        CatalogueError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for CatalogueError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
