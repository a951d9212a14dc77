use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl IntoResponse for UserError {
    fn into_response(self) -> axum::response::Response {
        let UserError::Unexpected(e) = self;
        tracing::error!("Internal server error: {e:?}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error_info": "Unexpected server error" })),
        )
            .into_response()
    }
}

impl From<sqlx::Error> for UserError {
    fn from(e: sqlx::Error) -> Self {
        Self::Unexpected(anyhow::Error::from(e))
    }
}
