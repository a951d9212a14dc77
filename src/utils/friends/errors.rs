use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FriendError {
    #[error("You can't send a friend request to yourself")]
    SelfRequest,
    #[error("Recipient not found")]
    UserNotFound,
    #[error("Friend request not found")]
    RequestNotFound,
    #[error("Only the recipient can respond to this request")]
    NotRecipient,
    #[error("You are already friends with this user")]
    AlreadyFriends,
    #[error("A friend request is already pending between you and this user")]
    RequestAlreadyPending,
    #[error("Friend request has already been accepted")]
    AlreadyAccepted,
    #[error("Friend request was rejected; it has to be sent again")]
    AlreadyRejected,
    #[error("Only a pending friend request can be rejected")]
    RequestNotPending,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl IntoResponse for FriendError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match &self {
            FriendError::SelfRequest => StatusCode::BAD_REQUEST,
            FriendError::UserNotFound => StatusCode::NOT_FOUND,
            FriendError::RequestNotFound => StatusCode::NOT_FOUND,
            FriendError::NotRecipient => StatusCode::FORBIDDEN,
            FriendError::AlreadyFriends => StatusCode::CONFLICT,
            FriendError::RequestAlreadyPending => StatusCode::CONFLICT,
            FriendError::AlreadyAccepted => StatusCode::CONFLICT,
            FriendError::AlreadyRejected => StatusCode::CONFLICT,
            FriendError::RequestNotPending => StatusCode::CONFLICT,
            FriendError::Unexpected(e) => {
                tracing::error!("Internal server error: {e:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let info = match self {
            FriendError::Unexpected(_) => "Unexpected server error".into(),
            _ => self.to_string(),
        };

        (status_code, Json(json!({ "error_info": info }))).into_response()
    }
}

impl From<sqlx::Error> for FriendError {
    fn from(e: sqlx::Error) -> Self {
        Self::Unexpected(anyhow::Error::from(e))
    }
}
