use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::auth::models::Claims;
use crate::utils::friends::{
    accept_friend_request, errors::FriendError, fetch_incoming_requests, fetch_outgoing_requests,
    fetch_recently_accepted,
    models::{FriendRequest, FriendRequestFeed, PendingFriendRequest},
    reject_friend_request, send_friend_request,
};

/// Accepted requests older than this are not part of the "new connections"
/// feed anymore.
const ACCEPTED_FEED_WINDOW_HOURS: i32 = 24;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/friend-request/:target_id", post(send_request))
        .route("/friend-request/:request_id/accept", put(accept_request))
        .route("/friend-request/:request_id/reject", put(reject_request))
        .route("/friend-requests", get(friend_requests))
        .route("/outgoing-friend-requests", get(outgoing_requests))
}

async fn send_request(
    claims: Claims,
    State(pool): State<PgPool>,
    Path(target_id): Path<Uuid>,
) -> Result<(StatusCode, Json<FriendRequest>), FriendError> {
    let request = send_friend_request(&pool, claims.user_id, target_id).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

async fn accept_request(
    claims: Claims,
    State(pool): State<PgPool>,
    Path(request_id): Path<Uuid>,
) -> Result<(), FriendError> {
    accept_friend_request(&pool, request_id, claims.user_id).await?;
    Ok(())
}

async fn reject_request(
    claims: Claims,
    State(pool): State<PgPool>,
    Path(request_id): Path<Uuid>,
) -> Result<(), FriendError> {
    reject_friend_request(&pool, request_id, claims.user_id).await?;
    Ok(())
}

async fn friend_requests(
    claims: Claims,
    State(pool): State<PgPool>,
) -> Result<Json<FriendRequestFeed>, FriendError> {
    let incoming = fetch_incoming_requests(&pool, claims.user_id).await?;
    let accepted =
        fetch_recently_accepted(&pool, claims.user_id, ACCEPTED_FEED_WINDOW_HOURS).await?;
    Ok(Json(FriendRequestFeed { incoming, accepted }))
}

async fn outgoing_requests(
    claims: Claims,
    State(pool): State<PgPool>,
) -> Result<Json<Vec<PendingFriendRequest>>, FriendError> {
    let outgoing = fetch_outgoing_requests(&pool, claims.user_id).await?;
    Ok(Json(outgoing))
}
