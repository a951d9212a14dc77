use anyhow::Context;
use sqlx::{query, query_as, Acquire, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use self::errors::FriendError;
use self::models::{
    AcceptedFriendRequest, FriendRequest, FriendRequestStatus, PendingFriendRequest,
};
use super::users::{add_friend, are_friends, user_exists};

pub mod errors;
pub mod models;

/// Creates a pending friend request from `requester_id` to `target_id`, or
/// revives the pair's rejected request if one exists. At most one request
/// row ever exists per user pair; the partial unique index on pending pairs
/// backs up the in-transaction checks against concurrent senders.
pub async fn send_friend_request<'c>(
    conn: impl Acquire<'c, Database = Postgres>,
    requester_id: Uuid,
    target_id: Uuid,
) -> Result<FriendRequest, FriendError> {
    if requester_id == target_id {
        return Err(FriendError::SelfRequest);
    }

    let mut transaction = conn.begin().await.context("Failed to begin transaction")?;

    if !user_exists(&mut *transaction, target_id).await? {
        return Err(FriendError::UserNotFound);
    }

    if are_friends(&mut *transaction, requester_id, target_id).await? {
        return Err(FriendError::AlreadyFriends);
    }

    let existing = select_pair_request(&mut transaction, requester_id, target_id).await?;

    let request = match existing {
        Some(request) => match request.status {
            FriendRequestStatus::Pending => return Err(FriendError::RequestAlreadyPending),
            FriendRequestStatus::Accepted => return Err(FriendError::AlreadyFriends),
            FriendRequestStatus::Rejected => {
                // revive the dead row in the new direction instead of
                // stacking a duplicate for a repeatedly retried pair
                debug!("Reviving rejected friend request {}", request.id);
                query_as::<_, FriendRequest>(
                    r#"
                        update friend_requests
                        set sender_id = $1, recipient_id = $2, status = 'pending', updated_at = now()
                        where id = $3
                        returning *
                    "#,
                )
                .bind(requester_id)
                .bind(target_id)
                .bind(request.id)
                .fetch_one(&mut transaction)
                .await
                .context("Failed to revive friend request")?
            }
        },
        None => {
            let res = query_as::<_, FriendRequest>(
                r#"
                    insert into friend_requests (sender_id, recipient_id)
                    values ($1, $2)
                    returning *
                "#,
            )
            .bind(requester_id)
            .bind(target_id)
            .fetch_one(&mut transaction)
            .await;

            match res {
                Ok(request) => request,
                // a concurrent send for the same pair won the insert race
                Err(e) if is_unique_violation(&e) => {
                    return Err(FriendError::RequestAlreadyPending)
                }
                Err(e) => return Err(e.into()),
            }
        }
    };

    transaction.commit().await.context("Transaction failed")?;

    Ok(request)
}

/// Accepts a pending request on behalf of its recipient. The status change
/// and both directed friendship rows commit as one transaction, so no
/// reader can observe the request accepted without the friendship present.
pub async fn accept_friend_request<'c>(
    conn: impl Acquire<'c, Database = Postgres>,
    request_id: Uuid,
    acting_user_id: Uuid,
) -> Result<(), FriendError> {
    let mut transaction = conn.begin().await.context("Failed to begin transaction")?;

    let request = select_request_for_update(&mut transaction, request_id)
        .await?
        .ok_or(FriendError::RequestNotFound)?;

    if request.recipient_id != acting_user_id {
        return Err(FriendError::NotRecipient);
    }

    if !request.status.can_transition_to(FriendRequestStatus::Accepted) {
        return Err(match request.status {
            FriendRequestStatus::Accepted => FriendError::AlreadyAccepted,
            _ => FriendError::AlreadyRejected,
        });
    }

    query(
        r#"
            update friend_requests
            set status = 'accepted', updated_at = now()
            where id = $1
        "#,
    )
    .bind(request_id)
    .execute(&mut transaction)
    .await
    .context("Failed to accept friend request")?;

    add_friend(&mut *transaction, request.sender_id, request.recipient_id).await?;

    transaction.commit().await.context("Transaction failed")?;

    Ok(())
}

/// Rejects a pending request on behalf of its recipient. The record stays
/// around so a later send between the pair revives it.
pub async fn reject_friend_request<'c>(
    conn: impl Acquire<'c, Database = Postgres>,
    request_id: Uuid,
    acting_user_id: Uuid,
) -> Result<(), FriendError> {
    let mut transaction = conn.begin().await.context("Failed to begin transaction")?;

    let request = select_request_for_update(&mut transaction, request_id)
        .await?
        .ok_or(FriendError::RequestNotFound)?;

    if request.recipient_id != acting_user_id {
        return Err(FriendError::NotRecipient);
    }

    if !request.status.can_transition_to(FriendRequestStatus::Rejected) {
        return Err(FriendError::RequestNotPending);
    }

    query(
        r#"
            update friend_requests
            set status = 'rejected', updated_at = now()
            where id = $1
        "#,
    )
    .bind(request_id)
    .execute(&mut transaction)
    .await
    .context("Failed to reject friend request")?;

    transaction.commit().await.context("Transaction failed")?;

    Ok(())
}

/// Pending requests addressed to the user, newest first. The join on the
/// sender doubles as a filter against dangling sender references.
pub async fn fetch_incoming_requests<'c>(
    conn: impl Acquire<'c, Database = Postgres>,
    user_id: Uuid,
) -> Result<Vec<PendingFriendRequest>, FriendError> {
    let mut conn = conn.acquire().await.context("Failed to acquire connection")?;

    let incoming = query_as::<_, PendingFriendRequest>(
        r#"
            select friend_requests.id, friend_requests.sender_id,
                   friend_requests.recipient_id, friend_requests.created_at,
                   users.full_name, users.profile_pic,
                   users.native_language, users.learning_language
            from friend_requests
            join users on users.id = friend_requests.sender_id
            where friend_requests.recipient_id = $1
              and friend_requests.status = 'pending'
            order by friend_requests.created_at desc
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await
    .context("Failed to fetch incoming friend requests")?;

    Ok(incoming)
}

/// Pending requests the user has sent, newest first.
pub async fn fetch_outgoing_requests<'c>(
    conn: impl Acquire<'c, Database = Postgres>,
    user_id: Uuid,
) -> Result<Vec<PendingFriendRequest>, FriendError> {
    let mut conn = conn.acquire().await.context("Failed to acquire connection")?;

    let outgoing = query_as::<_, PendingFriendRequest>(
        r#"
            select friend_requests.id, friend_requests.sender_id,
                   friend_requests.recipient_id, friend_requests.created_at,
                   users.full_name, users.profile_pic,
                   users.native_language, users.learning_language
            from friend_requests
            join users on users.id = friend_requests.recipient_id
            where friend_requests.sender_id = $1
              and friend_requests.status = 'pending'
            order by friend_requests.created_at desc
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await
    .context("Failed to fetch outgoing friend requests")?;

    Ok(outgoing)
}

/// Requests involving the user accepted within the last `window_hours`,
/// joined with the counterpart's profile. The window cut-off happens in the
/// query, not by filtering the full history on the caller's side.
pub async fn fetch_recently_accepted<'c>(
    conn: impl Acquire<'c, Database = Postgres>,
    user_id: Uuid,
    window_hours: i32,
) -> Result<Vec<AcceptedFriendRequest>, FriendError> {
    let mut conn = conn.acquire().await.context("Failed to acquire connection")?;

    let accepted = query_as::<_, AcceptedFriendRequest>(
        r#"
            select friend_requests.id, friend_requests.sender_id,
                   friend_requests.recipient_id, friend_requests.updated_at,
                   users.full_name, users.profile_pic
            from friend_requests
            join users on users.id = case
                when friend_requests.sender_id = $1 then friend_requests.recipient_id
                else friend_requests.sender_id
            end
            where friend_requests.status = 'accepted'
              and (friend_requests.sender_id = $1 or friend_requests.recipient_id = $1)
              and friend_requests.updated_at > now() - make_interval(hours => $2)
            order by friend_requests.updated_at desc
        "#,
    )
    .bind(user_id)
    .bind(window_hours)
    .fetch_all(&mut *conn)
    .await
    .context("Failed to fetch recently accepted friend requests")?;

    Ok(accepted)
}

/// Locks and returns the pair's request row regardless of direction.
/// Revival keeps at most one row per pair alive, so `fetch_optional` holds.
async fn select_pair_request(
    transaction: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    other_user_id: Uuid,
) -> Result<Option<FriendRequest>, FriendError> {
    let request = query_as::<_, FriendRequest>(
        r#"
            select * from friend_requests
            where (sender_id = $1 and recipient_id = $2)
               or (sender_id = $2 and recipient_id = $1)
            for update
        "#,
    )
    .bind(user_id)
    .bind(other_user_id)
    .fetch_optional(&mut *transaction)
    .await
    .context("Failed to select friend request for pair")?;

    Ok(request)
}

async fn select_request_for_update(
    transaction: &mut Transaction<'_, Postgres>,
    request_id: Uuid,
) -> Result<Option<FriendRequest>, FriendError> {
    let request = query_as::<_, FriendRequest>(
        r#"
            select * from friend_requests
            where id = $1
            for update
        "#,
    )
    .bind(request_id)
    .fetch_optional(&mut *transaction)
    .await
    .context("Failed to select friend request")?;

    Ok(request)
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}
