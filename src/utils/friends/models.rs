use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "friend_request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FriendRequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl FriendRequestStatus {
    /// Transition table: pending -> {accepted, rejected},
    /// rejected -> {pending}, accepted is terminal.
    pub fn can_transition_to(self, next: FriendRequestStatus) -> bool {
        use FriendRequestStatus::*;
        matches!(
            (self, next),
            (Pending, Accepted) | (Pending, Rejected) | (Rejected, Pending)
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct FriendRequest {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub status: FriendRequestStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A pending request together with the counterpart's display profile:
/// the sender's for incoming requests, the recipient's for outgoing ones.
#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct PendingFriendRequest {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub created_at: OffsetDateTime,
    pub full_name: String,
    pub profile_pic: String,
    pub native_language: String,
    pub learning_language: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct AcceptedFriendRequest {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub updated_at: OffsetDateTime,
    pub full_name: String,
    pub profile_pic: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct FriendRequestFeed {
    pub incoming: Vec<PendingFriendRequest>,
    pub accepted: Vec<AcceptedFriendRequest>,
}
