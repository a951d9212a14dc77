use anyhow::Context;
use sqlx::{query, query_as, query_scalar, Acquire, Executor, Postgres};
use uuid::Uuid;

use self::{errors::UserError, models::UserProfile};

pub mod errors;
pub mod models;

pub async fn user_exists<'c>(
    exec: impl Executor<'c, Database = Postgres>,
    user_id: Uuid,
) -> anyhow::Result<bool> {
    let exists = query_scalar::<_, bool>(
        r#"
            select exists (select 1 from users where id = $1)
        "#,
    )
    .bind(user_id)
    .fetch_one(exec)
    .await
    .context("Failed to check user existence")?;

    Ok(exists)
}

pub async fn are_friends<'c>(
    exec: impl Executor<'c, Database = Postgres>,
    user_id: Uuid,
    friend_id: Uuid,
) -> anyhow::Result<bool> {
    let are_friends = query_scalar::<_, bool>(
        r#"
            select exists (
                select 1 from user_friends
                where (user_id = $1 and friend_id = $2)
                   or (user_id = $2 and friend_id = $1)
            )
        "#,
    )
    .bind(user_id)
    .bind(friend_id)
    .fetch_one(exec)
    .await
    .context("Failed to check friendship")?;

    Ok(are_friends)
}

/// Writes both directed rows of the symmetric relation. Re-adding an
/// existing friend is a no-op.
pub async fn add_friend<'c>(
    exec: impl Executor<'c, Database = Postgres>,
    user_id: Uuid,
    friend_id: Uuid,
) -> anyhow::Result<()> {
    query(
        r#"
            insert into user_friends (user_id, friend_id)
            values ($1, $2), ($2, $1)
            on conflict do nothing
        "#,
    )
    .bind(user_id)
    .bind(friend_id)
    .execute(exec)
    .await
    .context("Failed to add friends")?;

    Ok(())
}

pub async fn fetch_user_friends<'c>(
    conn: impl Acquire<'c, Database = Postgres>,
    user_id: Uuid,
) -> Result<Vec<UserProfile>, UserError> {
    let mut conn = conn.acquire().await.context("Failed to acquire connection")?;

    let friends = query_as::<_, UserProfile>(
        r#"
            select users.id, users.full_name, users.profile_pic,
                   users.native_language, users.learning_language
            from user_friends
            join users on users.id = user_friends.friend_id
            where user_friends.user_id = $1
            order by users.full_name
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await
    .context("Failed to fetch friends")?;

    Ok(friends)
}

pub async fn fetch_recommended_users<'c>(
    conn: impl Acquire<'c, Database = Postgres>,
    user_id: Uuid,
) -> Result<Vec<UserProfile>, UserError> {
    let mut conn = conn.acquire().await.context("Failed to acquire connection")?;

    let recommended = query_as::<_, UserProfile>(
        r#"
            select users.id, users.full_name, users.profile_pic,
                   users.native_language, users.learning_language
            from users
            where users.id <> $1
              and users.is_onboarded
              and not exists (
                  select 1 from user_friends
                  where user_friends.user_id = $1
                    and user_friends.friend_id = users.id
              )
            order by users.created_at desc
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await
    .context("Failed to fetch recommended users")?;

    Ok(recommended)
}
