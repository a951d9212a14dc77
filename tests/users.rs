use sqlx::PgPool;
use streamify_backend::utils::users::{
    add_friend, are_friends, fetch_recommended_users, fetch_user_friends, user_exists,
};
use uuid::Uuid;

fn mia() -> Uuid {
    Uuid::parse_str("3f2a9c64-10b5-4d8a-9e37-5a1c2b3d4e5f").unwrap()
}

fn theo() -> Uuid {
    Uuid::parse_str("8d4b6e21-7f3c-4a90-b5d8-0e1f2a3b4c5d").unwrap()
}

fn iris() -> Uuid {
    Uuid::parse_str("c5a1d8f3-2e6b-4c97-a0d4-9b8c7d6e5f4a").unwrap()
}

#[sqlx::test(fixtures("users"))]
async fn user_existence_check(db: PgPool) {
    assert!(user_exists(&db, mia()).await.unwrap());
    assert!(!user_exists(&db, Uuid::new_v4()).await.unwrap());
}

#[sqlx::test(fixtures("users", "friends"))]
async fn fetch_all_friends(db: PgPool) {
    let friends = fetch_user_friends(&db, mia()).await.unwrap();
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0].id, iris());
    assert_eq!(friends[0].full_name, "Iris Tanaka");
    assert_eq!(friends[0].learning_language, "english");
}

#[sqlx::test(fixtures("users"))]
async fn add_friend_is_idempotent(db: PgPool) {
    add_friend(&db, mia(), theo()).await.unwrap();
    add_friend(&db, mia(), theo()).await.unwrap();
    add_friend(&db, theo(), mia()).await.unwrap();

    assert!(are_friends(&db, mia(), theo()).await.unwrap());

    let rows: i64 = sqlx::query_scalar("select count(*) from user_friends")
        .fetch_one(&db)
        .await
        .unwrap();
    assert_eq!(rows, 2);
}

#[sqlx::test(fixtures("users", "friends"))]
async fn recommendations_exclude_self_friends_and_not_onboarded(db: PgPool) {
    // Iris is already Mia's friend, Noah is not onboarded
    let recommended = fetch_recommended_users(&db, mia()).await.unwrap();
    assert_eq!(recommended.len(), 1);
    assert_eq!(recommended[0].id, theo());
}
