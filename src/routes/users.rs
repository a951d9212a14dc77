use axum::{extract::State, routing::get, Json, Router};
use sqlx::PgPool;

use crate::state::AppState;
use crate::utils::auth::models::Claims;
use crate::utils::users::{
    errors::UserError, fetch_recommended_users, fetch_user_friends, models::UserProfile,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/friends", get(my_friends))
        .route("/recommended", get(recommended_users))
}

async fn my_friends(
    claims: Claims,
    State(pool): State<PgPool>,
) -> Result<Json<Vec<UserProfile>>, UserError> {
    let friends = fetch_user_friends(&pool, claims.user_id).await?;
    Ok(Json(friends))
}

async fn recommended_users(
    claims: Claims,
    State(pool): State<PgPool>,
) -> Result<Json<Vec<UserProfile>>, UserError> {
    let recommended = fetch_recommended_users(&pool, claims.user_id).await?;
    Ok(Json(recommended))
}
