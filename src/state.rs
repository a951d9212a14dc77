use crate::{
    configuration::Settings,
    modules::{database::get_postgres_pool, extractors::jwt::JwtAccessSecret},
};
use axum::extract::FromRef;
use sqlx::PgPool;

#[derive(FromRef, Clone)]
pub struct AppState {
    pub postgres: PgPool,
    pub jwt: JwtAccessSecret,
}

impl AppState {
    pub async fn new(config: Settings, test_pool: Option<PgPool>) -> Self {
        AppState {
            postgres: match test_pool {
                Some(pool) => pool,
                None => get_postgres_pool(config.postgres).await,
            },
            jwt: JwtAccessSecret(config.app.access_jwt_secret),
        }
    }
}
