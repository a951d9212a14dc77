use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;

use crate::{configuration::Settings, state::AppState};

pub mod friends;
pub mod users;

pub async fn app(config: Settings, test_pool: Option<PgPool>) -> Router {
    let origin = config
        .app
        .origin
        .parse::<HeaderValue>()
        .expect("Invalid origin");
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true);

    let api = Router::new()
        .merge(friends::router())
        .nest("/users", users::router())
        .route("/health", get(health_check))
        .with_state(AppState::new(config, test_pool).await)
        .layer(cors);

    Router::new().nest("/api", api)
}

async fn health_check(State(pool): State<PgPool>) -> impl IntoResponse {
    let is_database_connected = sqlx::query("select 1").fetch_one(&pool).await.is_ok();
    if is_database_connected {
        return (
            StatusCode::OK,
            Json(json!({"status": "all backend services are working properly"})),
        );
    }
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({"status":"database unavailable"})),
    )
}
