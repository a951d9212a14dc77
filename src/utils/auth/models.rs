use crate::{modules::extractors::jwt::JwtAccessSecret, state::AppState};
use anyhow::Context;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use time::Duration;
use uuid::Uuid;

use super::errors::AuthError;

pub const ACCESS_TOKEN_DURATION: Duration = Duration::days(30);

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Claims {
    pub jti: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub exp: u64,
}

impl Claims {
    pub fn new(user_id: Uuid, email: String, duration: Duration) -> Self {
        Self {
            jti: Uuid::new_v4(),
            user_id,
            email,
            exp: jsonwebtoken::get_current_timestamp() + duration.whole_seconds().unsigned_abs(),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Claims {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let JwtAccessSecret(jwt_key) = &state.jwt;
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .context("Failed to fetch cookie jar")?;

        let cookie = jar.get("jwt").ok_or(AuthError::MissingToken)?;
        validate_access_token(cookie, jwt_key)
    }
}

pub fn validate_access_token(
    cookie: &Cookie<'_>,
    secret: &Secret<String>,
) -> Result<Claims, AuthError> {
    let mut validation = Validation::default();
    validation.leeway = 5;

    let decoding_key = DecodingKey::from_secret(secret.expose_secret().as_bytes());

    let claims = decode::<Claims>(cookie.value(), &decoding_key, &validation)
        .map_err(|_| AuthError::InvalidToken)?
        .claims;

    Ok(claims)
}

pub fn create_access_token<'a>(
    user_id: Uuid,
    email: String,
    ext: &JwtAccessSecret,
) -> Result<Cookie<'a>, AuthError> {
    let claims = Claims::new(user_id, email, ACCESS_TOKEN_DURATION);

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(ext.0.expose_secret().as_bytes()),
    )
    .context("Failed to encode the access JWT")?;

    let cookie = Cookie::build(String::from("jwt"), token)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .path("/")
        .finish();

    Ok(cookie)
}
