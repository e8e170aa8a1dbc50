use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{CredentialsRequest, LoginResponse, RegisterResponse},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::User,
    },
    db::AppState,
    error::ApiError,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

// Emails are a case-sensitive identity; no trimming or lowercasing here.
fn required_credentials(payload: CredentialsRequest) -> Result<(String, String), ApiError> {
    match (payload.email, payload.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            Ok((email, password))
        }
        _ => Err(ApiError::InvalidInput(
            "Email and password are required".into(),
        )),
    }
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let (email, password) = required_credentials(payload)?;

    if !is_valid_email(&email) {
        warn!("invalid email");
        return Err(ApiError::InvalidInput("Invalid email".into()));
    }

    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!("email already registered");
        return Err(ApiError::DuplicateEmail);
    }

    let hash = hash_password(&password)?;

    // The unique constraint closes the pre-check race
    let user = User::create(&state.db, &email, &hash)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db)
                if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                ApiError::DuplicateEmail
            }
            _ => ApiError::Database(e),
        })?;

    info!(user_id = %user.id, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".into(),
            user: user.into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (email, password) = required_credentials(payload)?;

    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| {
            warn!("login with unknown email");
            ApiError::InvalidCredentials
        })?;

    if !verify_password(&password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        token,
        user: user.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_format_check() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("Alice.B@sub.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("alice@nodot"));
    }

    #[test]
    fn missing_fields_are_invalid_input() {
        let payload = CredentialsRequest {
            email: Some("alice@example.com".into()),
            password: None,
        };
        let err = required_credentials(payload).unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));

        let payload = CredentialsRequest {
            email: Some(String::new()),
            password: Some("pw123".into()),
        };
        assert!(required_credentials(payload).is_err());
    }

    #[test]
    fn present_fields_pass_through_unmodified() {
        let payload = CredentialsRequest {
            email: Some("Alice@Example.com".into()),
            password: Some("pw123".into()),
        };
        let (email, password) = required_credentials(payload).unwrap();
        // case-sensitive identity: no normalization
        assert_eq!(email, "Alice@Example.com");
        assert_eq!(password, "pw123");
    }
}
