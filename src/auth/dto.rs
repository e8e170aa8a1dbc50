use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::auth::repo::User;

/// Request body for registration and login. Fields are optional so that a
/// missing field is reported as a 400, not a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Response returned after registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn public_user_never_exposes_password_hash() {
        let user = User {
            id: 1,
            email: "alice@example.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            created_at: datetime!(2024-01-01 00:00 UTC),
        };
        let json = serde_json::to_string(&PublicUser::from(user)).unwrap();
        assert!(json.contains("alice@example.com"));
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password_hash"));
    }
}
