use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::{config::JwtConfig, db::AppState, error::ApiError};

/// JWT payload: user id plus issuance and expiry timestamps.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,   // user ID
    pub iat: usize, // issued at (unix timestamp)
    pub exp: usize, // expires at (unix timestamp)
}

/// HMAC signing material plus the configured token lifetime.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::from_config(&state.config.jwt)
    }
}

impl JwtKeys {
    pub fn from_config(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl: Duration::from_secs((config.expiration_hours.max(0) as u64) * 3600),
        }
    }

    pub fn sign(&self, user_id: i64) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "jwt signed");
        Ok(token)
    }

    /// Validates signature and expiry. Expiry and signature failures are
    /// distinguished so the gate can report them separately.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::default();
        // expiry is exact: a token is rejected the moment `exp` has passed
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => ApiError::ExpiredToken,
                _ => ApiError::InvalidToken,
            }
        })?;
        debug!(user_id = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys() -> JwtKeys {
        JwtKeys::from_config(&JwtConfig {
            secret: "test-secret".into(),
            expiration_hours: 1,
        })
    }

    fn token_expiring_at(keys: &JwtKeys, exp: OffsetDateTime) -> String {
        let claims = Claims {
            sub: 7,
            iat: (exp - TimeDuration::hours(1)).unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        encode(&Header::default(), &claims, &keys.encoding).expect("encode")
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let keys = make_keys();
        let token = keys.sign(42).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, 42);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn verify_rejects_expired_token() {
        let keys = make_keys();
        let token = token_expiring_at(&keys, OffsetDateTime::now_utc() - TimeDuration::hours(2));
        let err = keys.verify(&token).unwrap_err();
        assert!(matches!(err, ApiError::ExpiredToken));
    }

    #[test]
    fn verify_rejects_token_just_past_expiry() {
        // no grace window: seconds past `exp` is already expired
        let keys = make_keys();
        let token = token_expiring_at(&keys, OffsetDateTime::now_utc() - TimeDuration::seconds(5));
        let err = keys.verify(&token).unwrap_err();
        assert!(matches!(err, ApiError::ExpiredToken));
    }

    #[test]
    fn verify_rejects_tampered_token() {
        let keys = make_keys();
        let token = keys.sign(1).expect("sign");
        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });
        let err = keys.verify(&tampered).unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));
    }

    #[test]
    fn verify_rejects_garbage() {
        let keys = make_keys();
        for garbage in ["", "not-a-jwt", "a.b.c", "Bearer abc"] {
            let err = keys.verify(garbage).unwrap_err();
            assert!(matches!(err, ApiError::InvalidToken));
        }
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let keys = make_keys();
        let other = JwtKeys::from_config(&JwtConfig {
            secret: "other-secret".into(),
            expiration_hours: 1,
        });
        let token = other.sign(3).expect("sign");
        let err = keys.verify(&token).unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));
    }
}
