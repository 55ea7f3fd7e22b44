//! Stateless bearer tokens: HS256-signed claims carrying a subject and an
//! absolute expiry. Validity is entirely signature + expiry; nothing is stored
//! server-side and there is no revocation list, so a token stays valid for its
//! full lifetime once issued.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
    #[error("malformed subject claim")]
    BadSubject,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id rendered as text.
    sub: String,
    /// Absolute expiry, seconds since the epoch.
    exp: i64,
}

/// Issues and validates signed access tokens.
///
/// Built once at startup from the immutable auth configuration and shared by
/// reference; verification is pure and needs no locking.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // expiry is exact, no clock-skew grace
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Issue a token for `subject` expiring `ttl` from now.
    pub fn issue(&self, subject: i64) -> Result<String, TokenError> {
        let exp = Utc::now().timestamp() + self.ttl.as_secs() as i64;
        let claims = Claims {
            sub: subject.to_string(),
            exp,
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(|_| TokenError::Invalid)
    }

    /// Verify signature and expiry, returning the encoded subject.
    ///
    /// A structurally valid token whose subject does not parse as a user id
    /// is rejected even though its signature checks out.
    pub fn verify(&self, token: &str) -> Result<i64, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;

        data.claims
            .sub
            .parse::<i64>()
            .map_err(|_| TokenError::BadSubject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret", Duration::from_secs(3600))
    }

    #[test]
    fn issue_then_verify_returns_subject() {
        let svc = service();
        let token = svc.issue(42).unwrap();
        assert_eq!(svc.verify(&token), Ok(42));
    }

    #[test]
    fn garbage_is_invalid() {
        let svc = service();
        assert_eq!(svc.verify("not.a.token"), Err(TokenError::Invalid));
        assert_eq!(svc.verify(""), Err(TokenError::Invalid));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let svc = service();
        let other = TokenService::new("another-secret", Duration::from_secs(3600));
        let token = other.issue(42).unwrap();
        assert_eq!(svc.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn expired_token_is_rejected() {
        let svc = service();
        // craft a token that expired an hour ago, signed with the same key
        let claims = Claims {
            sub: "42".to_string(),
            exp: Utc::now().timestamp() - 3600,
        };
        let token = encode(&Header::default(), &claims, &svc.encoding).unwrap();
        assert_eq!(svc.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn non_numeric_subject_is_rejected() {
        let svc = service();
        let claims = Claims {
            sub: "alice".to_string(),
            exp: Utc::now().timestamp() + 3600,
        };
        let token = encode(&Header::default(), &claims, &svc.encoding).unwrap();
        assert_eq!(svc.verify(&token), Err(TokenError::BadSubject));
    }
}
