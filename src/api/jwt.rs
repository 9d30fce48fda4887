use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Session token claims. `sub` carries the user's email, `uid` the
/// stable user id (`jti` is per-token and must not be used as one).
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub uid: String,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Issues and validates session tokens for the dashboard.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_hours: i64,
}

impl JwtService {
    pub fn new(secret: &str, session_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_hours,
        }
    }

    /// Build from the configured secret; an empty secret falls back to a
    /// random per-process value, which invalidates sessions on restart.
    pub fn from_secret(configured: &str) -> Self {
        let secret = if configured.is_empty() {
            tracing::warn!("JWT_SECRET not set; sessions will not survive a restart");
            uuid::Uuid::new_v4().to_string()
        } else {
            configured.to_string()
        };

        Self::new(&secret, 24)
    }

    pub fn generate_session_token(
        &self,
        user_id: &str,
        email: &str,
        name: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: email.to_string(),
            uid: user_id.to_string(),
            name: name.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.session_hours)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    pub fn validate_session_token(
        &self,
        token: &str,
    ) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_validate() {
        let svc = JwtService::new("test-secret", 1);
        let token = svc
            .generate_session_token("user-1", "me@example.com", "Me")
            .unwrap();

        let claims = svc.validate_session_token(&token).unwrap();
        assert_eq!(claims.sub, "me@example.com");
        assert_eq!(claims.uid, "user-1");
        assert_eq!(claims.name, "Me");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_uid_is_stable_across_tokens() {
        let svc = JwtService::new("test-secret", 1);
        let a = svc
            .generate_session_token("user-1", "me@example.com", "Me")
            .unwrap();
        let b = svc
            .generate_session_token("user-1", "me@example.com", "Me")
            .unwrap();

        let claims_a = svc.validate_session_token(&a).unwrap();
        let claims_b = svc.validate_session_token(&b).unwrap();
        assert_eq!(claims_a.uid, claims_b.uid);
        // Unlike the token id, which is fresh per session.
        assert_ne!(claims_a.jti, claims_b.jti);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtService::new("secret-a", 1);
        let verifier = JwtService::new("secret-b", 1);

        let token = issuer
            .generate_session_token("user-1", "me@example.com", "Me")
            .unwrap();
        assert!(verifier.validate_session_token(&token).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let svc = JwtService::new("test-secret", 1);
        let token = svc
            .generate_session_token("user-1", "me@example.com", "Me")
            .unwrap();

        let mut tampered = token.clone();
        tampered.push('x');
        assert!(svc.validate_session_token(&tampered).is_err());
    }
}
