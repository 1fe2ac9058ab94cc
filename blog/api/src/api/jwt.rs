use chrono::{DateTime, TimeZone, Utc};
use hmac::{Hmac, Mac};
use jwt::{Claims, RegisteredClaims, SignWithKey, VerifyWithKey};
use sha2::Sha256;
use uuid::Uuid;

use crate::config::JwtConfig;

pub struct AuthJwtPayload {
    pub user_id: Uuid,
    pub email: String,
    pub expiration: Option<DateTime<Utc>>,
    pub issued_at: DateTime<Utc>,
    pub not_before: Option<DateTime<Utc>>,
    pub audience: Option<String>,
}

impl AuthJwtPayload {
    /// Serializes the payload into a signed JWT. Returns None if the signing
    /// fails for any reason.
    pub fn serialize(&self, config: &JwtConfig) -> Option<String> {
        let key = Hmac::<Sha256>::new_from_slice(config.secret.as_bytes()).ok()?;

        let mut claims = Claims::new(RegisteredClaims {
            issued_at: Some(self.issued_at.timestamp() as u64),
            expiration: self.expiration.map(|x| x.timestamp() as u64),
            issuer: Some(config.issuer.clone()),
            json_web_token_id: None,
            subject: Some(self.user_id.to_string()),
            not_before: self.not_before.map(|x| x.timestamp() as u64),
            audience: self.audience.clone(),
        });

        claims
            .private
            .insert("email".to_string(), serde_json::json!(self.email));

        claims.sign_with_key(&key).ok()
    }

    /// Verifies the token's signature and time claims. Returns None if the
    /// token is invalid in any way.
    pub fn verify(config: &JwtConfig, token: &str) -> Option<AuthJwtPayload> {
        let key = Hmac::<Sha256>::new_from_slice(config.secret.as_bytes()).ok()?;

        let claims: Claims = token.verify_with_key(&key).ok()?;

        let now = Utc::now();

        if claims.registered.issuer.as_deref()? != config.issuer {
            return None;
        }

        let iat = Utc
            .timestamp_opt(claims.registered.issued_at? as i64, 0)
            .single()?;
        if iat > now {
            return None;
        }

        let nbf = claims
            .registered
            .not_before
            .and_then(|x| Utc.timestamp_opt(x as i64, 0).single());
        if let Some(nbf) = nbf {
            if nbf > now {
                return None;
            }
        }

        let exp = claims
            .registered
            .expiration
            .and_then(|x| Utc.timestamp_opt(x as i64, 0).single());
        if let Some(exp) = exp {
            if exp < now {
                return None;
            }
        }

        let user_id = Uuid::parse_str(claims.registered.subject.as_deref()?).ok()?;

        let email = claims.private.get("email")?.as_str()?.to_string();

        Some(AuthJwtPayload {
            user_id,
            email,
            expiration: exp,
            issued_at: iat,
            not_before: nbf,
            audience: claims.registered.audience.clone(),
        })
    }

    /// A fresh login token for a user, valid for 30 days.
    pub fn from_login(user_id: Uuid, email: String) -> Self {
        let now = Utc::now();

        Self {
            user_id,
            email,
            expiration: Some(now + chrono::Duration::days(30)),
            issued_at: now,
            not_before: None,
            audience: None,
        }
    }
}
