use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::actor::{ActorRef, Role};
use crate::domain::errors::DomainError;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    role: String,
    iat: i64,
    exp: i64,
}

/// Issues and validates bearer credentials. Validation is a pure function of
/// the token and the signing secret; there is no session store to consult.
#[derive(Clone)]
pub struct TokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenAuthority {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn issue(&self, actor_id: Uuid, role: Role) -> Result<String, DomainError> {
        let now = Utc::now();
        let claims = Claims {
            sub: actor_id,
            role: role.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    /// Resolves a token to the caller it encodes. Expiry is reported
    /// distinctly; every other defect (bad signature, malformed token,
    /// unknown role) collapses into the generic `InvalidCredential`.
    pub fn validate(&self, token: &str) -> Result<ActorRef, DomainError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Expired,
                _ => DomainError::InvalidCredential,
            },
        )?;
        let role = Role::parse(&data.claims.role).ok_or(DomainError::InvalidCredential)?;
        Ok(ActorRef {
            id: data.claims.sub,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_validates_back_to_the_actor() {
        let authority = TokenAuthority::new("test-secret", 24);
        let id = Uuid::new_v4();

        let token = authority.issue(id, Role::Courier).expect("issue failed");
        let actor = authority.validate(&token).expect("validate failed");

        assert_eq!(actor.id, id);
        assert_eq!(actor.role, Role::Courier);
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let authority = TokenAuthority::new("test-secret", -2);
        let token = authority
            .issue(Uuid::new_v4(), Role::Customer)
            .expect("issue failed");

        assert!(matches!(
            authority.validate(&token),
            Err(DomainError::Expired)
        ));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let issuer = TokenAuthority::new("secret-a", 24);
        let verifier = TokenAuthority::new("secret-b", 24);
        let token = issuer
            .issue(Uuid::new_v4(), Role::Admin)
            .expect("issue failed");

        assert!(matches!(
            verifier.validate(&token),
            Err(DomainError::InvalidCredential)
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        let authority = TokenAuthority::new("test-secret", 24);
        assert!(matches!(
            authority.validate("not-a-token"),
            Err(DomainError::InvalidCredential)
        ));
    }
}
